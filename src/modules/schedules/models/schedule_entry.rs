use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// What a schedule entry collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleEntryKind {
    /// The advance paid up front
    SpotAdvance,
    /// One instalment of the deferred advance
    DeferredAdvance,
    /// One monthly amortization payment
    Amortization,
}

impl ScheduleEntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpotAdvance => "spot_advance",
            Self::DeferredAdvance => "deferred_advance",
            Self::Amortization => "amortization",
        }
    }
}

impl std::fmt::Display for ScheduleEntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One dated payment in an order's installment schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Sequential position across the whole schedule (1-based)
    pub sequence: u32,
    pub kind: ScheduleEntryKind,
    pub due_date: NaiveDate,
    pub amount: Decimal,
}

impl ScheduleEntry {
    pub fn new(
        sequence: u32,
        kind: ScheduleEntryKind,
        due_date: NaiveDate,
        amount: Decimal,
    ) -> Result<Self> {
        if sequence == 0 {
            return Err(AppError::validation("Schedule sequence starts at 1"));
        }

        if amount < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Schedule amount cannot be negative, got: {}",
                amount
            )));
        }

        Ok(Self {
            sequence,
            kind,
            due_date,
            amount,
        })
    }
}
