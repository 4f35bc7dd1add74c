use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// How interest is applied to the financed balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestRateType {
    /// The rate accrues for every month of the term (simple monthly interest)
    PerMonth,
    /// The rate is applied once to the whole balance
    WholeBalance,
}

impl InterestRateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerMonth => "per_month",
            Self::WholeBalance => "whole_balance",
        }
    }
}

impl std::fmt::Display for InterestRateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InterestRateType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "per_month" => Ok(Self::PerMonth),
            "whole_balance" => Ok(Self::WholeBalance),
            _ => Err(format!("Invalid interest rate type: {}", s)),
        }
    }
}

/// How the advance payment is derived from the order total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancePaymentType {
    /// Percentage of the selling price
    Percentage,
    /// Fixed amount
    Fixed,
    /// No advance payment collected
    None,
}

impl AdvancePaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
            Self::None => "none",
        }
    }
}

impl Default for AdvancePaymentType {
    fn default() -> Self {
        AdvancePaymentType::Percentage
    }
}

impl std::fmt::Display for AdvancePaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AdvancePaymentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid advance payment type: {}", s)),
        }
    }
}

/// Binds a financing plan to exactly one product category.
///
/// Carries the interest and advance-payment policy applied when an order
/// in that category selects the owning term. At most one rule may exist
/// per (term, category) pair; `TermRegistry` enforces this on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub term_id: String,
    pub category_id: String,
    pub interest_rate_type: InterestRateType,
    /// Interest percentage, e.g. 10.0 for 10%
    pub interest_rate: Decimal,
    pub advance_payment_type: AdvancePaymentType,
    /// Percentage of the selling price or a fixed amount,
    /// per `advance_payment_type`
    pub advance_payment: Decimal,
    /// Discount percentage when the advance is paid up front
    #[serde(default)]
    pub spot_advance_discount: Decimal,
    /// Discount percentage when the advance is deferred
    #[serde(default)]
    pub deferred_advance_discount: Decimal,
    /// Number of payments the deferred advance is split across; 0 = no split
    #[serde(default)]
    pub deferred_advance_count: u32,
}

impl CategoryRule {
    pub fn new(
        term_id: impl Into<String>,
        category_id: impl Into<String>,
        interest_rate_type: InterestRateType,
        interest_rate: Decimal,
        advance_payment_type: AdvancePaymentType,
        advance_payment: Decimal,
    ) -> Result<Self> {
        let rule = Self {
            term_id: term_id.into(),
            category_id: category_id.into(),
            interest_rate_type,
            interest_rate,
            advance_payment_type,
            advance_payment,
            spot_advance_discount: Decimal::ZERO,
            deferred_advance_discount: Decimal::ZERO,
            deferred_advance_count: 0,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Set the paid-up advance discount
    pub fn with_spot_discount(mut self, percent: Decimal) -> Result<Self> {
        self.spot_advance_discount = percent;
        self.validate()?;
        Ok(self)
    }

    /// Set the deferred advance discount and instalment count
    pub fn with_deferred_split(mut self, percent: Decimal, count: u32) -> Result<Self> {
        self.deferred_advance_discount = percent;
        self.deferred_advance_count = count;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.term_id.trim().is_empty() {
            return Err(AppError::validation("Rule term id cannot be empty"));
        }

        if self.category_id.trim().is_empty() {
            return Err(AppError::validation("Rule category id cannot be empty"));
        }

        if self.interest_rate < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Interest rate cannot be negative, got {}",
                self.interest_rate
            )));
        }

        if self.advance_payment < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Advance payment cannot be negative, got {}",
                self.advance_payment
            )));
        }

        if self.advance_payment_type == AdvancePaymentType::Percentage
            && self.advance_payment > Decimal::ONE_HUNDRED
        {
            return Err(AppError::validation(format!(
                "Percentage advance payment cannot exceed 100, got {}",
                self.advance_payment
            )));
        }

        for (label, discount) in [
            ("Spot advance discount", self.spot_advance_discount),
            ("Deferred advance discount", self.deferred_advance_discount),
        ] {
            if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
                return Err(AppError::validation(format!(
                    "{} must be between 0 and 100, got {}",
                    label, discount
                )));
            }
        }

        Ok(())
    }
}
