use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::core::{AppError, Currency, Result};
use crate::modules::orders::models::{AdvanceMode, InstallmentAmounts};
use crate::modules::schedules::models::{ScheduleEntry, ScheduleEntryKind};
use crate::modules::terms::models::{CategoryRule, DeferredRevenueTerm};

/// Expands computed installment amounts into a dated payment schedule.
///
/// Advance entries come first: a single spot entry on the start date, or
/// the deferred advance split across monthly instalments. Amortization
/// entries follow at monthly intervals. The last entry of each group
/// absorbs rounding drift so that group totals reconcile exactly with
/// the discounted advance and the interest-adjusted balance.
pub struct ScheduleBuilder;

impl ScheduleBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(
        &self,
        amounts: &InstallmentAmounts,
        term: &DeferredRevenueTerm,
        rule: Option<&CategoryRule>,
        mode: AdvanceMode,
        currency: Currency,
        start_date: NaiveDate,
    ) -> Result<Vec<ScheduleEntry>> {
        let mut entries = Vec::new();
        let mut sequence = 1u32;
        let mut month_offset = 0u32;
        let mut expected_total = Decimal::ZERO;

        match mode {
            AdvanceMode::Spot if !amounts.spot_advance.is_zero() => {
                entries.push(ScheduleEntry::new(
                    sequence,
                    ScheduleEntryKind::SpotAdvance,
                    start_date,
                    amounts.spot_advance,
                )?);
                sequence += 1;
                month_offset = 1;
                expected_total += amounts.spot_advance;
            }
            AdvanceMode::Deferred if !amounts.deferred_advance.is_zero() => {
                let count = rule
                    .map(|r| r.deferred_advance_count.max(1))
                    .unwrap_or(1);
                let discount = rule
                    .map(|r| r.deferred_advance_discount)
                    .unwrap_or_default();
                let target = currency.round(
                    amounts.advance_payment
                        * (Decimal::ONE - discount / Decimal::ONE_HUNDRED),
                );

                let mut distributed = Decimal::ZERO;
                for i in 0..count {
                    // Last instalment absorbs the rounding difference
                    let amount = if i == count - 1 {
                        target - distributed
                    } else {
                        amounts.deferred_advance
                    };

                    let due_date = Self::due_date(start_date, i)?;
                    entries.push(ScheduleEntry::new(
                        sequence,
                        ScheduleEntryKind::DeferredAdvance,
                        due_date,
                        amount,
                    )?);
                    sequence += 1;
                    distributed += amount;
                }

                month_offset = count;
                expected_total += target;
            }
            _ => {}
        }

        let months = term.number_of_months;
        if months > 0 && !amounts.balance_with_interest.is_zero() {
            let mut distributed = Decimal::ZERO;
            for i in 0..months {
                // Last month absorbs the rounding difference
                let amount = if i == months - 1 {
                    amounts.balance_with_interest - distributed
                } else {
                    amounts.monthly_amortization
                };

                let due_date = Self::due_date(start_date, month_offset + i)?;
                entries.push(ScheduleEntry::new(
                    sequence,
                    ScheduleEntryKind::Amortization,
                    due_date,
                    amount,
                )?);
                sequence += 1;
                distributed += amount;
            }

            expected_total += amounts.balance_with_interest;
        }

        let scheduled_total: Decimal = entries.iter().map(|entry| entry.amount).sum();
        if scheduled_total != expected_total {
            warn!(
                "Schedule total mismatch: scheduled {} vs expected {}",
                scheduled_total, expected_total
            );
            return Err(AppError::internal(format!(
                "Schedule total ({}) does not reconcile with computed amounts ({})",
                scheduled_total, expected_total
            )));
        }

        info!(
            "Built {} schedule entries for term '{}' totalling {}",
            entries.len(),
            term.id,
            scheduled_total
        );

        Ok(entries)
    }

    fn due_date(start_date: NaiveDate, months_ahead: u32) -> Result<NaiveDate> {
        start_date
            .checked_add_months(Months::new(months_ahead))
            .ok_or_else(|| AppError::validation("Failed to calculate due date"))
    }
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
