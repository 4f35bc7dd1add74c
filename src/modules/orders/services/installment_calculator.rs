use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use crate::core::{AppError, Currency, Result};
use crate::modules::orders::models::{AdvanceMode, InstallmentAmounts};
use crate::modules::terms::models::{
    AdvancePaymentType, CategoryRule, DeferredRevenueTerm, InterestRateType,
};

/// Calculator for installment financing amounts.
///
/// A pure function over its inputs: no hidden state, no side effects,
/// identical inputs always produce identical outputs. The host invokes it
/// through `OrderService::recompute` whenever a tracked order input
/// changes.
pub struct InstallmentCalculator;

impl InstallmentCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the financing amounts for an order total.
    ///
    /// # Arguments
    /// * `unit_price_total` - Raw sum of the order's line unit prices
    /// * `term` - Selected financing plan; None means no financing
    /// * `rule` - Category rule matched for (term, order category); a
    ///   missing rule means no advance payment and no interest
    /// * `currency` - Order currency for rounding
    ///
    /// # Errors
    /// * `Configuration` when the term has zero months but a nonzero
    ///   interest-adjusted balance would need amortizing
    /// * `Validation` when a fixed advance exceeds the order total
    pub fn compute(
        &self,
        unit_price_total: Decimal,
        term: Option<&DeferredRevenueTerm>,
        rule: Option<&CategoryRule>,
        currency: Currency,
    ) -> Result<InstallmentAmounts> {
        if unit_price_total < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Order total must be non-negative, got: {}",
                unit_price_total
            )));
        }

        let total = currency.round(unit_price_total);

        let term = match term {
            Some(term) => term,
            None => return Ok(InstallmentAmounts::without_financing(total)),
        };

        let advance = currency.round(Self::advance_payment(total, rule));
        if advance > total {
            return Err(AppError::validation(format!(
                "Advance payment {} exceeds order total {}",
                advance, total
            )));
        }

        let balance = total - advance;
        let balance_with_interest =
            currency.round(balance * Self::interest_factor(rule, term.number_of_months));

        let monthly_amortization = if term.number_of_months == 0 {
            if !balance_with_interest.is_zero() {
                return Err(AppError::configuration(format!(
                    "Term '{}' has no amortization months but carries a balance of {}",
                    term.id, balance_with_interest
                )));
            }
            Decimal::ZERO
        } else {
            currency.round(balance_with_interest / Decimal::from(term.number_of_months))
        };

        let (spot_advance, deferred_advance) = if advance.is_zero() {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            // rule is present here: a missing rule yields a zero advance
            let spot_discount = rule.map(|r| r.spot_advance_discount).unwrap_or_default();
            let deferred_discount = rule
                .map(|r| r.deferred_advance_discount)
                .unwrap_or_default();
            let deferred_count = rule.map(|r| r.deferred_advance_count).unwrap_or_default();

            let spot = currency.round(advance * Self::discount_factor(spot_discount));
            let deferred_raw = advance * Self::discount_factor(deferred_discount);

            // A zero count means "no instalment split": the discounted
            // advance passes through undivided. The split is rounded
            // toward zero so count payments never exceed the advance.
            let deferred = if deferred_count > 0 {
                (deferred_raw / Decimal::from(deferred_count))
                    .round_dp_with_strategy(currency.scale(), RoundingStrategy::ToZero)
            } else {
                currency.round(deferred_raw)
            };

            (spot, deferred)
        };

        let amounts = InstallmentAmounts {
            advance_payment: advance,
            spot_advance,
            deferred_advance,
            balance,
            balance_with_interest,
            monthly_amortization,
        };

        info!(
            "Computed installment amounts for term '{}': advance {}, balance {}, monthly {}",
            term.id, amounts.advance_payment, amounts.balance, amounts.monthly_amortization
        );

        Ok(amounts)
    }

    /// Presentation subtotal for the chosen advance mode: the total the
    /// customer pays under that presentation, broadcast onto order lines.
    pub fn order_line_subtotal(
        &self,
        amounts: &InstallmentAmounts,
        term: &DeferredRevenueTerm,
        rule: Option<&CategoryRule>,
        mode: AdvanceMode,
        currency: Currency,
    ) -> Decimal {
        let months = Decimal::from(term.number_of_months);
        let amortized = amounts.monthly_amortization * months;

        let subtotal = match mode {
            AdvanceMode::Spot => amounts.spot_advance + amortized,
            AdvanceMode::Deferred => {
                // Count 0 is a single undivided payment
                let count = rule
                    .map(|r| r.deferred_advance_count.max(1))
                    .unwrap_or(1);
                amounts.deferred_advance * Decimal::from(count) + amortized
            }
            AdvanceMode::None => Decimal::ZERO,
        };

        currency.round(subtotal)
    }

    fn advance_payment(total: Decimal, rule: Option<&CategoryRule>) -> Decimal {
        match rule {
            Some(rule) => match rule.advance_payment_type {
                AdvancePaymentType::Percentage => {
                    total * rule.advance_payment / Decimal::ONE_HUNDRED
                }
                AdvancePaymentType::Fixed => rule.advance_payment,
                AdvancePaymentType::None => Decimal::ZERO,
            },
            None => Decimal::ZERO,
        }
    }

    fn interest_factor(rule: Option<&CategoryRule>, number_of_months: u32) -> Decimal {
        let rule = match rule {
            Some(rule) => rule,
            None => return Decimal::ONE,
        };

        let rate = rule.interest_rate / Decimal::ONE_HUNDRED;
        match rule.interest_rate_type {
            InterestRateType::WholeBalance => Decimal::ONE + rate,
            InterestRateType::PerMonth => {
                Decimal::ONE + rate * Decimal::from(number_of_months)
            }
        }
    }

    fn discount_factor(percent: Decimal) -> Decimal {
        Decimal::ONE - percent / Decimal::ONE_HUNDRED
    }
}

impl Default for InstallmentCalculator {
    fn default() -> Self {
        Self::new()
    }
}
