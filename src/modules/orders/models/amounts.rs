use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived financing outputs for an order.
///
/// Always a deterministic function of the current order inputs; the host
/// recomputes on every relevant mutation, so none of these values can
/// drift from their sources. All amounts are rounded to the order
/// currency's scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InstallmentAmounts {
    /// Upfront portion collected before the financing term begins
    pub advance_payment: Decimal,
    /// Advance collected immediately, discounted
    pub spot_advance: Decimal,
    /// Advance collected over the term, discounted and possibly split
    /// across a count of payments
    pub deferred_advance: Decimal,
    /// Order total minus the advance payment
    pub balance: Decimal,
    /// Balance after interest, the amount spread across the term
    pub balance_with_interest: Decimal,
    /// Periodic payment covering the interest-adjusted balance
    pub monthly_amortization: Decimal,
}

impl InstallmentAmounts {
    /// Amounts for an order with no financing (cash purchase or no term
    /// selected): the whole total remains as balance.
    pub fn without_financing(total: Decimal) -> Self {
        Self {
            balance: total,
            balance_with_interest: total,
            ..Self::default()
        }
    }

    /// Whether any financing output is in effect
    pub fn is_financed(&self) -> bool {
        !self.advance_payment.is_zero() || !self.monthly_amortization.is_zero()
    }
}
