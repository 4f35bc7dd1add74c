// Property-based tests for the installment pricing computation:
// advance payment derivation, interest application, amortization,
// and the spot/deferred advance splits.

use payplan::core::{AppError, Currency};
use payplan::orders::{InstallmentAmounts, InstallmentCalculator};
use payplan::terms::{AdvancePaymentType, CategoryRule, DeferredRevenueTerm, InterestRateType};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn term(months: u32) -> DeferredRevenueTerm {
    DeferredRevenueTerm::new("plan", "Test Plan", months).unwrap()
}

fn rule(
    rate: Decimal,
    advance_type: AdvancePaymentType,
    advance: Decimal,
) -> CategoryRule {
    CategoryRule::new(
        "plan",
        "lawn-lots",
        InterestRateType::WholeBalance,
        rate,
        advance_type,
        advance,
    )
    .unwrap()
}

/// No advance payment configured: the whole total stays as balance
#[test]
fn test_none_advance_type_keeps_full_balance() {
    let calculator = InstallmentCalculator::new();
    let rule = rule(dec!(0), AdvancePaymentType::None, dec!(0));

    let amounts = calculator
        .compute(dec!(7500), Some(&term(10)), Some(&rule), Currency::PHP)
        .unwrap();

    assert_eq!(amounts.advance_payment, Decimal::ZERO);
    assert_eq!(amounts.balance, dec!(7500));
    assert_eq!(amounts.spot_advance, Decimal::ZERO);
    assert_eq!(amounts.deferred_advance, Decimal::ZERO);
}

/// The documented example: 10000 total, 20% advance, 10% whole-balance
/// interest over 12 months, no discounts, no deferred split
#[test]
fn test_reference_computation() {
    let calculator = InstallmentCalculator::new();
    let rule = rule(dec!(10), AdvancePaymentType::Percentage, dec!(20));

    let amounts = calculator
        .compute(dec!(10000), Some(&term(12)), Some(&rule), Currency::PHP)
        .unwrap();

    assert_eq!(amounts.advance_payment, dec!(2000));
    assert_eq!(amounts.balance, dec!(8000));
    assert_eq!(amounts.balance_with_interest, dec!(8800));
    assert_eq!(amounts.monthly_amortization, dec!(733.33));
    assert_eq!(amounts.deferred_advance, dec!(2000));
    assert_eq!(amounts.spot_advance, dec!(2000));
}

/// A zero-month term cannot amortize a nonzero balance
#[test]
fn test_zero_months_with_balance_raises_configuration_error() {
    let calculator = InstallmentCalculator::new();
    let rule = rule(dec!(10), AdvancePaymentType::Percentage, dec!(20));

    let result = calculator.compute(dec!(10000), Some(&term(0)), Some(&rule), Currency::PHP);

    match result {
        Err(AppError::Configuration(message)) => {
            assert!(message.contains("no amortization months"));
        }
        other => panic!("Expected configuration error, got {:?}", other),
    }
}

/// Count 0 means "no instalment split": the discounted advance passes
/// through undivided, and it is always a scalar amount
#[test]
fn test_zero_deferred_count_passes_through_undivided() {
    let calculator = InstallmentCalculator::new();
    let rule = rule(dec!(0), AdvancePaymentType::Percentage, dec!(20))
        .with_deferred_split(dec!(10), 0)
        .unwrap();

    let amounts = calculator
        .compute(dec!(10000), Some(&term(12)), Some(&rule), Currency::PHP)
        .unwrap();

    // 2000 discounted by 10%, undivided
    assert_eq!(amounts.deferred_advance, dec!(1800));
}

/// Without a matching rule the computation falls back to zero advance
/// and zero interest rather than erroring
#[test]
fn test_missing_rule_fallback() {
    let calculator = InstallmentCalculator::new();

    let amounts = calculator
        .compute(dec!(9000), Some(&term(9)), None, Currency::PHP)
        .unwrap();

    assert_eq!(amounts.advance_payment, Decimal::ZERO);
    assert_eq!(amounts.balance, dec!(9000));
    assert_eq!(amounts.monthly_amortization, dec!(1000));
}

/// No term selected means no financing at all
#[test]
fn test_no_term_means_no_financing() {
    let calculator = InstallmentCalculator::new();

    let amounts = calculator
        .compute(dec!(9000), None, None, Currency::PHP)
        .unwrap();

    assert_eq!(amounts, InstallmentAmounts::without_financing(dec!(9000)));
    assert!(!amounts.is_financed());
}

proptest! {
    /// Percentage advances derive exactly from the order total
    #[test]
    fn prop_percentage_advance_is_exact(
        total in 0u64..100_000_000u64,
        percent in 0u8..=100u8,
    ) {
        let calculator = InstallmentCalculator::new();
        let total = Decimal::from(total) / Decimal::from(100); // centavos
        let rule = rule(
            dec!(0),
            AdvancePaymentType::Percentage,
            Decimal::from(percent),
        );

        let amounts = calculator
            .compute(total, Some(&term(12)), Some(&rule), Currency::PHP)
            .expect("computation failed");

        let expected = (total * Decimal::from(percent) / Decimal::from(100)).round_dp(2);
        prop_assert_eq!(amounts.advance_payment, expected);
    }

    /// The advance and the balance always partition the order total
    #[test]
    fn prop_advance_plus_balance_equals_total(
        total in 0u64..100_000_000u64,
        percent in 0u8..=100u8,
    ) {
        let calculator = InstallmentCalculator::new();
        let total = Decimal::from(total) / Decimal::from(100);
        let rule = rule(
            dec!(0),
            AdvancePaymentType::Percentage,
            Decimal::from(percent),
        );

        let amounts = calculator
            .compute(total, Some(&term(12)), Some(&rule), Currency::PHP)
            .expect("computation failed");

        prop_assert_eq!(amounts.advance_payment + amounts.balance, total);
    }

    /// With zero discounts the spot advance equals the advance payment,
    /// and the deferred split times its count never exceeds it
    #[test]
    fn prop_undiscounted_splits_reconstruct_advance(
        total in 1u64..100_000_000u64,
        percent in 1u8..=100u8,
        count in 0u32..=12u32,
    ) {
        let calculator = InstallmentCalculator::new();
        let total = Decimal::from(total) / Decimal::from(100);
        let rule = rule(
            dec!(0),
            AdvancePaymentType::Percentage,
            Decimal::from(percent),
        )
        .with_deferred_split(dec!(0), count)
        .unwrap();

        let amounts = calculator
            .compute(total, Some(&term(12)), Some(&rule), Currency::PHP)
            .expect("computation failed");

        prop_assert_eq!(amounts.spot_advance, amounts.advance_payment);

        let effective_count = Decimal::from(count.max(1));
        let deferred_total = amounts.deferred_advance * effective_count;
        prop_assert!(
            deferred_total <= amounts.advance_payment,
            "deferred total {} exceeds advance {}",
            deferred_total,
            amounts.advance_payment
        );
        // The split loses at most one smallest unit per payment to rounding
        prop_assert!(
            amounts.advance_payment - deferred_total
                <= effective_count * Currency::PHP.smallest_unit()
        );
    }

    /// Identical inputs always produce identical outputs
    #[test]
    fn prop_computation_is_idempotent(
        total in 0u64..100_000_000u64,
        percent in 0u8..=100u8,
        rate in 0u8..=50u8,
        months in 1u32..=60u32,
    ) {
        let calculator = InstallmentCalculator::new();
        let total = Decimal::from(total) / Decimal::from(100);
        let term = term(months);
        let rule = rule(
            Decimal::from(rate),
            AdvancePaymentType::Percentage,
            Decimal::from(percent),
        );

        let first = calculator
            .compute(total, Some(&term), Some(&rule), Currency::PHP)
            .expect("computation failed");
        let second = calculator
            .compute(total, Some(&term), Some(&rule), Currency::PHP)
            .expect("computation failed");

        prop_assert_eq!(first, second);
    }

    /// The monthly amortization never exceeds the interest-adjusted
    /// balance for a single-month term, and scales down with the term
    #[test]
    fn prop_amortization_spreads_balance(
        total in 1u64..100_000_000u64,
        rate in 0u8..=50u8,
        months in 1u32..=60u32,
    ) {
        let calculator = InstallmentCalculator::new();
        let total = Decimal::from(total) / Decimal::from(100);
        let rule = rule(
            Decimal::from(rate),
            AdvancePaymentType::None,
            dec!(0),
        );

        let amounts = calculator
            .compute(total, Some(&term(months)), Some(&rule), Currency::PHP)
            .expect("computation failed");

        prop_assert!(amounts.monthly_amortization <= amounts.balance_with_interest);
        let expected = (amounts.balance_with_interest / Decimal::from(months)).round_dp(2);
        prop_assert_eq!(amounts.monthly_amortization, expected);
    }
}
