// End-to-end recompute flow: catalog loading, registry lookup, amount
// derivation, line subtotal broadcast and note resolution.

use payplan::config::{Catalog, CompanyDefaults};
use payplan::core::{AppError, Currency};
use payplan::invoices::InvoiceBuilder;
use payplan::orders::{
    AdvanceMode, Order, OrderLine, OrderService, PurchaseType, DEFERRED_NOTE, PAID_UP_NOTE,
};
use payplan::terms::TermRegistry;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CATALOG: &str = r#"
terms:
  - id: plan-12
    name: 12 Month Plan
    number_of_months: 12
    rules:
      - category_id: lawn-lots
        interest_rate_type: whole_balance
        interest_rate: 10
        advance_payment_type: percentage
        advance_payment: 20
        spot_advance_discount: 5
        deferred_advance_discount: 2
        deferred_advance_count: 4
  - id: plan-24
    name: 24 Month Plan
    number_of_months: 24
"#;

fn registry() -> TermRegistry {
    let catalog = Catalog::from_yaml_str(CATALOG).unwrap();
    TermRegistry::from_catalog(&catalog).unwrap()
}

fn defaults() -> CompanyDefaults {
    CompanyDefaults {
        currency: Currency::PHP,
        sale_note: Some("Subject to standard terms.".to_string()),
    }
}

fn installment_order() -> Order {
    let mut order = Order::new("SO-0001", "lawn-lots", &defaults()).unwrap();
    order.add_line(OrderLine::new("Lawn Lot A1", 1, dec!(6000)).unwrap());
    order.add_line(OrderLine::new("Lawn Lot A2", 1, dec!(4000)).unwrap());
    order.select_term("plan-12");
    order
}

#[test]
fn test_recompute_derives_amounts() {
    let registry = registry();
    let service = OrderService::new();
    let mut order = installment_order();

    service.recompute(&mut order, &registry).unwrap();

    assert_eq!(order.amounts.advance_payment, dec!(2000));
    assert_eq!(order.amounts.balance, dec!(8000));
    assert_eq!(order.amounts.balance_with_interest, dec!(8800));
    assert_eq!(order.amounts.monthly_amortization, dec!(733.33));
    // 5% spot discount on 2000
    assert_eq!(order.amounts.spot_advance, dec!(1900));
    // 2% deferred discount on 2000, split across 4 payments
    assert_eq!(order.amounts.deferred_advance, dec!(490));
}

#[test]
fn test_recompute_is_idempotent() {
    let registry = registry();
    let service = OrderService::new();
    let mut order = installment_order();
    order.advance_mode = AdvanceMode::Spot;

    service.recompute(&mut order, &registry).unwrap();
    let first = order.clone();
    service.recompute(&mut order, &registry).unwrap();

    assert_eq!(order.amounts, first.amounts);
    assert_eq!(order.note, first.note);
    assert_eq!(
        order.lines[0].installment_subtotal,
        first.lines[0].installment_subtotal
    );
}

#[test]
fn test_spot_mode_broadcasts_subtotal_and_note() {
    let registry = registry();
    let service = OrderService::new();
    let mut order = installment_order();
    order.advance_mode = AdvanceMode::Spot;

    service.recompute(&mut order, &registry).unwrap();

    // 1900 + 12 x 733.33, identical on every line
    let expected = dec!(1900) + dec!(733.33) * dec!(12);
    for line in &order.lines {
        assert_eq!(line.installment_subtotal, Some(expected));
    }
    assert_eq!(order.note.as_deref(), Some(PAID_UP_NOTE));
}

#[test]
fn test_deferred_mode_broadcasts_subtotal_and_note() {
    let registry = registry();
    let service = OrderService::new();
    let mut order = installment_order();
    order.advance_mode = AdvanceMode::Deferred;

    service.recompute(&mut order, &registry).unwrap();

    // 4 x 490 + 12 x 733.33
    let expected = dec!(490) * dec!(4) + dec!(733.33) * dec!(12);
    for line in &order.lines {
        assert_eq!(line.installment_subtotal, Some(expected));
    }
    assert_eq!(order.note.as_deref(), Some(DEFERRED_NOTE));
}

#[test]
fn test_zero_advance_clears_mode_and_note() {
    let registry = registry();
    let service = OrderService::new();

    // plan-24 has no rule for this category, so the advance is zero
    let mut order = installment_order();
    order.select_term("plan-24");
    order.advance_mode = AdvanceMode::Spot;
    order.note = Some(PAID_UP_NOTE.to_string());

    service.recompute(&mut order, &registry).unwrap();

    assert_eq!(order.advance_mode, AdvanceMode::None);
    assert_eq!(order.note, None);
    for line in &order.lines {
        assert_eq!(line.installment_subtotal, None);
    }
}

#[test]
fn test_cash_purchase_has_no_financing() {
    let registry = registry();
    let service = OrderService::new();
    let mut order = installment_order();
    order.purchase_type = PurchaseType::Cash;

    service.recompute(&mut order, &registry).unwrap();

    assert_eq!(order.amounts.advance_payment, Decimal::ZERO);
    assert_eq!(order.amounts.balance, dec!(10000));
    assert_eq!(order.amounts.monthly_amortization, Decimal::ZERO);
}

#[test]
fn test_no_term_selected_has_no_financing() {
    let registry = registry();
    let service = OrderService::new();
    let mut order = installment_order();
    order.term_id = None;

    service.recompute(&mut order, &registry).unwrap();

    assert!(!order.amounts.is_financed());
    assert_eq!(order.amounts.balance, dec!(10000));
}

#[test]
fn test_unknown_term_is_not_found() {
    let registry = registry();
    let service = OrderService::new();
    let mut order = installment_order();
    order.select_term("plan-missing");

    let result = service.recompute(&mut order, &registry);
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
fn test_duplicate_rule_is_rejected_at_load() {
    let duplicated = r#"
terms:
  - id: plan-12
    name: 12 Month Plan
    number_of_months: 12
    rules:
      - category_id: lawn-lots
        interest_rate_type: whole_balance
        interest_rate: 10
      - category_id: lawn-lots
        interest_rate_type: per_month
        interest_rate: 1
"#;
    let catalog = Catalog::from_yaml_str(duplicated).unwrap();
    let result = TermRegistry::from_catalog(&catalog);
    assert!(matches!(result, Err(AppError::Configuration(_))));
}

#[test]
fn test_recomputed_order_flows_into_invoice_draft() {
    let registry = registry();
    let service = OrderService::new();
    let mut order = installment_order();
    order.client_ref = Some("CUST-42".to_string());
    order.advance_mode = AdvanceMode::Spot;

    service.recompute(&mut order, &registry).unwrap();
    let draft = InvoiceBuilder::new().prepare(&order).unwrap();

    assert_eq!(draft.origin, "SO-0001");
    assert_eq!(draft.name.as_deref(), Some("CUST-42"));
    assert_eq!(draft.note.as_deref(), Some(PAID_UP_NOTE));
    assert_eq!(draft.amount_total, dec!(10000));
}
