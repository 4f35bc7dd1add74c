use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::orders::models::{AdvanceMode, InstallmentAmounts, Order, PurchaseType};
use crate::modules::orders::services::InstallmentCalculator;
use crate::modules::terms::services::TermRegistry;

/// Note label auto-filled when the paid-up presentation is active
pub const PAID_UP_NOTE: &str = "Paid-up Downpayment";
/// Note label auto-filled when the deferred presentation is active
pub const DEFERRED_NOTE: &str = "Deferred Downpayment";

/// Label for the order terms note, given the active advance mode and the
/// computed amounts. A mode whose amount is zero yields no label.
pub fn advance_note(mode: AdvanceMode, amounts: &InstallmentAmounts) -> Option<&'static str> {
    match mode {
        AdvanceMode::Spot if !amounts.spot_advance.is_zero() => Some(PAID_UP_NOTE),
        AdvanceMode::Deferred if !amounts.deferred_advance.is_zero() => Some(DEFERRED_NOTE),
        _ => None,
    }
}

/// Application layer over the installment calculator.
///
/// The host's change-triggered recompute mechanism calls `recompute`
/// whenever the category, purchase type, term, lines or advance mode of
/// an order change. One pass re-derives every computed field; there is no
/// dependency graph to maintain because the computation has no internal
/// state.
pub struct OrderService {
    calculator: InstallmentCalculator,
}

impl OrderService {
    pub fn new() -> Self {
        Self {
            calculator: InstallmentCalculator::new(),
        }
    }

    /// Recompute the order's derived amounts, line subtotals and note.
    ///
    /// Idempotent: running it twice over unchanged inputs leaves the
    /// order identical.
    pub fn recompute(&self, order: &mut Order, registry: &TermRegistry) -> Result<()> {
        let amounts = match (order.purchase_type, order.term_id.as_deref()) {
            (PurchaseType::Cash, _) | (_, None) => {
                InstallmentAmounts::without_financing(order.currency.round(order.unit_price_total()))
            }
            (PurchaseType::Installment, Some(term_id)) => {
                let term = registry
                    .term(term_id)
                    .ok_or_else(|| AppError::not_found(format!("financing term '{}'", term_id)))?;
                let rule = registry.find_rule(term_id, &order.product_category_id);
                self.calculator
                    .compute(order.unit_price_total(), Some(term), rule, order.currency)?
            }
        };

        order.amounts = amounts;

        // An active presentation with a zero amount falls back to none,
        // mirroring the original flag-clearing behavior.
        if advance_note(order.advance_mode, &order.amounts).is_none() {
            order.advance_mode = AdvanceMode::None;
        }

        self.broadcast_line_subtotals(order, registry);
        self.resolve_note(order);

        order.updated_at = chrono::Utc::now().naive_utc();

        info!(
            "Recomputed order '{}': advance {}, balance {}, mode {}",
            order.reference,
            order.amounts.advance_payment,
            order.amounts.balance,
            order.advance_mode
        );

        Ok(())
    }

    /// Write the presentation subtotal onto every line. The value is
    /// broadcast uniformly, not apportioned per line.
    fn broadcast_line_subtotals(&self, order: &mut Order, registry: &TermRegistry) {
        let subtotal = match (order.advance_mode, order.term_id.as_deref()) {
            (AdvanceMode::None, _) | (_, None) => None,
            (mode, Some(term_id)) => registry.term(term_id).map(|term| {
                let rule = registry.find_rule(term_id, &order.product_category_id);
                self.calculator
                    .order_line_subtotal(&order.amounts, term, rule, mode, order.currency)
            }),
        };

        for line in &mut order.lines {
            line.installment_subtotal = subtotal;
        }
    }

    /// Fill the note with the downpayment label while a presentation is
    /// active; clear a stale label once it no longer applies.
    fn resolve_note(&self, order: &mut Order) {
        match advance_note(order.advance_mode, &order.amounts) {
            Some(label) => order.note = Some(label.to_string()),
            None => {
                if matches!(order.note.as_deref(), Some(PAID_UP_NOTE) | Some(DEFERRED_NOTE)) {
                    order.note = None;
                }
            }
        }
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}
