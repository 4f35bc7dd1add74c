use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{InvoiceDraft, InvoiceDraftLine};
use crate::modules::orders::models::Order;

/// Prepares invoice drafts from sales orders.
///
/// The counterpart of the host's invoice-creation workflow: it collects
/// the order values an invoice needs and leaves persistence and document
/// generation to the host.
pub struct InvoiceBuilder;

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Prepare the draft invoice values for an order.
    ///
    /// Lines with a positive quantity are carried over at their
    /// discounted unit price. An order with nothing to invoice is a
    /// validation error.
    pub fn prepare(&self, order: &Order) -> Result<InvoiceDraft> {
        let lines: Vec<InvoiceDraftLine> = order
            .lines
            .iter()
            .filter(|line| line.quantity > 0)
            .map(|line| {
                let unit_price = order.currency.round(line.reduced_price());
                let subtotal =
                    order.currency.round(line.reduced_price() * Decimal::from(line.quantity));
                InvoiceDraftLine {
                    description: line.description.clone(),
                    quantity: line.quantity,
                    unit_price,
                    subtotal,
                }
            })
            .collect();

        if lines.is_empty() {
            return Err(AppError::validation("There is no invoicable line."));
        }

        let amount_total = lines.iter().map(|line| line.subtotal).sum();

        let draft = InvoiceDraft {
            id: Uuid::new_v4().to_string(),
            name: order.client_ref.clone(),
            origin: order.reference.clone(),
            currency: order.currency,
            note: order.note.clone(),
            lines,
            amount_total,
            created_at: chrono::Utc::now().naive_utc(),
        };

        info!(
            "Prepared invoice draft for order '{}' totalling {}",
            draft.origin, draft.amount_total
        );

        Ok(draft)
    }
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
