use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Currency, Result};

/// A single line of an invoice draft, with the order-line discount
/// already applied to the unit price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDraftLine {
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// The values handed to the host's invoicing workflow for a sales order.
///
/// Journals, taxes, refunds and document layout stay with the host; this
/// is only the order-derived portion of the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub id: String,

    /// Customer reference carried from the order
    pub name: Option<String>,

    /// Reference of the originating order
    pub origin: String,

    pub currency: Currency,

    /// Terms note copied from the order
    pub note: Option<String>,

    pub lines: Vec<InvoiceDraftLine>,

    pub amount_total: Decimal,

    pub created_at: NaiveDateTime,
}

impl InvoiceDraft {
    /// Serialize the draft for the host's invoicing endpoint
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
