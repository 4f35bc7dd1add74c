use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::products::models::Product;

/// A single product or service line on a sales order.
///
/// The financing computation sums raw unit prices across lines; quantity
/// and discount still live here because the invoice hook applies them to
/// draft-line prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: Option<String>,

    /// Description of the product or service
    pub description: String,

    /// Quantity of items
    pub quantity: i32,

    /// Price per unit
    pub unit_price: Decimal,

    /// Line discount percentage
    #[serde(default)]
    pub discount: Decimal,

    /// Presentation subtotal broadcast by the recompute; the same value
    /// lands on every line of the order
    #[serde(skip_deserializing)]
    pub installment_subtotal: Option<Decimal>,
}

impl OrderLine {
    /// Create a new order line with validation
    pub fn new(
        description: impl Into<String>,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<Self> {
        let description = description.into();

        if description.trim().is_empty() {
            return Err(AppError::validation("Order line description cannot be empty"));
        }

        if quantity <= 0 {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }

        if unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price must be non-negative, got: {}",
                unit_price
            )));
        }

        Ok(Self {
            product_id: None,
            description,
            quantity,
            unit_price,
            discount: Decimal::ZERO,
            installment_subtotal: None,
        })
    }

    /// Create a line from a catalog product at its list price
    pub fn from_product(product: &Product, quantity: i32) -> Result<Self> {
        let mut line = Self::new(product.name.clone(), quantity, product.list_price)?;
        line.product_id = Some(product.id.clone());
        Ok(line)
    }

    /// Set the line discount percentage
    pub fn with_discount(mut self, percent: Decimal) -> Result<Self> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "Discount must be between 0 and 100, got: {}",
                percent
            )));
        }
        self.discount = percent;
        Ok(self)
    }

    /// Unit price after the line discount
    pub fn reduced_price(&self) -> Decimal {
        self.unit_price * (Decimal::ONE - self.discount / Decimal::ONE_HUNDRED)
    }
}
