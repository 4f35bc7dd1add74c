use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::CompanyDefaults;
use crate::core::{AppError, Currency, Result};
use crate::modules::orders::models::{InstallmentAmounts, OrderLine};
use crate::modules::products::models::Product;

/// Whether the order is financed or settled outright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseType {
    Installment,
    Cash,
}

impl PurchaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Installment => "installment",
            Self::Cash => "cash",
        }
    }
}

impl Default for PurchaseType {
    fn default() -> Self {
        PurchaseType::Installment
    }
}

impl std::fmt::Display for PurchaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PurchaseType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "installment" => Ok(Self::Installment),
            "cash" => Ok(Self::Cash),
            _ => Err(format!("Invalid purchase type: {}", s)),
        }
    }
}

/// How the advance payment is presented on the order.
///
/// Replaces a pair of mutually exclusive booleans; at most one
/// presentation can be active by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceMode {
    /// No advance presentation selected
    None,
    /// Advance paid up front at the discounted spot amount
    Spot,
    /// Advance collected in instalments at the discounted deferred amount
    Deferred,
}

impl AdvanceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Spot => "spot",
            Self::Deferred => "deferred",
        }
    }
}

impl Default for AdvanceMode {
    fn default() -> Self {
        AdvanceMode::None
    }
}

impl std::fmt::Display for AdvanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AdvanceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "spot" => Ok(Self::Spot),
            "deferred" => Ok(Self::Deferred),
            _ => Err(format!("Invalid advance mode: {}", s)),
        }
    }
}

/// A sales order carrying installment financing inputs and outputs.
///
/// Persistence, workflow states and invoicing belong to the host; this
/// type holds the category/term/mode selections the calculator consumes
/// and the derived amounts it produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,

    /// Order reference shown on documents
    pub reference: String,

    /// Customer reference carried onto invoices
    pub client_ref: Option<String>,

    pub currency: Currency,

    /// Selected product category; rules are matched against it
    pub product_category_id: String,

    pub purchase_type: PurchaseType,

    /// Selected financing plan, if any
    pub term_id: Option<String>,

    pub advance_mode: AdvanceMode,

    pub lines: Vec<OrderLine>,

    /// Terms-and-conditions note; the recompute fills in the
    /// downpayment label when an advance mode is active
    pub note: Option<String>,

    /// Derived financing amounts, recomputed on every input change
    #[serde(default)]
    pub amounts: InstallmentAmounts,

    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Order {
    /// Create a new order in the given category, taking the currency and
    /// default note from the company configuration.
    pub fn new(
        reference: impl Into<String>,
        product_category_id: impl Into<String>,
        defaults: &CompanyDefaults,
    ) -> Result<Self> {
        let reference = reference.into();

        if reference.trim().is_empty() {
            return Err(AppError::validation("Order reference cannot be empty"));
        }

        let now = chrono::Utc::now().naive_utc();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            reference,
            client_ref: None,
            currency: defaults.currency,
            product_category_id: product_category_id.into(),
            purchase_type: PurchaseType::default(),
            term_id: None,
            advance_mode: AdvanceMode::default(),
            lines: Vec::new(),
            note: defaults.sale_note.clone(),
            amounts: InstallmentAmounts::default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn add_line(&mut self, line: OrderLine) {
        self.lines.push(line);
        self.updated_at = chrono::Utc::now().naive_utc();
    }

    /// Select a financing plan
    pub fn select_term(&mut self, term_id: impl Into<String>) {
        self.term_id = Some(term_id.into());
        self.updated_at = chrono::Utc::now().naive_utc();
    }

    /// Raw sum of line unit prices. Quantity and discount are deliberately
    /// not applied here; the financing computation works on unit prices.
    pub fn unit_price_total(&self) -> Decimal {
        self.lines.iter().map(|line| line.unit_price).sum()
    }

    /// Whether any line references a product with a perpetual-care
    /// obligation
    pub fn has_perpetual_care_items(&self, products: &[Product]) -> bool {
        self.lines.iter().any(|line| {
            line.product_id.as_deref().is_some_and(|id| {
                products
                    .iter()
                    .any(|product| product.id == id && product.has_perpetual_care)
            })
        })
    }
}
