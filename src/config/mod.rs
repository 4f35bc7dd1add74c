use serde::Deserialize;
use std::env;
use std::path::Path;

use rust_decimal::Decimal;

use crate::core::{AppError, Currency, Result};
use crate::modules::terms::models::{AdvancePaymentType, InterestRateType};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub company: CompanyDefaults,
    /// Path to the financing catalog YAML document
    pub catalog_path: Option<String>,
}

/// Company-level defaults applied to new orders.
///
/// The host supplies these explicitly; nothing here is looked up from
/// ambient user or company state.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyDefaults {
    pub currency: Currency,
    /// Default terms-and-conditions note for new orders
    pub sale_note: Option<String>,
}

impl Default for CompanyDefaults {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            sale_note: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            company: CompanyDefaults {
                currency: env::var("PAYPLAN_CURRENCY")
                    .unwrap_or_else(|_| "PHP".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid PAYPLAN_CURRENCY".to_string())
                    })?,
                sale_note: env::var("PAYPLAN_SALE_NOTE").ok(),
            },
            catalog_path: env::var("PAYPLAN_CATALOG").ok(),
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.catalog_path {
            if path.trim().is_empty() {
                return Err(AppError::Configuration(
                    "Catalog path must not be empty".to_string(),
                ));
            }
        }

        if let Some(ref note) = self.company.sale_note {
            if note.trim().is_empty() {
                return Err(AppError::Configuration(
                    "Default sale note must not be blank".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Load the financing catalog named by `catalog_path`
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.catalog_path.as_deref().ok_or_else(|| {
            AppError::Configuration("PAYPLAN_CATALOG not set".to_string())
        })?;
        Catalog::from_yaml_file(path)
    }
}

/// Administrator-authored financing catalog: deferred-revenue terms with
/// their per-category rules, as stored in the YAML configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub terms: Vec<CatalogTerm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogTerm {
    pub id: String,
    pub name: String,
    pub number_of_months: u32,
    #[serde(default)]
    pub rules: Vec<CatalogRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRule {
    pub category_id: String,
    pub interest_rate_type: InterestRateType,
    pub interest_rate: Decimal,
    #[serde(default)]
    pub advance_payment_type: AdvancePaymentType,
    #[serde(default)]
    pub advance_payment: Decimal,
    #[serde(default)]
    pub spot_advance_discount: Decimal,
    #[serde(default)]
    pub deferred_advance_discount: Decimal,
    #[serde(default)]
    pub deferred_advance_count: u32,
}

impl Catalog {
    pub fn from_yaml_str(document: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(document)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let document = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&document)
    }
}
