use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Product category referenced by orders and category rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: String,
    pub name: String,
    /// None marks a root category; orders select from root categories
    pub parent_id: Option<String>,
}

impl ProductCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Catalog product sold on installment orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub list_price: Decimal,
    /// Marks items that carry a perpetual-care obligation
    #[serde(default)]
    pub has_perpetual_care: bool,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category_id: impl Into<String>,
        list_price: Decimal,
    ) -> Result<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(AppError::validation("Product name cannot be empty"));
        }

        if list_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "List price must be non-negative, got: {}",
                list_price
            )));
        }

        Ok(Self {
            id: id.into(),
            name,
            category_id: category_id.into(),
            list_price,
            has_perpetual_care: false,
        })
    }

    pub fn with_perpetual_care(mut self) -> Self {
        self.has_perpetual_care = true;
        self
    }
}
