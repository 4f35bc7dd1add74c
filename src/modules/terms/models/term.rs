use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// A named financing plan covering one or more product categories.
///
/// Terms are configuration data authored by an administrator and
/// referenced (never owned) by sales orders. `number_of_months` is the
/// amortization duration; a term with zero months cannot finance a
/// balance and is rejected at computation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeferredRevenueTerm {
    pub id: String,
    pub name: String,
    /// Amortization duration in months
    pub number_of_months: u32,
    /// Product categories this plan covers
    #[serde(default)]
    pub covered_category_ids: Vec<String>,
}

impl DeferredRevenueTerm {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        number_of_months: u32,
    ) -> Result<Self> {
        let id = id.into();
        let name = name.into();

        if id.trim().is_empty() {
            return Err(AppError::validation("Term id cannot be empty"));
        }

        if name.trim().is_empty() {
            return Err(AppError::validation("Term name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            number_of_months,
            covered_category_ids: Vec::new(),
        })
    }

    /// Whether this plan covers the given product category
    pub fn covers(&self, category_id: &str) -> bool {
        self.covered_category_ids.iter().any(|id| id == category_id)
    }
}
