use std::collections::HashMap;

use tracing::info;

use crate::config::Catalog;
use crate::core::{AppError, Result};
use crate::modules::terms::models::{CategoryRule, DeferredRevenueTerm};

/// In-memory store for administrator-authored financing configuration.
///
/// Holds the deferred-revenue terms and the category rules that bind
/// them to product categories. The at-most-one-rule-per-(term, category)
/// invariant is enforced here, at configuration-write time, so rule
/// lookup during amount computation never has to disambiguate.
#[derive(Debug, Default)]
pub struct TermRegistry {
    terms: HashMap<String, DeferredRevenueTerm>,
    rules: HashMap<(String, String), CategoryRule>,
}

impl TermRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed catalog document
    pub fn from_catalog(catalog: &Catalog) -> Result<Self> {
        let mut registry = Self::new();

        for entry in &catalog.terms {
            registry.insert_term(DeferredRevenueTerm::new(
                entry.id.clone(),
                entry.name.clone(),
                entry.number_of_months,
            )?)?;

            for rule in &entry.rules {
                registry.insert_rule(CategoryRule {
                    term_id: entry.id.clone(),
                    category_id: rule.category_id.clone(),
                    interest_rate_type: rule.interest_rate_type,
                    interest_rate: rule.interest_rate,
                    advance_payment_type: rule.advance_payment_type,
                    advance_payment: rule.advance_payment,
                    spot_advance_discount: rule.spot_advance_discount,
                    deferred_advance_discount: rule.deferred_advance_discount,
                    deferred_advance_count: rule.deferred_advance_count,
                })?;
            }
        }

        info!(
            "Loaded financing catalog: {} terms, {} category rules",
            registry.terms.len(),
            registry.rules.len()
        );

        Ok(registry)
    }

    pub fn insert_term(&mut self, term: DeferredRevenueTerm) -> Result<()> {
        if self.terms.contains_key(&term.id) {
            return Err(AppError::configuration(format!(
                "Term '{}' is already registered",
                term.id
            )));
        }

        self.terms.insert(term.id.clone(), term);
        Ok(())
    }

    /// Register a category rule for an existing term.
    ///
    /// Rejects a second rule for the same (term, category) pair so that
    /// category + term always resolves to at most one rule.
    pub fn insert_rule(&mut self, rule: CategoryRule) -> Result<()> {
        rule.validate()?;

        let term = self.terms.get_mut(&rule.term_id).ok_or_else(|| {
            AppError::configuration(format!(
                "Rule references unknown term '{}'",
                rule.term_id
            ))
        })?;

        let key = (rule.term_id.clone(), rule.category_id.clone());
        if self.rules.contains_key(&key) {
            return Err(AppError::configuration(format!(
                "Term '{}' already has a rule for category '{}'",
                rule.term_id, rule.category_id
            )));
        }

        if !term.covers(&rule.category_id) {
            term.covered_category_ids.push(rule.category_id.clone());
        }

        self.rules.insert(key, rule);
        Ok(())
    }

    pub fn term(&self, term_id: &str) -> Option<&DeferredRevenueTerm> {
        self.terms.get(term_id)
    }

    /// The single rule binding `term_id` to `category_id`, if any.
    /// A missing rule is the documented "no advance, no interest" fallback.
    pub fn find_rule(&self, term_id: &str, category_id: &str) -> Option<&CategoryRule> {
        self.rules
            .get(&(term_id.to_string(), category_id.to_string()))
    }

    /// Terms applicable to a product category, for selection lists
    pub fn terms_for_category(&self, category_id: &str) -> Vec<&DeferredRevenueTerm> {
        let mut terms: Vec<_> = self
            .terms
            .values()
            .filter(|term| term.covers(category_id))
            .collect();
        terms.sort_by(|a, b| a.id.cmp(&b.id));
        terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
