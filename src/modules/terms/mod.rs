pub mod models;
pub mod services;

pub use models::{AdvancePaymentType, CategoryRule, DeferredRevenueTerm, InterestRateType};
pub use services::TermRegistry;
