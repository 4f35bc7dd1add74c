mod category_rule;
mod term;

pub use category_rule::{AdvancePaymentType, CategoryRule, InterestRateType};
pub use term::DeferredRevenueTerm;
