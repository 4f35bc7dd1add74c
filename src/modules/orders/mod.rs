pub mod models;
pub mod services;

pub use models::{AdvanceMode, InstallmentAmounts, Order, OrderLine, PurchaseType};
pub use services::{advance_note, InstallmentCalculator, OrderService, DEFERRED_NOTE, PAID_UP_NOTE};
