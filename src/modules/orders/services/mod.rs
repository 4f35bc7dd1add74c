mod installment_calculator;
mod order_service;

pub use installment_calculator::InstallmentCalculator;
pub use order_service::{advance_note, OrderService, DEFERRED_NOTE, PAID_UP_NOTE};
