mod amounts;
mod order;
mod order_line;

pub use amounts::InstallmentAmounts;
pub use order::{AdvanceMode, Order, PurchaseType};
pub use order_line::OrderLine;
