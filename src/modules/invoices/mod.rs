pub mod models;
pub mod services;

pub use models::{InvoiceDraft, InvoiceDraftLine};
pub use services::InvoiceBuilder;
