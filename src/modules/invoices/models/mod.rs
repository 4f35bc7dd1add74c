mod invoice_draft;

pub use invoice_draft::{InvoiceDraft, InvoiceDraftLine};
