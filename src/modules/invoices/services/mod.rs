mod invoice_builder;

pub use invoice_builder::InvoiceBuilder;
