pub mod models;

pub use models::{Product, ProductCategory};
