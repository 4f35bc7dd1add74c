pub mod models;
pub mod services;

pub use models::{ScheduleEntry, ScheduleEntryKind};
pub use services::ScheduleBuilder;
