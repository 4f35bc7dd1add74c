mod schedule_builder;

pub use schedule_builder::ScheduleBuilder;
