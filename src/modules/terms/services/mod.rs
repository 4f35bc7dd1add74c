mod term_registry;

pub use term_registry::TermRegistry;
