//! Persisted user defaults

pub mod defaults;

pub use defaults::{Defaults, DefaultsError, DefaultsStore, DEFAULTS_FILE};
