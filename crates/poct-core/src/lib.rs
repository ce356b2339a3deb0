//! # poct-core
//!
//! Records, errors, configuration, tracing, and constants shared by the
//! POCT analysis engine. Contains no detection or statistics logic.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::PoctConfig;
pub use errors::{AnalysisError, ConfigError, InputError};
pub use types::{Event, Reading};
