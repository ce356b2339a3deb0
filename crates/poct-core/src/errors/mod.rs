//! Error handling for the analysis engine.
//! One error enum per subsystem, `thiserror` only.

pub mod analysis_error;
pub mod config_error;
pub mod error_code;
pub mod input_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use error_code::PoctErrorCode;
pub use input_error::InputError;
