//! Top-level analysis errors.

use super::error_code::{self, PoctErrorCode};
use super::{ConfigError, InputError};

/// Errors returned by the orchestrator.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Analysis cancelled")]
    Cancelled,
}

impl PoctErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Input(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
