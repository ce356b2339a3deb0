//! Errors for records that reach the engine malformed.

use super::error_code::{self, PoctErrorCode};

/// A record violated the engine's input contract.
///
/// The parsing layer is expected to drop or reject these rows; the engine
/// fails fast instead of producing silently wrong statistics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("Contract violation in {record} #{index}: field `{field}` {message}")]
    ContractViolation {
        record: &'static str,
        index: usize,
        field: &'static str,
        message: String,
    },

    #[error("Mixed analytes in one dataset: expected `{first}`, found `{other}`")]
    MixedAnalytes { first: String, other: String },
}

impl PoctErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        error_code::INPUT_ERROR
    }
}
