//! Errors raised by the analysis engine
//!
//! Only malformed input is an error. A model that cannot run on the given
//! hardware simply produces no result.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("invalid hardware input `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("invalid analyzer configuration `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl AnalysisError {
    pub(crate) fn input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Reject NaN, infinite and negative quantities, returning the reason
pub(crate) fn check_non_negative(value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("must be a finite number, got {}", value));
    }
    if value < 0.0 {
        return Err(format!("must be non-negative, got {}", value));
    }
    Ok(())
}
