//! Error types
//!
//! The simulation itself cannot fail; only loading and validating tuning data can.

use thiserror::Error;

/// Failure while loading or validating [`crate::Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}
