//! Error types for the aim throughput pipeline
//!
//! Numeric edge cases (zero distance, non-positive movement time, saturated
//! probabilities) are never errors; they resolve to explicit values inside the
//! probability model. The variants here cover the faults that indicate
//! malformed inputs or configuration.

use thiserror::Error;

/// Errors raised by the root finder, the configuration layer and the calculator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AimError {
    #[error("Invalid bracket [{lower}, {upper}]: f({lower})={f_lower}, f({upper})={f_upper}")]
    InvalidBracket {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },

    #[error("No sign change found after {expansions} expansions (last bracket [{lower}, {upper}])")]
    BracketNotFound {
        lower: f64,
        upper: f64,
        expansions: usize,
    },

    #[error("Root finder did not converge within {iterations} iterations (last estimate {estimate})")]
    NoConvergence { iterations: usize, estimate: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AimError>;
