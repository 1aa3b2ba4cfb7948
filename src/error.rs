// src/error.rs
use std::fmt;

/// Error types for the stock-math library
///
/// The scalar entry points never return these: they substitute sentinels for
/// degenerate input. Errors are reported by the `validate()` methods and the
/// `try_*` variants for callers that prefer to reject bad input up front.
#[derive(Debug, Clone, PartialEq)]
pub enum StockError {
    /// Invalid parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid configuration
    InvalidConfiguration { field: String, reason: String },

    /// Monte Carlo simulation error
    MonteCarloError { trials: i32, reason: String },
}

impl fmt::Display for StockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            StockError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            StockError::MonteCarloError { trials, reason } => {
                write!(
                    f,
                    "Monte Carlo simulation error with {} trials: {}",
                    trials, reason
                )
            }
        }
    }
}

impl std::error::Error for StockError {}

/// Result type alias for stock-math operations
pub type StockResult<T> = Result<T, StockError>;

/// Validation utilities
pub mod validation {
    use super::{StockError, StockResult};

    /// Upper bound on trial/iteration counts accepted by `validate_trials`
    pub const MAX_TRIALS: i32 = 100_000_000;

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> StockResult<()> {
        if value.is_nan() || value <= 0.0 {
            Err(StockError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> StockResult<()> {
        if value.is_nan() || value < 0.0 {
            Err(StockError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is within a closed range
    pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> StockResult<()> {
        if value.is_nan() || value < min || value > max {
            Err(StockError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: format!("must be in range [{}, {}]", min, max),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a probability in [0, 1]
    pub fn validate_probability(name: &str, p: f64) -> StockResult<()> {
        validate_range(name, p, 0.0, 1.0)
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> StockResult<()> {
        if !value.is_finite() {
            Err(StockError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a trial or iteration count
    pub fn validate_trials(field: &str, trials: i32) -> StockResult<()> {
        if trials <= 0 {
            Err(StockError::InvalidConfiguration {
                field: field.to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if trials > MAX_TRIALS {
            Err(StockError::InvalidConfiguration {
                field: field.to_string(),
                reason: format!("exceeds maximum allowed ({})", MAX_TRIALS),
            })
        } else {
            Ok(())
        }
    }
}
