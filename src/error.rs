//! Error types for daubechies-sweep.
//!
//! A single error enum covers every failure the experiment can hit: bad
//! configuration, a wavelet construction that does not converge, an
//! interpolator fed inconsistent samples, and output I/O.

use thiserror::Error;

/// The main error type for daubechies-sweep operations.
#[derive(Error, Debug)]
pub enum SweepError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Filter or grid construction errors
    #[error("Wavelet error: {message}")]
    Wavelet { message: String },

    /// Interpolator construction errors
    #[error("Interpolation error: {message}")]
    Interpolation { message: String },

    /// Linear solves and root finding that failed numerically
    #[error("Numerical error: {message}")]
    Numerical { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with SweepError
pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    /// Shorthand for an [`SweepError::InvalidParameter`].
    pub fn invalid(param: &str, message: impl Into<String>) -> Self {
        SweepError::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }
}
