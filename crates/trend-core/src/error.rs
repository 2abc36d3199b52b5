//! Error types for trend segmentation
//!
//! Provides a unified error type for all trend-stats crates.

use thiserror::Error;

/// Core error type for trend segmentation operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed argument supplied by the caller (window sizes, thresholds, ceilings)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// An internal invariant did not hold
    #[error("Computation error: {0}")]
    Computation(String),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parameter (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (for configuration files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for an even window length
    pub fn even_window(size: usize) -> Self {
        Self::InvalidArgument(format!("Window size {size} must be odd"))
    }

    /// Create an error for a window shorter than three taps
    pub fn window_too_small(size: usize) -> Self {
        Self::InvalidArgument(format!("Window size {size} must be at least 3"))
    }

    /// Create an error for a negative or non-finite threshold
    pub fn negative_threshold(name: &str, value: f64) -> Self {
        Self::InvalidArgument(format!(
            "Threshold {name} must be finite and non-negative, got {value}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidArgument(format!("{context} contains NaN or infinite values"))
    }
}
