//! Unified error hierarchy for WeightRS
//!
//! The calculation modules never fail; they degrade to structured results.
//! These errors belong to the boundary: input range checks, configuration
//! and weight-history files.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all WeightRS operations
#[derive(Debug, Error)]
pub enum WeightRsError {
    /// Input outside the accepted ranges
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid analysis configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Weight history could not be read
    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

/// Input range violations
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Value outside an inclusive range
    #[error("{field} = {value} is outside the valid range {min}-{max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value that must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: String, value: f64 },
}

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Weight history reading errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// File not found at specified path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Row could not be parsed
    #[error("Invalid row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    /// Underlying CSV failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for WeightRS operations
pub type Result<T> = std::result::Result<T, WeightRsError>;

impl WeightRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WeightRsError::Validation(_) => ErrorSeverity::Warning,
            WeightRsError::History(HistoryError::FileNotFound { .. }) => ErrorSeverity::Warning,
            WeightRsError::History(_) => ErrorSeverity::Error,
            WeightRsError::Config(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            WeightRsError::Validation(ValidationError::OutOfRange {
                field, min, max, ..
            }) => {
                format!("Please enter a {} between {} and {}.", field, min, max)
            }
            WeightRsError::Config(ConfigError::InvalidValue { field, reason }) => {
                format!(
                    "Config setting {} {}. Fix the file or run `weightrs config --init`.",
                    field, reason
                )
            }
            WeightRsError::History(HistoryError::FileNotFound { path }) => {
                format!("Could not find weight history file: {}", path.display())
            }
            WeightRsError::History(HistoryError::InvalidRow { line, .. }) => {
                format!(
                    "Weight history line {} is malformed. Expected columns: date,weight_kg",
                    line
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}
