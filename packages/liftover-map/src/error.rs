//! Error types for liftover-map
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

/// Result type alias for liftover operations
pub type Result<T> = std::result::Result<T, LiftoverError>;

/// Main error type for liftover-map operations
#[derive(Debug, Error)]
pub enum LiftoverError {
    /// Requested source model is absent from the Models section
    #[error("source model '{model}' not found in mapping file")]
    MissingSourceModel { model: String },

    /// A table row failed load-time validation
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// A chain walk revisited a destination triple
    #[error("cycle detected in mapping edges at {model}:{node}.{prop}")]
    CycleDetected {
        model: String,
        node: String,
        prop: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TSV read/write error
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LiftoverError {
    /// Create a missing-source-model error
    pub fn missing_source_model(model: impl Into<String>) -> Self {
        LiftoverError::MissingSourceModel {
            model: model.into(),
        }
    }

    /// Create a malformed-row error
    pub fn malformed_row(line: u64, reason: impl Into<String>) -> Self {
        LiftoverError::MalformedRow {
            line,
            reason: reason.into(),
        }
    }
}
