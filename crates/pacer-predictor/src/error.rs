//! Predictor error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an artifact or scoring a row
#[derive(Error, Debug)]
pub enum PredictorError {
    /// Artifact file could not be read
    #[error("Failed to read artifact {}: {source}", .path.display())]
    Io {
        /// Artifact location
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Artifact content is not a valid pipeline
    #[error("Invalid artifact: {0}")]
    Artifact(String),

    /// Row lacks a column the pipeline needs
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Column holds the wrong kind of value
    #[error("Invalid value in column '{column}': expected {expected}")]
    InvalidCell {
        /// Column name
        column: String,
        /// What the pipeline expected
        expected: &'static str,
    },

    /// Categorical value the pipeline was not trained on
    #[error("Unknown level '{level}' in column '{column}'")]
    UnknownLevel {
        /// Column name
        column: String,
        /// Offending value
        level: String,
    },
}

impl From<serde_json::Error> for PredictorError {
    fn from(e: serde_json::Error) -> Self {
        PredictorError::Artifact(e.to_string())
    }
}
