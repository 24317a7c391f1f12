//! Error types for loading name data.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or looking up name data.
///
/// None of these are fatal: every one of them sends the user back to the
/// upload step.
#[derive(Error, Debug)]
pub enum LoadError {
    /// I/O error while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The text is not valid JSON
    #[error("Malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The JSON is valid but does not have the expected shape
    #[error("Invalid name data: {message}")]
    SchemaViolation {
        /// Description of the violation
        message: String,
    },

    /// No data has been loaded
    #[error("No name data found")]
    EmptyOrMissingData,

    /// The dropped or selected file is not a JSON file
    #[error("Please upload a JSON file (got {path:?})")]
    UnsupportedFileType {
        /// Path of the rejected file
        path: PathBuf,
    },
}

impl LoadError {
    /// Create a schema violation error with a message.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            message: message.into(),
        }
    }

    /// Whether this error came from the file's content rather than from
    /// reading it or from missing data.
    pub fn is_content_error(&self) -> bool {
        matches!(self, Self::MalformedJson(_) | Self::SchemaViolation { .. })
    }
}
