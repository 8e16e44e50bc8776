//! Error types for curve export

use thiserror::Error;

/// Errors raised while loading, exporting or saving curve data
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportError {
    #[error("sequence '{field}' has {found} values, expected {expected} to match 'flow'")]
    Validation {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("{mechanism} is not available: {reason}")]
    UnsupportedPlatform {
        mechanism: &'static str,
        reason: String,
    },

    #[error("invalid file name '{name}'")]
    InvalidFileName { name: String },

    #[error("unexpected CSV header '{found}'")]
    UnexpectedHeader { found: String },

    #[error("malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Convenience alias for results using [`ExportError`]
pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    pub(crate) fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        ExportError::Io {
            operation: operation.into(),
            source,
        }
    }
}
