//! Loader errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Syntax error in field directory at line {line}: {message}")]
    MalformedRow { line: usize, message: String },

    #[error("Malformed bit range for field '{name}' at line {line}: {reason}")]
    MalformedRange {
        line: usize,
        name: String,
        reason: String,
    },

    #[error("Duplicate field '{name}' at line {line}")]
    DuplicateField { line: usize, name: String },

    #[error("Invalid catalog entry '{name}': {message}")]
    InvalidCatalogEntry { name: String, message: String },

    #[error("Catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LoaderError {
    /// Line of the field directory the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            LoaderError::MalformedRow { line, .. }
            | LoaderError::MalformedRange { line, .. }
            | LoaderError::DuplicateField { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
