//! Renderer errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown output format: {0} (expected cpp, rust, json or bin)")]
    UnknownFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary encoding error: {0}")]
    Binary(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
