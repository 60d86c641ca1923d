//! Application error types.

use std::path::PathBuf;

use inkfield_core::ConfigError;
use inkfield_render::RenderError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Nothing has been drawn, so there is nothing to save.
    #[error("Nothing to save: the canvas is empty")]
    EmptyCanvas,

    #[error("Render error: {0}")]
    Render(RenderError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read session {path}: {source}")]
    SessionRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed session: {0}")]
    SessionParse(#[from] serde_json::Error),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::EmptyCanvas => Self::EmptyCanvas,
            RenderError::Config(err) => Self::Config(err),
            other => Self::Render(other),
        }
    }
}
