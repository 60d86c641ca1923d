//! Renderer error types.

use inkfield_core::ConfigError;
use thiserror::Error;

/// Result type for raster operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised by the drawing surface.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Export requested while no visible stroke exists.
    #[error("Nothing to export: the canvas has no visible strokes")]
    EmptyCanvas,

    /// The backing raster could not be allocated. The previous raster is
    /// still in place and valid.
    #[error("Failed to allocate a {width}x{height} canvas buffer")]
    Allocation { width: u64, height: u64 },

    /// The surface was built from an unusable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
