//! Inkfield Render Library
//!
//! The growable backing raster, stroke compositing, export cropping and the
//! [`DrawingSurface`] that ties them to the stroke log.
//! Rasterization uses tiny-skia on the CPU.

mod buffer;
mod compositor;
mod error;
mod export;
mod growth;
mod surface;

pub use buffer::{CanvasBuffer, PixelRect};
pub use compositor::Compositor;
pub use error::{RenderError, RenderResult};
pub use export::{CroppedImage, ExportCropper, crop, painted_extent};
pub use growth::{GrowthManager, GrowthPolicy};
pub use surface::{DrawingSurface, TickReport};
