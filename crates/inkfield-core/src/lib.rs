//! Inkfield Core Library
//!
//! Platform-agnostic data structures and geometry for the Inkfield infinite
//! drawing surface: camera and coordinate transforms, the stroke log, stroke
//! hit testing, tools and configuration.

pub mod camera;
pub mod config;
pub mod hit;
pub mod input;
pub mod store;
pub mod stroke;
pub mod tools;
pub mod transform;

pub use camera::Camera;
pub use config::{BrushConfig, CanvasConfig, ConfigError, EraserConfig, SizeRange};
pub use input::{FrameInput, PointerState};
pub use store::StrokeStore;
pub use stroke::{Stroke, StrokeColor, StrokeId};
pub use tools::{Ink, ToolKind, ToolSettings};
