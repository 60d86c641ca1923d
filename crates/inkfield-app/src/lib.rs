//! Inkfield host shell.
//!
//! Replays recorded input sessions through a [`DrawingSurface`] and saves the
//! cropped drawing as PNG.
//!
//! [`DrawingSurface`]: inkfield_render::DrawingSurface

mod error;
mod export;
mod session;

pub use error::{AppError, AppResult};
pub use export::{encode_png, save_png, with_png_extension};
pub use session::{ReplaySummary, Session, SessionEvent};
