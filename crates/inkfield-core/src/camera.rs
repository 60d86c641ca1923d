//! Camera module for panning the viewport over the unbounded world.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::transform;

/// Camera holds the view offset for the canvas.
///
/// The world has no bounds, so the offset is never clamped. There is no zoom:
/// the backing raster is stored at 1:1 device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World position shown at the top-left corner of the screen.
    pub offset: Vec2,
}

impl Camera {
    /// Create a new camera looking at the world origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with the given offset.
    pub fn with_offset(offset: Vec2) -> Self {
        Self { offset }
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        transform::to_world(screen_point, self)
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        transform::to_screen(world_point, self)
    }

    /// Pan the camera by a delta in world units.
    ///
    /// A positive delta moves the view right/down, so content appears to move
    /// left/up on screen.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Screen position at which a raster with the given world origin must be
    /// composited.
    pub fn raster_offset(&self, buffer_origin: Point) -> Point {
        self.world_to_screen(buffer_origin)
    }
}
