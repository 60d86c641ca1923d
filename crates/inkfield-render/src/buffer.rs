//! Backing raster placed in world space.

use inkfield_core::StrokeColor;
use inkfield_core::transform;
use kurbo::{Point, Rect};
use tiny_skia::{Color, Pixmap};

use crate::error::{RenderError, RenderResult};

/// Integer world-space rectangle, half-open on the far edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl PixelRect {
    pub const fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Square of side `size` centred on the world origin.
    pub fn centered(size: u32) -> Self {
        let size = i64::from(size);
        let half = size / 2;
        Self::new(-half, -half, size - half, size - half)
    }

    /// Smallest integer rectangle covering `rect`.
    pub fn covering(rect: Rect) -> Self {
        let rect = rect.expand();
        Self::new(
            rect.x0 as i64,
            rect.y0 as i64,
            rect.x1 as i64,
            rect.y1 as i64,
        )
    }

    pub fn width(&self) -> u64 {
        self.x1.saturating_sub(self.x0).max(0) as u64
    }

    pub fn height(&self) -> u64 {
        self.y1.saturating_sub(self.y0).max(0) as u64
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &PixelRect) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }
}

/// The backing raster and the world position of its top-left pixel.
#[derive(Debug, Clone)]
pub struct CanvasBuffer {
    rect: PixelRect,
    pixmap: Pixmap,
}

impl CanvasBuffer {
    /// Allocate a raster covering `rect`, filled with `background`.
    pub fn allocate(rect: PixelRect, background: StrokeColor) -> RenderResult<Self> {
        let failed = || RenderError::Allocation {
            width: rect.width(),
            height: rect.height(),
        };
        let width = u32::try_from(rect.width()).map_err(|_| failed())?;
        let height = u32::try_from(rect.height()).map_err(|_| failed())?;
        let mut pixmap = Pixmap::new(width, height).ok_or_else(failed)?;
        pixmap.fill(to_skia(background));
        Ok(Self { rect, pixmap })
    }

    /// World rectangle covered by the raster.
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// World position of the top-left pixel.
    pub fn origin(&self) -> Point {
        Point::new(self.rect.x0 as f64, self.rect.y0 as f64)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// World position to raster-local position.
    pub fn to_local(&self, world: Point) -> Point {
        transform::to_canvas_local(world, self.origin())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Straight-alpha RGBA of the pixel at raster-local `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        // Pixmap::pixel only checks the flat index, so a column past the
        // right edge would read from the next row.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    /// Straight-alpha RGBA of the pixel containing world point `world`.
    pub fn pixel_at_world(&self, world: Point) -> Option<[u8; 4]> {
        let local = self.to_local(world);
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        self.pixel(local.x.floor() as u32, local.y.floor() as u32)
    }

    /// Fill the whole raster with `color`.
    pub fn fill(&mut self, color: StrokeColor) {
        self.pixmap.fill(to_skia(color));
    }
}

pub(crate) fn to_skia(color: StrokeColor) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}
