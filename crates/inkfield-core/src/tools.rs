//! Tool system for the drawing surface.

use serde::{Deserialize, Serialize};

use crate::config::{CanvasConfig, SizeRange};
use crate::stroke::StrokeColor;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Freehand brush.
    #[default]
    Draw,
    /// Paints background-colored strokes over existing pixels.
    PixelErase,
    /// Tombstones whole strokes under the pointer.
    StrokeErase,
}

impl ToolKind {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Draw => "Brush",
            ToolKind::PixelErase => "Pixel eraser",
            ToolKind::StrokeErase => "Stroke eraser",
        }
    }
}

/// Width and color a recording tool paints with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ink {
    pub width: f64,
    pub color: StrokeColor,
}

/// Current brush and eraser settings, clamped to the configured ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    brush_size: f64,
    eraser_size: f64,
    brush_color: StrokeColor,
    background: StrokeColor,
    brush_range: SizeRange,
    eraser_range: SizeRange,
}

impl ToolSettings {
    /// Settings initialised from the configured defaults.
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            brush_size: config.brush.range.clamp(config.brush.size),
            eraser_size: config.eraser.range.clamp(config.eraser.size),
            brush_color: config.brush.color,
            background: config.background,
            brush_range: config.brush.range,
            eraser_range: config.eraser.range,
        }
    }

    pub fn brush_size(&self) -> f64 {
        self.brush_size
    }

    pub fn eraser_size(&self) -> f64 {
        self.eraser_size
    }

    pub fn brush_color(&self) -> StrokeColor {
        self.brush_color
    }

    /// Set the brush size, clamped to the configured range.
    pub fn set_brush_size(&mut self, size: f64) {
        self.brush_size = self.brush_range.clamp(size);
    }

    /// Set the eraser size, clamped to the configured range.
    pub fn set_eraser_size(&mut self, size: f64) {
        self.eraser_size = self.eraser_range.clamp(size);
    }

    pub fn set_brush_color(&mut self, color: StrokeColor) {
        self.brush_color = color;
    }

    /// Ink for a recording tool; `None` for the stroke eraser.
    pub fn ink(&self, tool: ToolKind) -> Option<Ink> {
        match tool {
            ToolKind::Draw => Some(Ink {
                width: self.brush_size,
                color: self.brush_color,
            }),
            ToolKind::PixelErase => Some(Ink {
                width: self.eraser_size,
                color: self.background,
            }),
            ToolKind::StrokeErase => None,
        }
    }

    /// Hit tolerance of the stroke eraser.
    pub fn erase_tolerance(&self) -> f64 {
        self.eraser_size / 2.0
    }
}
