//! Per-tick input from the host and pointer edge tracking.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::stroke::StrokeColor;
use crate::tools::ToolKind;

/// Everything the host reports for one tick.
///
/// Size and color fields are optional; when absent the surface keeps its
/// current settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Pointer position in screen coordinates.
    pub pointer: Point,
    /// Whether the primary button is held.
    #[serde(default)]
    pub pressed: bool,
    #[serde(default)]
    pub tool: ToolKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brush_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eraser_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brush_color: Option<StrokeColor>,
    /// Camera movement since the previous tick, in world units.
    #[serde(default)]
    pub pan: Vec2,
}

impl FrameInput {
    /// Pointer held down at `pointer` with `tool`.
    pub fn press(pointer: Point, tool: ToolKind) -> Self {
        Self {
            pressed: true,
            ..Self::release(pointer, tool)
        }
    }

    /// Pointer up at `pointer` with `tool`.
    pub fn release(pointer: Point, tool: ToolKind) -> Self {
        Self {
            pointer,
            pressed: false,
            tool,
            brush_size: None,
            eraser_size: None,
            brush_color: None,
            pan: Vec2::ZERO,
        }
    }

    /// Pan-only tick.
    pub fn pan(pointer: Point, tool: ToolKind, delta: Vec2) -> Self {
        Self {
            pan: delta,
            ..Self::release(pointer, tool)
        }
    }
}

/// Pointer button edges derived from consecutive ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerState {
    pressed: bool,
    just_pressed: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the button state of a new tick.
    pub fn update(&mut self, pressed: bool) {
        self.just_pressed = pressed && !self.pressed;
        self.pressed = pressed;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Pressed this tick but not the previous one.
    pub fn just_pressed(&self) -> bool {
        self.just_pressed
    }
}
