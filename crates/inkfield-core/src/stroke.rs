//! Freehand stroke records.

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tools::ToolKind;

/// Unique identifier for a stroke.
pub type StrokeId = Uuid;

/// RGBA8 stroke color (straight alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl StrokeColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Components as an `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for StrokeColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<StrokeColor> for Color {
    fn from(color: StrokeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// One continuous freehand mark in world space.
///
/// Points are only ever appended, and the bounding box grows with them. A
/// stroke is never removed from the log once committed; erasing it sets the
/// `erased` tombstone so replay order stays intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: StrokeId,
    points: Vec<Point>,
    width: f64,
    color: StrokeColor,
    tool: ToolKind,
    bounds: Rect,
    pub(crate) erased: bool,
}

impl Stroke {
    /// Start a stroke at `first`. Negative widths are treated as zero.
    pub fn new(first: Point, width: f64, color: StrokeColor, tool: ToolKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![first],
            width: width.max(0.0),
            color,
            tool,
            bounds: Rect::from_points(first, first),
            erased: false,
        }
    }

    /// Build a stroke from a full point list. Returns `None` for an empty list.
    pub fn from_points(
        points: impl IntoIterator<Item = Point>,
        width: f64,
        color: StrokeColor,
        tool: ToolKind,
    ) -> Option<Self> {
        let mut points = points.into_iter();
        let mut stroke = Self::new(points.next()?, width, color, tool);
        for point in points {
            stroke.push_point(point);
        }
        Some(stroke)
    }

    /// Append a point and grow the bounding box to include it.
    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
        self.bounds = self.bounds.union_pt(point);
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn color(&self) -> StrokeColor {
        self.color
    }

    /// Tool that produced this stroke.
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Axis-aligned world bounds of the points, not inflated by the width.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_erased(&self) -> bool {
        self.erased
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a stroke holds at least its first point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent segment, if the stroke has two or more points.
    pub fn last_segment(&self) -> Option<(Point, Point)> {
        match self.points.as_slice() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Consecutive point pairs in draw order.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Shift every point by `offset`.
    pub fn translate(&mut self, offset: Vec2) {
        for point in &mut self.points {
            *point += offset;
        }
        self.bounds = self.bounds + offset;
    }

    /// Bounds grown by half the stroke width, rounded up to whole pixels.
    pub fn painted_bounds(&self) -> Rect {
        let half = (self.width / 2.0).ceil();
        self.bounds.inflate(half, half)
    }
}
