//! Stroke rasterization into the backing raster.
//!
//! Strokes are painted as anti-aliased, round-capped and round-joined
//! polylines. The incremental path draws one segment per sample; a rebuild
//! clears the raster and replays the stroke log with the same sequence of
//! operations, so both paths produce identical pixels.

use inkfield_core::{Stroke, StrokeColor, StrokeStore, ToolKind};
use kurbo::Point;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Transform};

use crate::buffer::CanvasBuffer;

/// Paints strokes into a [`CanvasBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compositor {
    background: StrokeColor,
}

impl Compositor {
    pub fn new(background: StrokeColor) -> Self {
        Self { background }
    }

    /// Color the raster is cleared to.
    pub fn background(&self) -> StrokeColor {
        self.background
    }

    /// Filled disk of diameter `width` centred on world point `center`.
    pub fn draw_dot(
        &self,
        buffer: &mut CanvasBuffer,
        center: Point,
        width: f64,
        color: StrokeColor,
    ) {
        let local = buffer.to_local(center);
        let radius = (width / 2.0) as f32;
        let Some(path) = PathBuilder::from_circle(local.x as f32, local.y as f32, radius) else {
            return;
        };
        buffer.pixmap_mut().fill_path(
            &path,
            &paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Round-capped segment between world points `a` and `b`.
    pub fn draw_segment(
        &self,
        buffer: &mut CanvasBuffer,
        a: Point,
        b: Point,
        width: f64,
        color: StrokeColor,
    ) {
        // A zero-length segment is just its cap.
        if a == b {
            self.draw_dot(buffer, a, width, color);
            return;
        }

        let from = buffer.to_local(a);
        let to = buffer.to_local(b);
        let mut builder = PathBuilder::new();
        builder.move_to(from.x as f32, from.y as f32);
        builder.line_to(to.x as f32, to.y as f32);
        let Some(path) = builder.finish() else {
            return;
        };

        let stroke = tiny_skia::Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        buffer
            .pixmap_mut()
            .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
    }

    /// Draw only what the latest sample of `stroke` added: the opening dot
    /// for a fresh stroke, otherwise its last segment.
    pub fn draw_latest(&self, buffer: &mut CanvasBuffer, stroke: &Stroke) {
        match stroke.last_segment() {
            Some((a, b)) => self.draw_segment(buffer, a, b, stroke.width(), stroke.color()),
            None => self.draw_dot(buffer, stroke.points()[0], stroke.width(), stroke.color()),
        }
    }

    /// Draw a whole stroke: the opening dot, then every segment in order.
    pub fn draw_stroke(&self, buffer: &mut CanvasBuffer, stroke: &Stroke) {
        if let Some(first) = stroke.points().first() {
            self.draw_dot(buffer, *first, stroke.width(), stroke.color());
        }
        for (a, b) in stroke.segments() {
            self.draw_segment(buffer, a, b, stroke.width(), stroke.color());
        }
    }

    /// Clear the raster and replay every visible stroke, oldest first.
    pub fn rebuild(&self, buffer: &mut CanvasBuffer, store: &StrokeStore, active_tool: ToolKind) {
        buffer.fill(self.background);
        let mut replayed = 0usize;
        let mut points = 0usize;
        for stroke in store.visible(active_tool) {
            self.draw_stroke(buffer, stroke);
            replayed += 1;
            points += stroke.len();
        }
        log::debug!(
            "rebuilt {}x{} canvas from {} strokes ({} points)",
            buffer.width(),
            buffer.height(),
            replayed,
            points
        );
    }
}

fn paint(color: StrokeColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}
