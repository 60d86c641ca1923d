//! Point-to-stroke proximity testing for the stroke eraser.

use kurbo::{Point, Rect};

use crate::stroke::Stroke;

/// Distance from `point` to the segment `a`-`b`.
///
/// The projection is clamped to the segment, so points beyond either end
/// measure to the nearest endpoint. A zero-length segment measures to `a`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let ap = point - a;
    let len_sq = ab.hypot2();
    if len_sq == 0.0 {
        return ap.hypot();
    }
    let t = (ap.dot(ab) / len_sq).clamp(0.0, 1.0);
    (ap - ab * t).hypot()
}

/// Inclusive containment. `kurbo::Rect::contains` excludes the far edges,
/// which would reject queries against a zero-area box.
fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Whether `query` touches `stroke` within `tolerance`.
///
/// Erased strokes never hit. The bounding box inflated by
/// `tolerance + width` rejects far queries before any segment is examined; a
/// segment hits when it is within `tolerance + width / 2`.
pub fn hit(stroke: &Stroke, query: Point, tolerance: f64) -> bool {
    if stroke.is_erased() {
        return false;
    }

    let reach = tolerance + stroke.width();
    if !contains_inclusive(stroke.bounds().inflate(reach, reach), query) {
        return false;
    }

    let limit = tolerance + stroke.width() / 2.0;
    match stroke.points() {
        [only] => (query - *only).hypot() <= limit,
        _ => stroke
            .segments()
            .any(|(a, b)| distance_to_segment(query, a, b) <= limit),
    }
}
