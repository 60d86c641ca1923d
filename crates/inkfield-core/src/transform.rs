//! Coordinate conversions between screen, world and buffer-local space.
//!
//! Screen space is what the pointer reports. World space is where strokes are
//! recorded. Buffer-local space is relative to the top-left corner of the
//! current backing raster, whose origin moves whenever the raster grows.

use kurbo::Point;

use crate::camera::Camera;

/// Screen position to world position.
pub fn to_world(screen: Point, camera: &Camera) -> Point {
    screen + camera.offset
}

/// World position to screen position. Inverse of [`to_world`].
pub fn to_screen(world: Point, camera: &Camera) -> Point {
    world - camera.offset
}

/// World position to buffer-local position.
pub fn to_canvas_local(world: Point, origin: Point) -> Point {
    world - origin.to_vec2()
}

/// Buffer-local position to world position. Inverse of [`to_canvas_local`].
pub fn from_canvas_local(local: Point, origin: Point) -> Point {
    local + origin.to_vec2()
}
