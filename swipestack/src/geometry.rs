// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry and velocity helpers shared by cards and the stack.

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Rotation encoded in a transform, in radians.
///
/// Reads the first column of the linear part, so scale does not affect the result.
pub fn angle_of(transform: Affine) -> f64 {
    let [a, b, ..] = transform.as_coeffs();
    Vec2::new(a, b).atan2()
}

/// Scalar speed of a velocity.
pub fn speed(velocity: Vec2) -> f64 {
    velocity.hypot()
}

/// Axis-aligned bounds of a `size` rectangle centred on `center` and rotated by `angle`.
pub fn rotated_bounds(center: Point, size: Size, angle: f64) -> Rect {
    let local = Rect::from_center_size(Point::ZERO, size);
    (Affine::translate(center.to_vec2()) * Affine::rotate(angle)).transform_rect_bbox(local)
}

/// True if the rectangles overlap with positive area.
///
/// Touching edges do not count, so a card resting exactly on the viewport edge
/// has left it.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// True if `center` is within `tolerance` of `target`, inclusive.
pub fn is_settled(center: Point, target: Point, tolerance: f64) -> bool {
    distance(center, target) <= tolerance
}
