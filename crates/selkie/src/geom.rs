//! Geometry primitives shared by the placement and refinement stages.
//!
//! Angles are radians, measured counterclockwise from the +x axis. The chart
//! origin sits at the plot center for the radial variant and at the horizontal
//! center of the plot for the opposed variant.

use serde::Serialize;

use crate::rng::RandomSource;

pub const FULL_CIRCLE: f64 = std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Axis-aligned rectangle addressed by its center point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// True when the center distance is at most the sum of the radii; touching
/// circles count as a collision.
pub fn circles_collide(a: &Circle, b: &Circle) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let reach = a.r + b.r;
    dx * dx + dy * dy <= reach * reach
}

/// True when the rectangles overlap in both axes. Rectangles that merely share
/// an edge do not collide.
pub fn rects_collide(a: &Rect, b: &Rect) -> bool {
    let a_left = a.x - a.width / 2.0;
    let a_right = a.x + a.width / 2.0;
    let a_top = a.y - a.height / 2.0;
    let a_bottom = a.y + a.height / 2.0;

    let b_left = b.x - b.width / 2.0;
    let b_right = b.x + b.width / 2.0;
    let b_top = b.y - b.height / 2.0;
    let b_bottom = b.y + b.height / 2.0;

    !(b_left >= a_right || b_right <= a_left || b_top >= a_bottom || b_bottom <= a_top)
}

pub fn point_on_circle(radius: f64, angle: f64) -> Point {
    Point {
        x: angle.cos() * radius,
        y: angle.sin() * radius,
    }
}

/// Uniformly random point on a circle, restricted to `range` when given
/// (angles in radians; the range may extend past `2π`).
pub fn random_point_on_circle(
    rng: &mut dyn RandomSource,
    radius: f64,
    range: Option<(f64, f64)>,
) -> Point {
    let (start, end) = range.unwrap_or((0.0, FULL_CIRCLE));
    point_on_circle(radius, rng.next_in_range(start, end))
}

/// Normalizes an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(FULL_CIRCLE)
}
