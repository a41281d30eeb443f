//! 2D vector helpers
//!
//! Arithmetic (negate, add, subtract, scale, dot, length, squared length)
//! comes straight from `glam::Vec2`. The helpers here cover the few shapes
//! the simulation needs on top of that.

use glam::Vec2;

/// Unit vector in the direction of `v`.
///
/// Unlike `Vec2::normalize_or_zero`, a zero-length input is not guarded:
/// the result is NaN. Callers must ensure `v` is non-zero.
#[inline]
pub fn unit(v: Vec2) -> Vec2 {
    v * (1.0 / v.length())
}

/// Point halfway between `a` and `b`
#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
