//! 2D vector helpers.
//!
//! Thin, pure functions over [`glam::Vec2`]. Everything here takes its inputs
//! by value and returns a new vector, so callers never observe mutation and
//! results are reproducible across runs.
//!
//! ```ignore
//! use verlet_sandbox::vector;
//!
//! let to_target = vector::subtract(target, position);
//! let push = vector::scale(vector::normalize(to_target), 40.0);
//! ```

use glam::Vec2;

/// The vector type used throughout the sandbox.
pub type Vector2D = Vec2;

/// Component-wise sum.
#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

/// Component-wise difference `a - b`.
#[inline]
pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

/// Multiply both components by `s`.
#[inline]
pub fn scale(v: Vec2, s: f32) -> Vec2 {
    v * s
}

/// Divide both components by `s`.
///
/// Dividing by zero is a caller bug. Debug builds panic on it; release
/// builds return [`Vec2::ZERO`] instead of producing infinities.
#[inline]
pub fn divide(v: Vec2, s: f32) -> Vec2 {
    debug_assert!(s != 0.0, "vector::divide called with a zero divisor");
    if s == 0.0 {
        return Vec2::ZERO;
    }
    v / s
}

/// Euclidean length.
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Unit vector in the direction of `v`, or zero when `v` has no length.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let mag = magnitude(v);
    if mag > 0.0 {
        v / mag
    } else {
        Vec2::ZERO
    }
}

/// Distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    magnitude(a - b)
}

/// Clamp the length of `v` to at most `max`, keeping its direction.
#[inline]
pub fn limit(v: Vec2, max: f32) -> Vec2 {
    if magnitude(v) > max {
        normalize(v) * max
    } else {
        v
    }
}

/// Linear interpolation from `a` (t = 0) to `b` (t = 1).
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Dot product.
#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.x * b.x + a.y * b.y
}

/// Rotate `v` counter-clockwise by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = normalize(Vec2::new(3.0, 4.0));
        assert!((magnitude(n) - 1.0).abs() < 1e-6);
        assert!(approx(n, Vec2::new(0.6, 0.8)));
    }

    #[test]
    fn test_limit_preserves_direction() {
        let v = limit(Vec2::new(30.0, 40.0), 5.0);
        assert!(approx(v, Vec2::new(3.0, 4.0)));

        // Shorter vectors pass through untouched
        let short = Vec2::new(1.0, 1.0);
        assert_eq!(limit(short, 5.0), short);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let r = rotate(Vec2::X, FRAC_PI_2);
        assert!(approx(r, Vec2::Y));
    }

    #[test]
    fn test_lerp_and_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, -4.0);
        assert!(approx(lerp(a, b, 0.5), Vec2::new(5.0, -2.0)));
        assert!((distance(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0)) - 5.0).abs() < 1e-6);
        assert_eq!(dot(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)), 11.0);
    }

    #[test]
    fn test_divide() {
        assert!(approx(divide(Vec2::new(4.0, 8.0), 2.0), Vec2::new(2.0, 4.0)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "zero divisor")]
    fn test_divide_by_zero_panics_in_debug() {
        let _ = divide(Vec2::ONE, 0.0);
    }
}
