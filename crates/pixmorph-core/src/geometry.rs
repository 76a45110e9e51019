//! Point transforms about an arbitrary center.
//!
//! Every geometric filter is built from these two primitives: the resampler
//! asks one of them where a destination pixel should read from.

/// A real-valued 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rotate `(x, y)` about `(center_x, center_y)` by `angle` radians.
///
/// Uses the standard matrix `[cos, -sin; sin, cos]`. In image coordinates
/// (`y` down) a positive angle turns the point clockwise on screen.
#[inline]
pub fn rotate_point(center_x: f64, center_y: f64, x: f64, y: f64, angle: f64) -> Point2 {
    let (sin, cos) = angle.sin_cos();
    let dx = x - center_x;
    let dy = y - center_y;
    Point2::new(dx * cos - dy * sin + center_x, dx * sin + dy * cos + center_y)
}

/// Scale `(x, y)` about `(center_x, center_y)` by `factor`.
///
/// `factor = 1` is the identity, `0` collapses onto the center and negative
/// factors reflect through it.
#[inline]
pub fn scale_point(center_x: f64, center_y: f64, x: f64, y: f64, factor: f64) -> Point2 {
    Point2::new(
        (x - center_x) * factor + center_x,
        (y - center_y) * factor + center_y,
    )
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point2, b: Point2) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Angle of the vector `from -> to` in radians, in `(-PI, PI]`.
#[inline]
pub fn angle_to(from: Point2, to: Point2) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(p: Point2, x: f64, y: f64) {
        assert!(
            (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9,
            "expected ({x}, {y}), got ({}, {})",
            p.x,
            p.y
        );
    }

    #[test]
    fn test_rotate_zero_is_exact_identity() {
        let p = rotate_point(5.0, 7.0, 12.0, -3.0, 0.0);
        assert_eq!(p, Point2::new(12.0, -3.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        // (1, 0) about the origin goes to (0, 1): clockwise on screen
        assert_close(rotate_point(0.0, 0.0, 1.0, 0.0, FRAC_PI_2), 0.0, 1.0);
    }

    #[test]
    fn test_rotate_about_center() {
        assert_close(rotate_point(10.0, 10.0, 12.0, 10.0, PI), 8.0, 10.0);
    }

    #[test]
    fn test_rotate_center_is_fixed() {
        assert_close(rotate_point(3.0, 4.0, 3.0, 4.0, 1.234), 3.0, 4.0);
    }

    #[test]
    fn test_scale_identity() {
        let p = scale_point(5.0, 5.0, 9.5, -2.25, 1.0);
        assert_eq!(p, Point2::new(9.5, -2.25));
    }

    #[test]
    fn test_scale_zero_collapses() {
        assert_eq!(scale_point(5.0, 6.0, 100.0, -40.0, 0.0), Point2::new(5.0, 6.0));
    }

    #[test]
    fn test_scale_negative_reflects() {
        assert_eq!(scale_point(5.0, 5.0, 7.0, 2.0, -1.0), Point2::new(3.0, 8.0));
    }

    #[test]
    fn test_scale_doubles_offset() {
        assert_eq!(scale_point(1.0, 1.0, 3.0, 4.0, 2.0), Point2::new(5.0, 7.0));
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_angle_to() {
        let origin = Point2::default();
        assert!((angle_to(origin, Point2::new(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((angle_to(origin, Point2::new(-1.0, 0.0)) - PI).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coord() -> impl Strategy<Value = f64> {
        -10_000.0f64..10_000.0
    }

    proptest! {
        /// Property: scaling by 1 returns the input point exactly.
        #[test]
        fn prop_scale_by_one_is_identity(cx in coord(), cy in coord(), x in coord(), y in coord()) {
            let p = scale_point(cx, cy, x, y, 1.0);
            prop_assert!((p.x - x).abs() <= 1e-9 * x.abs().max(1.0));
            prop_assert!((p.y - y).abs() <= 1e-9 * y.abs().max(1.0));
        }

        /// Property: rotating by 0 lands on the same integer pixel.
        #[test]
        fn prop_rotate_by_zero_is_identity(cx in coord(), cy in coord(), x in coord(), y in coord()) {
            let p = rotate_point(cx, cy, x, y, 0.0);
            prop_assert!((p.x - x).abs() <= 1e-9 * x.abs().max(1.0));
            prop_assert!((p.y - y).abs() <= 1e-9 * y.abs().max(1.0));
        }

        /// Property: rotation preserves distance to the center.
        #[test]
        fn prop_rotation_preserves_radius(
            cx in coord(), cy in coord(), x in coord(), y in coord(),
            angle in -10.0f64..10.0,
        ) {
            let center = Point2::new(cx, cy);
            let before = distance(center, Point2::new(x, y));
            let after = distance(center, rotate_point(cx, cy, x, y, angle));
            prop_assert!((before - after).abs() <= 1e-6 * before.max(1.0));
        }
    }
}
