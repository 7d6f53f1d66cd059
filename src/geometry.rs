//! Vector and angle math over pose landmarks.
//!
//! Everything here is pure and deterministic. Landmarks without a depth
//! coordinate are treated as lying in the `z = 0` plane so the same code
//! serves 2-D and 3-D pose sources.

use std::ops::Sub;

use crate::types::Landmark;

/// Guards the angle denominator when a point coincides with the vertex.
pub const ANGLE_EPSILON: f64 = 1e-8;

/// 3-D vector between two landmarks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Position of a landmark, with absent depth read as 0.
    pub fn from_landmark(landmark: &Landmark) -> Self {
        Self::new(landmark.x, landmark.y, landmark.z_or_zero())
    }

    /// Vector pointing from `from` to `to`.
    pub fn between(from: &Landmark, to: &Landmark) -> Self {
        Self::from_landmark(to) - Self::from_landmark(from)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Included angle in degrees between two vectors.
///
/// The cosine is clamped to [-1, 1] before `acos`, so any finite input gives a
/// value in [0, 180]. Non-finite components propagate as NaN.
pub fn included_angle_deg(u: Vec3, v: Vec3) -> f64 {
    let cos = u.dot(v) / (u.norm() * v.norm() + ANGLE_EPSILON);
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Included angle at vertex `b` formed by `a` (proximal) and `c` (distal).
///
/// Both vectors point away from the vertex: `u = b→a`, `v = b→c`.
/// A point coinciding with the vertex yields 90° (zero cosine) rather than a
/// division fault.
pub fn angle_deg(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    included_angle_deg(Vec3::between(b, a), Vec3::between(b, c))
}

/// Signed inclination of the segment `from→to` against the image horizontal,
/// in degrees within (-180, 180]. Uses x/y only.
pub fn segment_tilt_deg(from: &Landmark, to: &Landmark) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

/// Signed inclination of the segment `base→top` away from image-vertical "up".
///
/// Image y grows downward, so "up" is `-y`. Positive values lean toward `+x`.
pub fn lean_from_vertical_deg(base: &Landmark, top: &Landmark) -> f64 {
    (top.x - base.x).atan2(base.y - top.y).to_degrees()
}

/// Midpoint of two landmarks. Depth is kept only when both carry it.
pub fn midpoint(a: &Landmark, b: &Landmark) -> Landmark {
    Landmark {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
        z: match (a.z, b.z) {
            (Some(za), Some(zb)) => Some((za + zb) / 2.0),
            _ => None,
        },
        visibility: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_collinear_opposite_is_straight() {
        let a = Landmark::new(0.0, 0.0);
        let b = Landmark::new(1.0, 1.0);
        let c = Landmark::new(2.0, 2.0);
        assert_abs_diff_eq!(angle_deg(&a, &b, &c), 180.0, epsilon = 1e-2);
    }

    #[test]
    fn test_perpendicular_is_right_angle() {
        let a = Landmark::new(0.0, 1.0);
        let b = Landmark::new(0.0, 0.0);
        let c = Landmark::new(1.0, 0.0);
        assert_abs_diff_eq!(angle_deg(&a, &b, &c), 90.0, epsilon = 1e-6);
    }

    #[test]
    fn test_same_direction_is_zero() {
        let a = Landmark::new(2.0, 0.0);
        let b = Landmark::new(0.0, 0.0);
        let c = Landmark::new(1.0, 0.0);
        assert_abs_diff_eq!(angle_deg(&a, &b, &c), 0.0, epsilon = 1e-2);
    }

    #[test]
    fn test_depth_participates_when_present() {
        let a = Landmark::with_z(0.0, 0.0, 1.0);
        let b = Landmark::with_z(0.0, 0.0, 0.0);
        let c = Landmark::with_z(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(angle_deg(&a, &b, &c), 90.0, epsilon = 1e-6);

        // Same points without depth collapse a onto the vertex.
        let flat_a = Landmark::new(0.0, 0.0);
        let angle = angle_deg(&flat_a, &Landmark::new(0.0, 0.0), &Landmark::new(1.0, 0.0));
        assert!(angle.is_finite());
    }

    #[test]
    fn test_coincident_points_stay_finite() {
        let p = Landmark::new(0.5, 0.5);
        let angle = angle_deg(&p, &p, &p);
        assert!(angle.is_finite());
        assert_abs_diff_eq!(angle, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_non_finite_input_propagates_nan() {
        let a = Landmark::new(f64::NAN, 0.0);
        let b = Landmark::new(0.0, 0.0);
        let c = Landmark::new(1.0, 0.0);
        assert!(angle_deg(&a, &b, &c).is_nan());
    }

    #[test]
    fn test_segment_tilt() {
        let left = Landmark::new(0.0, 0.0);
        let right = Landmark::new(1.0, 0.0);
        assert_abs_diff_eq!(segment_tilt_deg(&left, &right), 0.0);
        let dropped = Landmark::new(1.0, 1.0);
        assert_abs_diff_eq!(segment_tilt_deg(&left, &dropped), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lean_from_vertical() {
        let hip = Landmark::new(0.5, 0.6);
        let upright = Landmark::new(0.5, 0.3);
        assert_abs_diff_eq!(lean_from_vertical_deg(&hip, &upright), 0.0);
        let forward = Landmark::new(0.8, 0.3);
        assert_abs_diff_eq!(lean_from_vertical_deg(&hip, &forward), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_midpoint_drops_partial_depth() {
        let m = midpoint(&Landmark::with_z(0.0, 0.0, 1.0), &Landmark::new(1.0, 2.0));
        assert_eq!(m.x, 0.5);
        assert_eq!(m.y, 1.0);
        assert_eq!(m.z, None);
    }

    fn coord() -> impl Strategy<Value = f64> {
        -10.0f64..10.0
    }

    proptest! {
        #[test]
        fn prop_angle_symmetric_in_outer_points(
            ax in coord(), ay in coord(), az in coord(),
            bx in coord(), by in coord(),
            cx in coord(), cy in coord(), cz in coord(),
        ) {
            let a = Landmark::with_z(ax, ay, az);
            let b = Landmark::new(bx, by);
            let c = Landmark::with_z(cx, cy, cz);
            prop_assert_eq!(angle_deg(&a, &b, &c), angle_deg(&c, &b, &a));
        }

        #[test]
        fn prop_angle_within_range(
            ax in coord(), ay in coord(),
            bx in coord(), by in coord(),
            cx in coord(), cy in coord(),
        ) {
            let angle = angle_deg(
                &Landmark::new(ax, ay),
                &Landmark::new(bx, by),
                &Landmark::new(cx, cy),
            );
            prop_assert!((0.0..=180.0).contains(&angle));
        }
    }
}
