//! Direction and angle helpers shared by the solver and the extractor.
//!
//! Yaw is measured in the horizontal XZ plane from +X towards +Z; pitch is
//! the elevation above that plane. Both are returned as `f32` radians since
//! they feed bone rotations, while directions stay in `f64`.

use std::f32::consts::{PI, TAU};

use nalgebra::Vector3;

/// Squared length below which a vector is treated as having no direction.
pub const DEGENERATE_EPS: f64 = 1e-12;

/// Direction used when nothing better is available.
pub fn default_forward() -> Vector3<f64> {
    Vector3::x()
}

/// Normalise `v`, or return +X when `v` is (near) zero.
pub fn safe_direction(v: &Vector3<f64>) -> Vector3<f64> {
    direction_or(v, &default_forward())
}

/// Normalise `v`, or return `fallback` unchanged when `v` is (near) zero.
///
/// `fallback` is expected to already be a unit vector.
pub fn direction_or(v: &Vector3<f64>, fallback: &Vector3<f64>) -> Vector3<f64> {
    let l2 = v.norm_squared();
    if l2 < DEGENERATE_EPS || !l2.is_finite() {
        *fallback
    } else {
        v * (1.0 / l2.sqrt())
    }
}

/// Horizontal angle of `d`: `atan2(z, x)`.
#[allow(clippy::cast_possible_truncation)]
pub fn yaw_of(d: &Vector3<f64>) -> f32 {
    d.z.atan2(d.x) as f32
}

/// Elevation of `d` above the XZ plane.
#[allow(clippy::cast_possible_truncation)]
pub fn pitch_of(d: &Vector3<f64>) -> f32 {
    let horizontal = d.x.hypot(d.z);
    d.y.atan2(horizontal) as f32
}

/// `(yaw, pitch)` of `d`.
pub fn yaw_pitch(d: &Vector3<f64>) -> (f32, f32) {
    (yaw_of(d), pitch_of(d))
}

/// Wrap an angle into `(-π, π]`.
///
/// Values already in range are returned bit-for-bit, which makes the
/// function idempotent. Non-finite input maps to `0.0`.
pub fn wrap_angle(a: f32) -> f32 {
    if !a.is_finite() {
        return 0.0;
    }
    if a > -PI && a <= PI {
        return a;
    }
    let r = (a + PI).rem_euclid(TAU) - PI;
    // -π and a rounded-up 2π remainder both land on the +π end.
    if r <= -PI || r > PI {
        PI
    } else {
        r
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
