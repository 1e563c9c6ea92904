//! Per-link angles derived from solved joint positions.
//!
//! Link `k` runs from joint `k` to joint `k + 1`. For every link the
//! [`AngleSet`] holds the absolute yaw/pitch of its direction and the wrapped
//! delta against the previous link. The first link has no predecessor and
//! gets a zero delta.

use nalgebra::Vector3;

use crate::angles::{direction_or, safe_direction, wrap_angle, yaw_pitch};

/// Absolute and relative yaw/pitch per link, in radians.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AngleSet {
    yaw_abs: Vec<f32>,
    pitch_abs: Vec<f32>,
    yaw_rel: Vec<f32>,
    pitch_rel: Vec<f32>,
}

impl AngleSet {
    /// Angles for the links between consecutive `joints`.
    ///
    /// Zero-length links take the direction of `head_forward` (or +X if that
    /// is degenerate too), so every angle is finite.
    pub fn extract(joints: &[Vector3<f64>], head_forward: &Vector3<f64>) -> Self {
        let mut set = Self::default();
        set.extract_into(joints, head_forward);
        set
    }

    /// Recompute in place, reusing the existing buffers.
    pub fn extract_into(&mut self, joints: &[Vector3<f64>], head_forward: &Vector3<f64>) {
        let links = joints.len().saturating_sub(1);
        let fallback = safe_direction(head_forward);

        self.yaw_abs.clear();
        self.pitch_abs.clear();
        for pair in joints.windows(2) {
            let d = direction_or(&(pair[1] - pair[0]), &fallback);
            let (yaw, pitch) = yaw_pitch(&d);
            self.yaw_abs.push(yaw);
            self.pitch_abs.push(pitch);
        }

        self.yaw_rel.clear();
        self.pitch_rel.clear();
        if links > 0 {
            self.yaw_rel.push(0.0);
            self.pitch_rel.push(0.0);
        }
        for k in 1..links {
            self.yaw_rel
                .push(wrap_angle(self.yaw_abs[k] - self.yaw_abs[k - 1]));
            self.pitch_rel
                .push(wrap_angle(self.pitch_abs[k] - self.pitch_abs[k - 1]));
        }
    }

    /// Number of links covered.
    pub fn link_count(&self) -> usize {
        self.yaw_abs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.yaw_abs.is_empty()
    }

    pub fn yaw_abs(&self) -> &[f32] {
        &self.yaw_abs
    }

    pub fn pitch_abs(&self) -> &[f32] {
        &self.pitch_abs
    }

    pub fn yaw_rel(&self) -> &[f32] {
        &self.yaw_rel
    }

    pub fn pitch_rel(&self) -> &[f32] {
        &self.pitch_rel
    }

    /// `(yaw, pitch)` of link `k` in world space.
    pub fn absolute(&self, k: usize) -> Option<(f32, f32)> {
        Some((*self.yaw_abs.get(k)?, *self.pitch_abs.get(k)?))
    }

    /// `(yaw, pitch)` of link `k` relative to link `k - 1`.
    pub fn relative(&self, k: usize) -> Option<(f32, f32)> {
        Some((*self.yaw_rel.get(k)?, *self.pitch_rel.get(k)?))
    }

    /// Absolute pairs sized to `bone_count`; bones past the last link are zero.
    pub fn absolute_padded(&self, bone_count: usize) -> Vec<(f32, f32)> {
        (0..bone_count)
            .map(|k| self.absolute(k).unwrap_or_default())
            .collect()
    }

    /// Relative pairs sized to `bone_count`; bones past the last link are zero.
    pub fn relative_padded(&self, bone_count: usize) -> Vec<(f32, f32)> {
        (0..bone_count)
            .map(|k| self.relative(k).unwrap_or_default())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
