//! Mapping solved link angles onto an ordered bone list.
//!
//! Bones are 1-indexed: bone `i` is driven by link `i - 1`. A skeleton may
//! have more bones than the chain has links; those extra bones are written
//! as [`BoneRotation::NEUTRAL`] every tick so nothing stale survives a
//! change of chain.
//!
//! The skeleton root gets one constant yaw correction that reconciles the
//! solver's forward axis with the skeleton's authored forward axis.

use bevy::math::{EulerRot, Quat};

use wyrm_core::config::BindingConfig;
use wyrm_core::types::AngleConvention;

use crate::pose::AngleSet;

// ---------------------------------------------------------------------------
// BoneRotation
// ---------------------------------------------------------------------------

/// Local bone rotation in radians: `yaw` about Y, `pitch` about X, `roll`
/// about Z.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoneRotation {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl BoneRotation {
    /// Zero rotation.
    pub const NEUTRAL: Self = Self {
        yaw: 0.0,
        pitch: 0.0,
        roll: 0.0,
    };

    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            roll: 0.0,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// Yaw, then pitch, then roll.
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll)
    }
}

// ---------------------------------------------------------------------------
// BoneBinding
// ---------------------------------------------------------------------------

/// Rule for turning an [`AngleSet`] into per-bone rotations.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneBinding {
    bone_count: usize,
    convention: AngleConvention,
    root_yaw_correction: f32,
    yaw_sign: f32,
    pitch_sign: f32,
}

impl BoneBinding {
    /// Binding for `bone_count` bones: hierarchical convention, quarter-turn
    /// root correction, no axis inversion.
    pub fn new(bone_count: usize) -> Self {
        Self::from_config(&BindingConfig::default(), bone_count)
    }

    /// Build from config. `link_count` is used when the config leaves the
    /// bone count open.
    pub fn from_config(config: &BindingConfig, link_count: usize) -> Self {
        Self {
            bone_count: config.bone_count.unwrap_or(link_count),
            convention: config.convention,
            root_yaw_correction: config.root_yaw_correction,
            yaw_sign: if config.invert_yaw { -1.0 } else { 1.0 },
            pitch_sign: if config.invert_pitch { -1.0 } else { 1.0 },
        }
    }

    #[must_use]
    pub const fn with_convention(mut self, convention: AngleConvention) -> Self {
        self.convention = convention;
        self
    }

    #[must_use]
    pub const fn with_root_yaw_correction(mut self, yaw: f32) -> Self {
        self.root_yaw_correction = yaw;
        self
    }

    #[must_use]
    pub const fn with_inverted_axes(mut self, yaw: bool, pitch: bool) -> Self {
        self.yaw_sign = if yaw { -1.0 } else { 1.0 };
        self.pitch_sign = if pitch { -1.0 } else { 1.0 };
        self
    }

    pub const fn bone_count(&self) -> usize {
        self.bone_count
    }

    pub const fn convention(&self) -> AngleConvention {
        self.convention
    }

    /// Constant correction for the skeleton root.
    pub const fn root_rotation(&self) -> BoneRotation {
        BoneRotation::new(self.root_yaw_correction, 0.0)
    }

    /// Rotation for bone `bone` (1-indexed).
    ///
    /// Bone 0, bones past [`bone_count`](Self::bone_count) and bones past the
    /// last link are neutral.
    pub fn bone_rotation(&self, angles: &AngleSet, bone: usize) -> BoneRotation {
        if bone == 0 || bone > self.bone_count {
            return BoneRotation::NEUTRAL;
        }
        let link = bone - 1;
        let picked = match self.convention {
            AngleConvention::Absolute => angles.absolute(link),
            AngleConvention::Relative => angles.relative(link),
            AngleConvention::Hierarchical if link == 0 => {
                angles.absolute(0).map(|(_, pitch)| (0.0, pitch))
            }
            AngleConvention::Hierarchical => angles.relative(link),
        };
        picked.map_or(BoneRotation::NEUTRAL, |(yaw, pitch)| {
            BoneRotation::new(yaw * self.yaw_sign, pitch * self.pitch_sign)
        })
    }

    /// Fill `out` with exactly [`bone_count`](Self::bone_count) rotations.
    ///
    /// Every slot is overwritten, including neutral padding.
    pub fn map_into(&self, angles: &AngleSet, out: &mut Vec<BoneRotation>) {
        out.clear();
        out.extend((1..=self.bone_count).map(|bone| self.bone_rotation(angles, bone)));
    }

    pub fn map(&self, angles: &AngleSet) -> Vec<BoneRotation> {
        let mut out = Vec::with_capacity(self.bone_count);
        self.map_into(angles, &mut out);
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
