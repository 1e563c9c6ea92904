//! Ready-made follower configurations.

use wyrm_core::config::{BindingConfig, FollowerConfig};
use wyrm_core::types::{AngleConvention, FollowMode};

/// Eighteen-segment sea serpent.
///
/// Segment spacing is authored in sixteenths of a block on the model, the
/// skeleton has one more bone (`seg18`) than the chain has links and is
/// posed hierarchically.
pub mod leviathan {
    use super::{AngleConvention, BindingConfig, FollowMode, FollowerConfig};

    /// Link rest lengths in model units (1/16 block), head first.
    pub const REST_SIXTEENTHS: [f64; 17] = [
        17.0, 67.0, 32.0, 64.0, 79.0, 86.0, 71.0, 78.0, 78.0, 76.0, 72.0, 74.0, 65.0, 76.0, 76.0,
        76.0, 76.0,
    ];

    pub const TIP_DAMPING: f64 = 0.14;
    pub const ITERATIONS: u32 = 2;

    /// Bones `seg1..=seg18`.
    pub const BONE_COUNT: usize = REST_SIXTEENTHS.len() + 1;

    /// Rest lengths in blocks.
    pub fn rest_lengths() -> Vec<f64> {
        REST_SIXTEENTHS.iter().map(|s| s / 16.0).collect()
    }

    /// Bone name for 1-indexed bone `i`.
    pub fn bone_name(i: usize) -> String {
        format!("seg{i}")
    }

    pub fn config() -> FollowerConfig {
        FollowerConfig {
            name: "leviathan".into(),
            rest_lengths: rest_lengths(),
            tip_damping: TIP_DAMPING,
            avoid_obstacles: true,
            iterations: ITERATIONS,
            mode: FollowMode::Relaxed,
            binding: BindingConfig {
                bone_count: Some(BONE_COUNT),
                convention: AngleConvention::Hierarchical,
                ..BindingConfig::default()
            },
        }
    }
}

/// Short uniform chain, handy for tests and demos.
pub fn uniform(links: usize, rest_length: f64) -> FollowerConfig {
    FollowerConfig {
        name: format!("uniform_{links}"),
        rest_lengths: vec![rest_length; links],
        ..FollowerConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
