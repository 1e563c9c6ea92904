//! Head-driven chain follower for Wyrm creatures.
//!
//! A long creature is modelled as a chain of joints. The host steers the
//! head; every other joint trails behind at a fixed rest distance, escapes
//! solid cells, and the resulting link directions are turned into yaw/pitch
//! rotations for a skeleton.
//!
//! # Architecture
//!
//! ```text
//! HeadInput ──► FollowChain::solve ──► AngleSet ──► BoneBinding ──► Transform
//!                      │
//!                      └─ ObstacleQuery (adjust)
//! ```
//!
//! # Example
//!
//! ```
//! use bevy::math::DVec3;
//! use bevy::prelude::*;
//! use wyrm_core::prelude::*;
//! use wyrm_follow::prelude::*;
//!
//! let mut app = App::new();
//! app.add_plugins((WyrmCorePlugin, WyrmFollowPlugin));
//!
//! let config = presets::uniform(4, 1.0);
//! let head = HeadInput::new(DVec3::ZERO, DVec3::X);
//! let entity = spawn_follower(app.world_mut(), &config, head).unwrap();
//! app.update();
//!
//! let follower = app.world().get::<Follower>(entity).unwrap();
//! assert!(follower.chain.is_seeded());
//! ```

pub mod angles;
pub mod bones;
pub mod chain;
pub mod obstacle;
pub mod plugin;
pub mod pose;
pub mod presets;

pub use bones::{BoneBinding, BoneRotation};
pub use chain::{FollowChain, SeedState};
pub use obstacle::{BlockPos, BlockSet, Face, NoObstacles, ObstacleQuery};
pub use plugin::WyrmFollowPlugin;
pub use pose::AngleSet;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        bones::{BoneBinding, BoneRotation},
        chain::{FollowChain, SeedState},
        obstacle::{BlockPos, BlockSet, Face, NoObstacles, ObstacleQuery, adjust},
        plugin::{
            Follower, HeadInput, ObstacleMap, SkeletonBinding, WyrmFollowPlugin, attach_skeleton,
            spawn_follower,
        },
        pose::AngleSet,
        presets,
    };
}
