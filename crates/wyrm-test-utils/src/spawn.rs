//! Entity spawn helpers for tests.

use bevy::math::DVec3;
use bevy::prelude::*;
use wyrm_core::config::FollowerConfig;
use wyrm_follow::plugin::{HeadInput, attach_skeleton, spawn_follower};
use wyrm_follow::presets;

/// Spawn a uniform follower with `links` unit links, head at the origin
/// facing +X.
///
/// # Panics
///
/// Never for `links > 0`; a zero-link config is rejected and panics.
pub fn spawn_test_follower(world: &mut World, links: usize) -> Entity {
    let head = HeadInput::new(DVec3::ZERO, DVec3::X);
    spawn_follower(world, &presets::uniform(links, 1.0), head).unwrap()
}

/// Spawn a follower from `config` with a bound skeleton.
///
/// Returns the follower entity and its bones in order.
pub fn spawn_bound_follower(
    world: &mut World,
    config: &FollowerConfig,
    head: HeadInput,
) -> (Entity, Vec<Entity>) {
    let entity = spawn_follower(world, config, head).unwrap();
    let bones = attach_skeleton(world, entity, config);
    (entity, bones)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
