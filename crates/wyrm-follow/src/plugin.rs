//! Bevy ECS integration for the follow chain.
//!
//! Provides [`WyrmFollowPlugin`] which solves every [`Follower`] against its
//! [`HeadInput`] once per tick and writes bone rotations for any attached
//! [`SkeletonBinding`].
//!
//! # Usage
//!
//! 1. Add [`WyrmCorePlugin`](wyrm_core::WyrmCorePlugin) and [`WyrmFollowPlugin`].
//! 2. Spawn a follower with [`spawn_follower`].
//! 3. Optionally attach bones with [`attach_skeleton`].
//! 4. Write [`HeadInput`] from your steering system in [`WyrmSet::Steer`].
//!
//! Solving runs in [`WyrmSet::Solve`], posing in [`WyrmSet::Pose`].

use bevy::math::DVec3;
use bevy::prelude::*;
use nalgebra::Vector3;

use wyrm_core::WyrmSet;
use wyrm_core::config::FollowerConfig;
use wyrm_core::error::ConfigError;

use crate::bones::{BoneBinding, BoneRotation};
use crate::chain::FollowChain;
use crate::obstacle::{NoObstacles, ObstacleQuery};

/// Bevy plugin that solves follow chains and poses their skeletons.
pub struct WyrmFollowPlugin;

impl Plugin for WyrmFollowPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ObstacleMap>().add_systems(
            Update,
            (
                follow_solve_system.in_set(WyrmSet::Solve),
                bone_pose_system.in_set(WyrmSet::Pose),
            ),
        );
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// World obstacle snapshot shared by every follower.
///
/// Defaults to [`NoObstacles`]. Replace it when the world changes; the
/// solver only reads it.
#[derive(Resource)]
pub struct ObstacleMap(Box<dyn ObstacleQuery + Send + Sync>);

impl ObstacleMap {
    pub fn new(query: impl ObstacleQuery + Send + Sync + 'static) -> Self {
        Self(Box::new(query))
    }

    pub fn from_boxed(query: Box<dyn ObstacleQuery + Send + Sync>) -> Self {
        Self(query)
    }

    pub fn set(&mut self, query: impl ObstacleQuery + Send + Sync + 'static) {
        self.0 = Box::new(query);
    }

    pub fn query(&self) -> &(dyn ObstacleQuery + Send + Sync) {
        self.0.as_ref()
    }
}

impl Default for ObstacleMap {
    fn default() -> Self {
        Self::new(NoObstacles)
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// Head position and facing for this tick, written by the owner's steering.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HeadInput {
    pub position: DVec3,
    /// Need not be normalised.
    pub forward: DVec3,
}

impl HeadInput {
    pub const fn new(position: DVec3, forward: DVec3) -> Self {
        Self { position, forward }
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.forward.is_finite()
    }
}

/// A follow chain owned by one entity.
#[derive(Component, Debug, Clone)]
pub struct Follower {
    pub chain: FollowChain,
    /// Relaxation passes per tick.
    pub iterations: u32,
}

impl Follower {
    /// Build from config.
    ///
    /// # Errors
    ///
    /// Returns the config's validation error.
    pub fn from_config(config: &FollowerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            chain: FollowChain::from_config(config)?,
            iterations: config.iterations,
        })
    }
}

/// Bone entities posed from a follower's solved angles.
///
/// `bones[i]` is bone `i + 1`. Bone entities need a [`Transform`].
#[derive(Component, Debug, Clone)]
pub struct SkeletonBinding {
    pub binding: BoneBinding,
    pub root: Option<Entity>,
    pub bones: Vec<Entity>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn to_vector(v: DVec3) -> Vector3<f64> {
    Vector3::new(v.x, v.y, v.z)
}

pub fn to_dvec(v: &Vector3<f64>) -> DVec3 {
    DVec3::new(v.x, v.y, v.z)
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Solve every follower against its head input.
///
/// Followers with a non-finite head input are skipped for the tick.
#[allow(clippy::needless_pass_by_value)]
pub fn follow_solve_system(
    obstacles: Res<ObstacleMap>,
    mut followers: Query<(Entity, &HeadInput, &mut Follower)>,
) {
    let query = obstacles.query();
    for (entity, head, mut follower) in &mut followers {
        if !head.is_finite() {
            warn!("follower {entity:?}: non-finite head input, solve skipped");
            continue;
        }
        let iterations = follower.iterations;
        follower.chain.solve(
            to_vector(head.position),
            to_vector(head.forward),
            query,
            iterations,
        );
    }
}

/// Write bone rotations for every follower with a [`SkeletonBinding`].
///
/// Bones past the chain's link count are reset to identity each tick.
#[allow(clippy::needless_pass_by_value)]
pub fn bone_pose_system(
    followers: Query<(&Follower, &SkeletonBinding)>,
    mut transforms: Query<&mut Transform>,
) {
    for (follower, skeleton) in &followers {
        let angles = follower.chain.angles();
        if let Some(root) = skeleton.root {
            if let Ok(mut transform) = transforms.get_mut(root) {
                transform.rotation = skeleton.binding.root_rotation().to_quat();
            }
        }
        for (i, &bone) in skeleton.bones.iter().enumerate() {
            let Ok(mut transform) = transforms.get_mut(bone) else {
                continue;
            };
            let rotation: BoneRotation = skeleton.binding.bone_rotation(angles, i + 1);
            transform.rotation = rotation.to_quat();
        }
    }
}

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

/// Spawn a follower entity from config.
///
/// # Errors
///
/// Returns the config's validation error; nothing is spawned in that case.
pub fn spawn_follower(
    world: &mut World,
    config: &FollowerConfig,
    head: HeadInput,
) -> Result<Entity, ConfigError> {
    let follower = Follower::from_config(config)?;
    let entity = world
        .spawn((Name::new(config.name.clone()), head, follower))
        .id();
    debug!(
        "spawned follower '{}' ({} links) as {entity:?}",
        config.name,
        config.link_count()
    );
    Ok(entity)
}

/// Spawn a root and `bone_count` bone entities and bind them to `follower`.
///
/// Uses the follower config's binding; the bone count falls back to the
/// link count. Returns the bone entities in order.
pub fn attach_skeleton(world: &mut World, follower: Entity, config: &FollowerConfig) -> Vec<Entity> {
    let binding = BoneBinding::from_config(&config.binding, config.link_count());
    let root = world.spawn((Name::new("root"), Transform::default())).id();
    let bones: Vec<Entity> = (1..=binding.bone_count())
        .map(|i| {
            world
                .spawn((Name::new(format!("bone{i}")), Transform::default()))
                .id()
        })
        .collect();
    world.entity_mut(follower).insert(SkeletonBinding {
        binding,
        root: Some(root),
        bones: bones.clone(),
    });
    bones
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
