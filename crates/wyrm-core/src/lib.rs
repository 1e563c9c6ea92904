//! Shared types, configuration, errors and tick ordering for Wyrm.
//!
//! [`WyrmCorePlugin`] installs the [`SimConfig`](config::SimConfig) and
//! [`SimTick`](tick::SimTick) resources and orders the per-tick work into
//! [`WyrmSet`] phases:
//!
//! ```text
//! Tick ──► Steer ──► Solve ──► Pose
//! ```
//!
//! Steering (choosing where the head goes) is owned by the host and runs in
//! [`WyrmSet::Steer`]; chain solving and bone posing live in `wyrm-follow`.

pub mod config;
pub mod error;
pub mod tick;
pub mod types;

use bevy::prelude::*;

use crate::config::SimConfig;
use crate::tick::SimTick;

// ---------------------------------------------------------------------------
// WyrmSet
// ---------------------------------------------------------------------------

/// Per-tick system phases, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WyrmSet {
    /// Advance the tick counter.
    Tick,
    /// Host steering writes head position/forward.
    Steer,
    /// Chains are solved against the head input.
    Solve,
    /// Solved angles are written to skeleton bones.
    Pose,
}

// ---------------------------------------------------------------------------
// WyrmCorePlugin
// ---------------------------------------------------------------------------

/// Core plugin: resources and [`WyrmSet`] ordering.
pub struct WyrmCorePlugin;

impl Plugin for WyrmCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimConfig>()
            .init_resource::<SimTick>()
            .configure_sets(
                Update,
                (WyrmSet::Tick, WyrmSet::Steer, WyrmSet::Solve, WyrmSet::Pose).chain(),
            )
            .add_systems(Update, advance_tick_system.in_set(WyrmSet::Tick));
    }
}

/// Advance [`SimTick`] once per app update.
pub fn advance_tick_system(mut tick: ResMut<SimTick>) {
    tick.advance();
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        WyrmCorePlugin, WyrmSet,
        config::{BindingConfig, FollowerConfig, SimConfig, WyrmConfig},
        error::{ChainError, ConfigError, WyrmError},
        tick::SimTick,
        types::{AngleConvention, FollowMode},
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
