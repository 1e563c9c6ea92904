use std::fmt;
use std::time::Duration;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SimTick
// ---------------------------------------------------------------------------

/// Discrete simulation tick counter.
///
/// Chains are solved exactly once per tick, so the tick index is the only
/// notion of time the follower needs. Replaying the same tick with the same
/// inputs reproduces the same solve.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Resource,
)]
pub struct SimTick {
    count: u64,
}

impl SimTick {
    /// Create a counter at tick zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Create a counter at an arbitrary tick.
    #[must_use]
    pub const fn from_count(count: u64) -> Self {
        Self { count }
    }

    /// Number of ticks elapsed.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Advance by one tick.
    pub const fn advance(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    pub const fn reset(&mut self) {
        self.count = 0;
    }

    /// Wall-clock span covered at `tick_hz`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn elapsed(&self, tick_hz: f64) -> Duration {
        Duration::from_secs_f64(self.count as f64 / tick_hz)
    }
}

impl fmt::Display for SimTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {}", self.count)
    }
}
