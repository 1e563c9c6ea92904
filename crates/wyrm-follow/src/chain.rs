//! Head-driven follow chain.
//!
//! A [`FollowChain`] is an ordered list of joints joined by links of fixed
//! rest length. Only joint 0 (the head) is driven from outside; every other
//! joint is dragged along by repeatedly re-placing it at its rest distance
//! from its predecessor. This is a forward relaxation, not end-effector IK:
//! the tail has no target.
//!
//! # Per-tick pipeline
//!
//! ```text
//! seed (once) ──► pin head ──► damp tip ──► relax × N ──► store prev ──► angles
//!                                             │
//!                                             └─ obstacle escape per joint
//! ```
//!
//! No step can fail. Degenerate geometry falls back to the head's forward
//! direction, so joints and angles stay finite for finite input.

use bevy::log::debug;
use nalgebra::Vector3;

use wyrm_core::config::{FollowerConfig, MAX_TIP_DAMPING};
use wyrm_core::error::{ChainError, ConfigError};
use wyrm_core::types::{FollowMode, validate_rest_lengths};

use crate::angles::{direction_or, safe_direction};
use crate::obstacle::{ObstacleQuery, adjust};
use crate::pose::AngleSet;

/// Tip damping used when none is configured.
pub const DEFAULT_TIP_DAMPING: f64 = 0.12;

/// Whether the chain has been laid out yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedState {
    /// No solve has run; joint positions are meaningless.
    #[default]
    Unseeded,
    /// Joints were laid on a straight line behind the head. Never reverts.
    Seeded,
}

/// Fixed-length chain of joints trailing a driven head.
#[derive(Debug, Clone)]
pub struct FollowChain {
    rest_lengths: Vec<f64>,
    joints: Vec<Vector3<f64>>,
    prev_joints: Vec<Vector3<f64>>,
    seed: SeedState,
    tip_damping: f64,
    avoid_obstacles: bool,
    mode: FollowMode,
    angles: AngleSet,
}

impl FollowChain {
    /// Build a chain with one link per entry of `rest_lengths`.
    ///
    /// The chain has `rest_lengths.len() + 1` joints. Defaults: tip damping
    /// 0.12, obstacle avoidance on, [`FollowMode::Relaxed`].
    ///
    /// # Errors
    ///
    /// Rejects an empty table and any length that is not finite and > 0.
    pub fn new(rest_lengths: &[f64]) -> Result<Self, ChainError> {
        validate_rest_lengths(rest_lengths)?;
        let n = rest_lengths.len() + 1;
        Ok(Self {
            rest_lengths: rest_lengths.to_vec(),
            joints: vec![Vector3::zeros(); n],
            prev_joints: vec![Vector3::zeros(); n],
            seed: SeedState::Unseeded,
            tip_damping: DEFAULT_TIP_DAMPING,
            avoid_obstacles: true,
            mode: FollowMode::Relaxed,
            angles: AngleSet::default(),
        })
    }

    /// Build from a [`FollowerConfig`].
    ///
    /// # Errors
    ///
    /// Returns the config's validation error, e.g.
    /// [`ConfigError::InvalidTipDamping`] or a wrapped [`ChainError`].
    pub fn from_config(config: &FollowerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(&config.rest_lengths)?
            .with_tip_damping(config.tip_damping)
            .with_obstacle_avoidance(config.avoid_obstacles)
            .with_mode(config.mode))
    }

    /// Builder: set tip damping (clamped to `[0, 0.5]`).
    #[must_use]
    pub fn with_tip_damping(mut self, damping: f64) -> Self {
        self.set_tip_damping(damping);
        self
    }

    /// Builder: enable or disable obstacle escape.
    #[must_use]
    pub const fn with_obstacle_avoidance(mut self, enabled: bool) -> Self {
        self.avoid_obstacles = enabled;
        self
    }

    /// Builder: set follow mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: FollowMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set tip damping, clamped to `[0, 0.5]`. NaN disables damping.
    pub fn set_tip_damping(&mut self, damping: f64) {
        self.tip_damping = if damping.is_nan() {
            0.0
        } else {
            damping.clamp(0.0, MAX_TIP_DAMPING)
        };
    }

    pub const fn set_obstacle_avoidance(&mut self, enabled: bool) {
        self.avoid_obstacles = enabled;
    }

    /// Lay the joints on a straight line behind `head`, once.
    ///
    /// Joint `i` goes to `head - dir * (rest[0] + … + rest[i-1])` where `dir`
    /// is `head_forward` normalised (+X if degenerate). Previous positions
    /// are set to the same line. Returns `true` if this call seeded the
    /// chain, `false` if it was already seeded.
    pub fn seed(&mut self, head: Vector3<f64>, head_forward: Vector3<f64>) -> bool {
        if self.seed == SeedState::Seeded {
            return false;
        }
        self.lay_straight(head, &safe_direction(&head_forward));
        self.prev_joints.copy_from_slice(&self.joints);
        self.seed = SeedState::Seeded;
        debug!(
            "follow chain seeded: {} joints, total length {:.3}",
            self.joints.len(),
            self.total_length()
        );
        true
    }

    /// Advance the chain by one tick.
    ///
    /// Pins joint 0 to `head`, then (in [`FollowMode::Relaxed`]) damps the
    /// tip towards last tick's tip and runs `max(1, iterations)` relaxation
    /// passes. Joints landing in solid cells are escaped when avoidance is
    /// on. Angles are recomputed at the end.
    pub fn solve<Q>(
        &mut self,
        head: Vector3<f64>,
        head_forward: Vector3<f64>,
        obstacles: &Q,
        iterations: u32,
    ) where
        Q: ObstacleQuery + ?Sized,
    {
        self.seed(head, head_forward);
        let fallback = safe_direction(&head_forward);

        match self.mode {
            FollowMode::Rigid => self.lay_straight(head, &fallback),
            FollowMode::Relaxed => self.relax(head, &fallback, obstacles, iterations),
        }

        self.prev_joints.copy_from_slice(&self.joints);
        self.angles.extract_into(&self.joints, &head_forward);
    }

    fn relax<Q>(
        &mut self,
        head: Vector3<f64>,
        fallback: &Vector3<f64>,
        obstacles: &Q,
        iterations: u32,
    ) where
        Q: ObstacleQuery + ?Sized,
    {
        self.joints[0] = head;

        if self.tip_damping > 0.0 {
            let tip = self.joints.len() - 1;
            self.joints[tip] = self.joints[tip] * (1.0 - self.tip_damping)
                + self.prev_joints[tip] * self.tip_damping;
        }

        for _ in 0..iterations.max(1) {
            for i in 1..self.joints.len() {
                let anchor = self.joints[i - 1];
                let dir = direction_or(&(self.joints[i] - anchor), fallback);
                let placed = anchor + dir * self.rest_lengths[i - 1];
                self.joints[i] = if self.avoid_obstacles {
                    adjust(placed, obstacles)
                } else {
                    placed
                };
            }
            self.joints[0] = head;
        }
    }

    fn lay_straight(&mut self, head: Vector3<f64>, dir: &Vector3<f64>) {
        self.joints[0] = head;
        let mut accum = 0.0;
        for i in 1..self.joints.len() {
            accum += self.rest_lengths[i - 1];
            self.joints[i] = head - dir * accum;
        }
    }

    // -- Access --

    /// Number of joints (links + 1).
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Always `false`: a chain has at least two joints.
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn link_count(&self) -> usize {
        self.rest_lengths.len()
    }

    pub fn joints(&self) -> &[Vector3<f64>] {
        &self.joints
    }

    pub fn joint(&self, i: usize) -> Option<&Vector3<f64>> {
        self.joints.get(i)
    }

    /// Joint 0.
    pub fn head(&self) -> &Vector3<f64> {
        &self.joints[0]
    }

    /// Last joint.
    pub fn tip(&self) -> &Vector3<f64> {
        &self.joints[self.joints.len() - 1]
    }

    pub fn rest_lengths(&self) -> &[f64] {
        &self.rest_lengths
    }

    pub fn total_length(&self) -> f64 {
        self.rest_lengths.iter().sum()
    }

    pub fn seed_state(&self) -> SeedState {
        self.seed
    }

    pub fn is_seeded(&self) -> bool {
        self.seed == SeedState::Seeded
    }

    pub const fn tip_damping(&self) -> f64 {
        self.tip_damping
    }

    pub const fn avoids_obstacles(&self) -> bool {
        self.avoid_obstacles
    }

    pub const fn mode(&self) -> FollowMode {
        self.mode
    }

    /// Angles from the most recent solve.
    pub const fn angles(&self) -> &AngleSet {
        &self.angles
    }

    /// Largest `|distance - rest|` over all links.
    pub fn link_error(&self) -> f64 {
        self.joints
            .windows(2)
            .zip(&self.rest_lengths)
            .map(|(pair, rest)| ((pair[1] - pair[0]).norm() - rest).abs())
            .fold(0.0, f64::max)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
