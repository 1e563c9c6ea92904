use std::f32::consts::FRAC_PI_2;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{AngleConvention, FollowMode, validate_rest_lengths};

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_tick_hz() -> f64 {
    20.0
}
const fn default_tip_damping() -> f64 {
    0.12
}
const fn default_iterations() -> u32 {
    2
}
const fn default_true() -> bool {
    true
}
const fn default_root_yaw_correction() -> f32 {
    FRAC_PI_2
}
fn default_follower_name() -> String {
    "follower".into()
}

/// Upper bound for tip damping; above this the tip lags visibly.
pub const MAX_TIP_DAMPING: f64 = 0.5;

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

/// Tick-level simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct SimConfig {
    /// Discrete simulation rate in Hz (default: 20, one solve per tick).
    #[serde(default = "default_tick_hz")]
    pub tick_hz: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_hz: default_tick_hz(),
        }
    }
}

impl SimConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_hz.is_finite() || self.tick_hz <= 0.0 {
            return Err(ConfigError::InvalidTickHz(self.tick_hz));
        }
        Ok(())
    }

    /// Seconds per tick.
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_hz
    }
}

// ---------------------------------------------------------------------------
// BindingConfig
// ---------------------------------------------------------------------------

/// How solved angles are written onto a skeleton's bones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Number of bones in the skeleton. `None` means one bone per link.
    #[serde(default)]
    pub bone_count: Option<usize>,

    #[serde(default)]
    pub convention: AngleConvention,

    /// Constant yaw applied at the skeleton root to line the authored
    /// forward axis up with the solver's forward axis (default: π/2).
    #[serde(default = "default_root_yaw_correction")]
    pub root_yaw_correction: f32,

    #[serde(default)]
    pub invert_yaw: bool,

    #[serde(default)]
    pub invert_pitch: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            bone_count: None,
            convention: AngleConvention::default(),
            root_yaw_correction: default_root_yaw_correction(),
            invert_yaw: false,
            invert_pitch: false,
        }
    }
}

impl BindingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bone_count == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "bone_count".into(),
                message: "must be non-zero".into(),
            });
        }
        if !self.root_yaw_correction.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "root_yaw_correction".into(),
                message: "must be finite".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FollowerConfig
// ---------------------------------------------------------------------------

/// Configuration for one head-driven chain and its skeleton binding.
///
/// Fixed for the owner's lifetime; the solver never re-reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowerConfig {
    #[serde(default = "default_follower_name")]
    pub name: String,

    /// Rest length of each link, head first.
    pub rest_lengths: Vec<f64>,

    /// Tip smoothing factor in `[0, 0.5]` (default: 0.12).
    #[serde(default = "default_tip_damping")]
    pub tip_damping: f64,

    /// Push joints out of solid cells (default: true).
    #[serde(default = "default_true")]
    pub avoid_obstacles: bool,

    /// Relaxation passes per tick (default: 2).
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    #[serde(default)]
    pub mode: FollowMode,

    #[serde(default)]
    pub binding: BindingConfig,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            name: default_follower_name(),
            rest_lengths: vec![1.0; 4],
            tip_damping: default_tip_damping(),
            avoid_obstacles: true,
            iterations: default_iterations(),
            mode: FollowMode::default(),
            binding: BindingConfig::default(),
        }
    }
}

impl FollowerConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_rest_lengths(&self.rest_lengths)?;
        if !(0.0..=MAX_TIP_DAMPING).contains(&self.tip_damping) {
            return Err(ConfigError::InvalidTipDamping(self.tip_damping));
        }
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations(self.iterations));
        }
        self.binding.validate()
    }

    /// Number of links in the configured chain.
    pub fn link_count(&self) -> usize {
        self.rest_lengths.len()
    }

    /// Bone count the binding poses, falling back to one per link.
    pub fn bone_count(&self) -> usize {
        self.binding.bone_count.unwrap_or(self.rest_lengths.len())
    }
}

// ---------------------------------------------------------------------------
// WyrmConfig
// ---------------------------------------------------------------------------

/// Complete configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WyrmConfig {
    #[serde(default)]
    pub simulation: SimConfig,

    #[serde(default, rename = "follower")]
    pub followers: Vec<FollowerConfig>,
}

impl WyrmConfig {
    /// Validate the simulation settings and every follower.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        for follower in &self.followers {
            follower.validate()?;
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
