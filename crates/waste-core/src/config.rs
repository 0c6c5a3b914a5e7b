//! Configuration System
//!
//! Loads simulation parameters from a TOML file. Every field has a default,
//! so a config file only needs the values it changes.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use waste_events::PopulationCounts;

use crate::components::BoundsPolicy;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "waste_sim.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the shared random source
    pub seed: u64,
    pub population: PopulationCounts,
    pub grid: GridConfig,
    pub rules: RuleConfig,
    pub watchdog: WatchdogConfig,
}

/// Grid geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Distance between disposal-area lattice lines
    pub disposal_spacing: u32,
    pub bounds_policy: BoundsPolicy,
}

/// Which agents Police remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliceTarget {
    /// Every ImproperDisposer sharing the officer's cell
    #[default]
    ImproperDisposer,
    /// Normal agents whose score dropped to zero or below
    LowScoreNormal,
}

/// Interaction rule parameters. Inserted into the world as a resource.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Camera detection radius in cells (Euclidean)
    pub detection_radius: f64,
    /// Chance a Normal agent on garbage disposes of it improperly
    pub improper_disposal_chance: f64,
    pub police_target: PoliceTarget,
}

/// Inactivity watchdog parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchdogConfig {
    pub inactivity_window_seconds: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            population: PopulationCounts::default(),
            grid: GridConfig::default(),
            rules: RuleConfig::default(),
            watchdog: WatchdogConfig::default(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_width: 100,
            grid_height: 60,
            disposal_spacing: 10,
            bounds_policy: BoundsPolicy::Clamp,
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            detection_radius: 5.0,
            improper_disposal_chance: 0.5,
            police_target: PoliceTarget::ImproperDisposer,
        }
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            inactivity_window_seconds: 30.0,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.grid_width == 0 || self.grid.grid_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.grid_width, self.grid.grid_height
            )));
        }
        if self.grid.disposal_spacing == 0 {
            return Err(ConfigError::Invalid(
                "disposal_spacing must be positive".to_string(),
            ));
        }
        let chance = self.rules.improper_disposal_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::Invalid(format!(
                "improper_disposal_chance must be within [0, 1], got {}",
                chance
            )));
        }
        let radius = self.rules.detection_radius;
        if radius.is_nan() || radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "detection_radius must be non-negative, got {}",
                radius
            )));
        }
        let window = self.watchdog.inactivity_window_seconds;
        if window.is_nan() || window < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "inactivity_window_seconds must be non-negative, got {}",
                window
            )));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
