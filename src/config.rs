//! Placement and generation settings
//!
//! Defaults reproduce the stock add-on. A JSON file can override any
//! subset of fields; missing fields keep their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::MeatballError;
use crate::generator::{
    DEFAULT_DISTORTION, DEFAULT_RINGS, DEFAULT_SEGMENTS, DEFAULT_SMOOTHING_ITERATIONS,
    MAX_RINGS, MAX_SEGMENTS, MAX_SMOOTHING_ITERATIONS,
};
use crate::math::Interval;

pub const DEFAULT_OBJECT_NAME: &str = "CustomMeatBall";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;
pub const DEFAULT_CLEARANCE: f32 = 3.0;

/// When the previously generated meatballs are removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ClearPolicy {
    /// Remove old meatballs before sampling; the collision set is empty
    #[default]
    ClearFirst,
    /// Sample clear of the old meatballs, then remove them
    DeferredClear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Range the radius is drawn from
    pub radius: Interval,
    /// Range every center axis is drawn from
    pub position: Interval,
    /// Added to an existing meatball's radius to get the minimum distance
    pub clearance: f32,
    /// Center samples tried before giving up
    pub max_attempts: u32,
    pub policy: ClearPolicy,
    pub object_name: String,
    pub distortion_factor: f32,
    pub smoothing_iterations: u32,
    pub segments: u32,
    pub rings: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            radius: Interval::new(1.0, 3.0),
            position: Interval::symmetric(5.0),
            clearance: DEFAULT_CLEARANCE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            policy: ClearPolicy::default(),
            object_name: DEFAULT_OBJECT_NAME.to_string(),
            distortion_factor: DEFAULT_DISTORTION,
            smoothing_iterations: DEFAULT_SMOOTHING_ITERATIONS,
            segments: DEFAULT_SEGMENTS,
            rings: DEFAULT_RINGS,
        }
    }
}

impl PlacementConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        Self::from_json_str(&text).context(format!("Invalid config file: {:?}", path))
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.radius.is_valid() && self.radius.min > 0.0,
            "radius range must be positive and ordered, got {:?}",
            self.radius
        );
        anyhow::ensure!(
            self.position.is_valid(),
            "position range must be finite and ordered, got {:?}",
            self.position
        );
        anyhow::ensure!(
            self.clearance.is_finite(),
            "clearance must be finite, got {}",
            self.clearance
        );
        anyhow::ensure!(self.max_attempts > 0, "max_attempts must be at least 1");
        anyhow::ensure!(
            self.distortion_factor.is_finite() && self.distortion_factor >= 0.0,
            "distortion_factor must be finite and >= 0, got {}",
            self.distortion_factor
        );
        anyhow::ensure!(
            self.segments >= 3 && self.rings >= 2,
            "tessellation needs at least 3 segments and 2 rings"
        );
        anyhow::ensure!(
            self.segments <= MAX_SEGMENTS && self.rings <= MAX_RINGS,
            "tessellation is capped at {}x{}, got {}x{}",
            MAX_SEGMENTS,
            MAX_RINGS,
            self.segments,
            self.rings
        );
        anyhow::ensure!(
            self.smoothing_iterations <= MAX_SMOOTHING_ITERATIONS,
            "smoothing_iterations is capped at {}, got {}",
            MAX_SMOOTHING_ITERATIONS,
            self.smoothing_iterations
        );
        Ok(())
    }

    /// [`validate`](Self::validate) for library callers, as an
    /// [`MeatballError::InvalidSpec`]
    pub fn check(&self) -> crate::error::Result<()> {
        self.validate()
            .map_err(|err| MeatballError::InvalidSpec(format!("{:#}", err)))
    }
}
