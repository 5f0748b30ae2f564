//! Round configuration
//!
//! Screen geometry and RNG seed, fixed for the lifetime of a round.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Screen width in px
    pub width: f32,
    /// Screen height in px
    pub height: f32,
    /// Seed for spawn velocities and decoy kicks
    pub seed: u64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: 0,
        }
    }
}

impl RoundConfig {
    pub fn new(width: f32, height: f32, seed: u64) -> Result<Self, ConfigError> {
        let config = Self {
            width,
            height,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry the simulation cannot run in
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::BadDimension { axis, value });
            }
        }
        if self.height <= TOPPLE_BAND {
            return Err(ConfigError::TooShort {
                height: self.height,
                min: TOPPLE_BAND,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded round config from {}", path.display());
        Ok(config)
    }

    /// y-coordinate of the balance wire
    #[inline]
    pub fn wire_height(&self) -> f32 {
        self.height - WIRE_OFFSET
    }

    /// y-coordinate of the laser beam
    #[inline]
    pub fn laser_height(&self) -> f32 {
        self.height - LASER_OFFSET
    }
}
