//! Simulation configuration
//!
//! The user-facing knobs. Everything else (kill chances, twin chance, radius
//! bounds, lifetime, container growth) lives in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Largest population the engine will accept as a cap
pub const POPULATION_HARD_LIMIT: usize = 5000;

/// User-tunable simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Chance (0.0 - 1.0) that an eligible opposite-type collision breeds
    pub breed_chance: f32,
    /// Number of balls spawned on reset
    pub initial_population: usize,
    /// Speed scale factor applied to every spawned ball
    pub ball_speed: f32,
    /// Population cap; breeding stops when reached
    pub max_population: usize,
    /// Minimum time between two breedings of the same ball (ms)
    pub breed_cooldown_ms: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            breed_chance: 0.3,
            initial_population: 20,
            ball_speed: 2.0,
            max_population: 200,
            breed_cooldown_ms: 2000.0,
        }
    }
}

impl SimulationConfig {
    /// Return a copy with every field forced into its legal range
    ///
    /// Malformed values are repaired rather than rejected, so a bad config can
    /// never crash the engine or let the population grow without bound.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut out = *self;

        out.breed_chance = if self.breed_chance.is_nan() {
            defaults.breed_chance
        } else {
            self.breed_chance.clamp(0.0, 1.0)
        };

        out.initial_population = self.initial_population.clamp(2, POPULATION_HARD_LIMIT);

        out.ball_speed = if self.ball_speed.is_finite() && self.ball_speed > 0.0 {
            self.ball_speed
        } else {
            defaults.ball_speed
        };

        out.max_population = self
            .max_population
            .clamp(out.initial_population, POPULATION_HARD_LIMIT);

        out.breed_cooldown_ms = if self.breed_cooldown_ms.is_nan() {
            defaults.breed_cooldown_ms
        } else {
            self.breed_cooldown_ms.max(0.0)
        };

        if out != *self {
            log::warn!("Config adjusted into legal range: {:?} -> {:?}", self, out);
        }
        out
    }

    /// Parse a JSON config; missing keys fall back to defaults
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Load a JSON config from disk
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
