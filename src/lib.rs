//! Petri Dish - a breeding-ball population simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, lifecycle)
//! - `config`: User-tunable simulation parameters
//! - `stats`: Throttled population statistics
//! - `error`: Configuration loading errors

pub mod config;
pub mod error;
pub mod sim;
pub mod stats;

pub use config::SimulationConfig;
pub use error::{ConfigError, ConfigResult};
pub use stats::{PopulationTracker, StatsAggregator, StatsSnapshot};

use glam::Vec2;

/// Engine constants (not user-configurable)
pub mod consts {
    use glam::Vec2;

    /// Dish dimensions
    pub const CONTAINER_CENTER: Vec2 = Vec2::new(400.0, 400.0);
    pub const INITIAL_CONTAINER_RADIUS: f32 = 120.0;
    pub const MAX_CONTAINER_RADIUS: f32 = 350.0;
    /// Pixels per tick
    pub const CONTAINER_GROWTH_RATE: f32 = 0.15;

    /// Reference ball size; speed scales with BALL_RADIUS / radius
    pub const BALL_RADIUS: f32 = 8.0;
    pub const MIN_BALL_RADIUS: f32 = 4.0;
    pub const MAX_BALL_RADIUS: f32 = 20.0;
    /// Initial population radius variance (+/-)
    pub const INITIAL_RADIUS_VARIANCE: f32 = 2.0;
    /// Offspring radius variance around the parent average (+/-)
    pub const OFFSPRING_RADIUS_VARIANCE: f32 = 1.0;

    /// Chance that a same-type contact kills one of the pair
    pub const KILL_CHANCE_A: f32 = 0.02;
    pub const KILL_CHANCE_B: f32 = 0.01;
    /// Chance that a successful breeding produces twins
    pub const TWIN_CHANCE: f32 = 0.1;
    /// Positional offset of the second twin (both axes)
    pub const TWIN_OFFSET: f32 = 2.0;

    /// Newborns can't breed (or start ageing) until this much time has passed
    pub const NEWBORN_GRACE_MS: f64 = 2000.0;
    /// Age at which a ball dies of old age
    pub const LIFETIME_MS: f64 = 45_000.0;

    /// Minimum spacing between stats snapshots
    pub const STATS_THROTTLE_MS: f64 = 200.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Clamp a radius into the legal ball size range (NaN falls back to the reference size)
#[inline]
pub fn clamp_radius(radius: f32) -> f32 {
    if radius.is_nan() {
        return consts::BALL_RADIUS;
    }
    radius.clamp(consts::MIN_BALL_RADIUS, consts::MAX_BALL_RADIUS)
}
