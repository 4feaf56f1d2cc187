//! The growing circular dish

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Circular boundary that grows toward a cap while the simulation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub center: Vec2,
    pub radius: f32,
    pub initial_radius: f32,
    pub max_radius: f32,
    /// Radius gained per running tick
    pub growth_rate: f32,
}

impl Default for Container {
    fn default() -> Self {
        Self::new(
            CONTAINER_CENTER,
            INITIAL_CONTAINER_RADIUS,
            MAX_CONTAINER_RADIUS,
            CONTAINER_GROWTH_RATE,
        )
    }
}

impl Container {
    pub fn new(center: Vec2, initial_radius: f32, max_radius: f32, growth_rate: f32) -> Self {
        let max_radius = max_radius.max(initial_radius);
        Self {
            center,
            radius: initial_radius,
            initial_radius,
            max_radius,
            growth_rate: growth_rate.max(0.0),
        }
    }

    /// Grow by one tick's worth, never past the cap
    pub fn grow(&mut self, running: bool) {
        if running && !self.at_cap() {
            self.radius = (self.radius + self.growth_rate).min(self.max_radius);
        }
    }

    pub fn reset(&mut self) {
        self.radius = self.initial_radius;
    }

    pub fn at_cap(&self) -> bool {
        self.radius >= self.max_radius
    }
}
