//! Simulation state and core types
//!
//! Everything needed to replay a run lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::container::Container;
use crate::clamp_radius;

/// Which of the two ball types a ball belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallKind {
    A,
    B,
}

impl BallKind {
    /// Alternating assignment used for the initial population
    pub fn alternating(index: usize) -> Self {
        if index.is_multiple_of(2) { BallKind::A } else { BallKind::B }
    }

    /// Chance that a same-type contact between two balls of this kind kills one
    pub fn kill_chance(self) -> f32 {
        use crate::consts::{KILL_CHANCE_A, KILL_CHANCE_B};
        match self {
            BallKind::A => KILL_CHANCE_A,
            BallKind::B => KILL_CHANCE_B,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: BallKind,
    /// Simulated time the ball counts its age from (ms)
    pub created_ms: f64,
    /// Simulated time of the last breeding (ms)
    pub last_breed_ms: f64,
    /// Ticks survived
    pub age_ticks: u32,
}

impl Ball {
    pub fn new(id: u32, kind: BallKind, pos: Vec2, vel: Vec2, radius: f32, born_ms: f64) -> Self {
        Self {
            id,
            pos,
            vel,
            radius: clamp_radius(radius),
            kind,
            created_ms: born_ms,
            last_breed_ms: born_ms,
            age_ticks: 0,
        }
    }

    /// Areal mass model
    #[inline]
    pub fn mass(&self) -> f32 {
        self.radius * self.radius
    }

    /// Whether the breed cooldown has elapsed at `now_ms`
    #[inline]
    pub fn can_breed(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        now_ms - self.last_breed_ms > cooldown_ms
    }

    /// Whether the ball has reached its lifetime at `now_ms`
    #[inline]
    pub fn is_expired(&self, now_ms: f64, lifetime_ms: f64) -> bool {
        now_ms - self.created_ms >= lifetime_ms
    }
}

/// Monotonic entity id allocator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next_id: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl IdAllocator {
    pub fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Something that happened to the population during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A ball was born from two parents
    Born {
        id: u32,
        kind: BallKind,
        parents: (u32, u32),
    },
    /// A ball died in a same-type collision with `by`
    Killed { id: u32, by: u32 },
    /// A ball died of old age
    Expired { id: u32 },
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Ticks simulated while running
    pub time_ticks: u64,
    pub container: Container,
    /// Live balls, in insertion order
    pub balls: Vec<Ball>,
    pub ids: IdAllocator,
}

impl SimState {
    /// Empty dish at its initial size
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            time_ticks: 0,
            container: Container::default(),
            balls: Vec::new(),
            ids: IdAllocator::default(),
        }
    }

    pub fn population(&self) -> usize {
        self.balls.len()
    }

    pub fn count_kind(&self, kind: BallKind) -> usize {
        self.balls.iter().filter(|b| b.kind == kind).count()
    }
}
