//! Deterministic simulation module
//!
//! All population logic lives here. This module must be pure and deterministic:
//! - One step per tick, no sub-stepping
//! - Injected RNG only
//! - Simulated time passed in explicitly, never read from the clock
//! - Stable iteration order within a tick; deaths and births deferred

pub mod collision;
pub mod container;
pub mod engine;
pub mod factory;
pub mod interaction;
pub mod lifecycle;
pub mod motion;
pub mod rng;
pub mod state;

pub use collision::{
    CollisionResult, ElasticResponse, ball_ball_collision, ball_wall_collision, reflect_velocity,
    resolve_elastic,
};
pub use container::Container;
pub use engine::{Simulation, TickInput, TickReport};
pub use factory::{spawn_initial, spawn_kinematics, spawn_offspring};
pub use interaction::{ScanOutcome, scan};
pub use rng::{ScriptedRng, SimRng, create_rng};
pub use state::{Ball, BallKind, IdAllocator, SimEvent, SimState};
