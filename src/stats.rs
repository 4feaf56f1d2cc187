//! Population statistics
//!
//! Snapshots are throttled so consumers aren't flooded at frame rate.
//! Running totals (peak population, births, deaths) are accumulated by the
//! caller with [`PopulationTracker`]; the engine doesn't keep them.

use serde::{Deserialize, Serialize};

use crate::consts::STATS_THROTTLE_MS;
use crate::sim::engine::TickReport;
use crate::sim::state::{Ball, BallKind, SimEvent};

/// Population counts at a moment in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub population: usize,
    pub count_a: usize,
    pub count_b: usize,
}

impl StatsSnapshot {
    pub fn from_balls(balls: &[Ball]) -> Self {
        let count_a = balls.iter().filter(|b| b.kind == BallKind::A).count();
        Self {
            population: balls.len(),
            count_a,
            count_b: balls.len() - count_a,
        }
    }
}

/// Emits at most one snapshot per throttle window
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    last_emit_ms: Option<f64>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute and return a snapshot if the throttle window has elapsed
    ///
    /// The first call always emits.
    pub fn maybe_emit(&mut self, frame_ms: f64, balls: &[Ball]) -> Option<StatsSnapshot> {
        if self
            .last_emit_ms
            .is_some_and(|last| frame_ms - last < STATS_THROTTLE_MS)
        {
            return None;
        }
        self.last_emit_ms = Some(frame_ms);
        Some(StatsSnapshot::from_balls(balls))
    }

    /// Make the next `maybe_emit` report immediately (used after a reset)
    pub fn force_next(&mut self) {
        self.last_emit_ms = None;
    }
}

/// Caller-side running totals over a whole run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopulationTracker {
    /// Largest population seen in any snapshot
    pub max_population: usize,
    pub total_births: usize,
    pub total_kills: usize,
    pub total_expired: usize,
    /// Last snapshot received
    pub latest: StatsSnapshot,
}

impl PopulationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tick's report into the totals
    pub fn record(&mut self, report: &TickReport) {
        if report.reset_complete {
            *self = Self::default();
        }
        for event in &report.events {
            match event {
                SimEvent::Born { .. } => self.total_births += 1,
                SimEvent::Killed { .. } => self.total_kills += 1,
                SimEvent::Expired { .. } => self.total_expired += 1,
            }
        }
        if let Some(stats) = report.stats {
            self.max_population = self.max_population.max(stats.population);
            self.latest = stats;
        }
    }
}
