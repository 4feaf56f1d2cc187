//! Per-tick simulation driver
//!
//! Order within a running tick: grow dish, expire old balls, move, bounce off
//! the wall, pairwise scan, commit deaths then births, maybe emit stats.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::factory::spawn_initial;
use super::rng::{SimRng, create_rng};
use super::state::{SimEvent, SimState};
use super::{interaction, lifecycle, motion};
use crate::SimulationConfig;
use crate::consts::LIFETIME_MS;
use crate::stats::{StatsAggregator, StatsSnapshot};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Simulated time used for ages and breed cooldowns (ms)
    pub now_ms: f64,
    /// Frame timestamp used only to throttle stats (ms)
    pub frame_ms: f64,
    /// Paused ticks leave the balls and the dish untouched
    pub running: bool,
    pub config: SimulationConfig,
}

/// What a tick produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Expiries, kills and births, in that order
    pub events: Vec<SimEvent>,
    /// Present when the stats throttle window elapsed
    pub stats: Option<StatsSnapshot>,
    /// Set on the tick that serviced a reset request
    pub reset_complete: bool,
}

/// The simulation engine: owns the state and the random source
#[derive(Debug, Clone)]
pub struct Simulation<R: SimRng = Pcg32> {
    state: SimState,
    rng: R,
    stats: StatsAggregator,
    reset_pending: bool,
    /// Last config seen from the driver, and its sanitized form
    raw_config: SimulationConfig,
    config: SimulationConfig,
}

impl Simulation<Pcg32> {
    /// Seeded engine with its initial population already spawned
    pub fn new(seed: u64, config: &SimulationConfig, now_ms: f64) -> Self {
        Self::with_rng(create_rng(seed), seed, config, now_ms)
    }
}

impl<R: SimRng> Simulation<R> {
    /// Engine driven by a caller-supplied random source
    pub fn with_rng(rng: R, seed: u64, config: &SimulationConfig, now_ms: f64) -> Self {
        let mut sim = Self {
            state: SimState::new(seed),
            rng,
            stats: StatsAggregator::new(),
            reset_pending: false,
            raw_config: *config,
            config: config.sanitized(),
        };
        sim.reset(config, now_ms);
        sim
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn balls(&self) -> &[super::state::Ball] {
        &self.state.balls
    }

    pub fn container(&self) -> &super::container::Container {
        &self.state.container
    }

    /// The sanitized config currently in effect
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Clamp a driver-supplied config, only redoing the work when it changes
    fn accept_config(&mut self, raw: &SimulationConfig) -> SimulationConfig {
        if *raw != self.raw_config {
            self.raw_config = *raw;
            self.config = raw.sanitized();
        }
        self.config
    }

    /// Ask for a reset; the next `step` performs it instead of a regular tick
    pub fn request_reset(&mut self) {
        self.reset_pending = true;
    }

    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Replace the population and shrink the dish back to its initial size
    ///
    /// The new state is built off to the side and swapped in whole.
    pub fn reset(&mut self, config: &SimulationConfig, now_ms: f64) {
        let config = config.sanitized();
        let mut fresh = SimState::new(self.state.seed);
        fresh.container = self.state.container.clone();
        fresh.container.reset();
        fresh.ids = self.state.ids.clone();

        fresh.balls = spawn_initial(
            config.initial_population,
            &fresh.container,
            config.ball_speed,
            now_ms,
            &mut self.rng,
            &mut fresh.ids,
        );

        self.state = fresh;
        self.stats.force_next();
        self.reset_pending = false;
        log::info!(
            "Reset: {} balls, dish radius {}",
            self.state.population(),
            self.state.container.radius
        );
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self, input: &TickInput) -> TickReport {
        let config = self.accept_config(&input.config);
        let mut report = TickReport::default();

        // A reset tick hands back the fresh population untouched
        if self.reset_pending {
            self.reset(&config, input.now_ms);
            report.reset_complete = true;
            report.stats = self.stats.maybe_emit(input.frame_ms, &self.state.balls);
            return report;
        }

        self.state.container.grow(input.running);

        if input.running {
            self.state.time_ticks += 1;
            self.run_lifecycle(&config, input.now_ms, &mut report.events);
        }

        report.stats = self.stats.maybe_emit(input.frame_ms, &self.state.balls);
        report
    }

    fn run_lifecycle(
        &mut self,
        config: &SimulationConfig,
        now_ms: f64,
        events: &mut Vec<SimEvent>,
    ) {
        let state = &mut self.state;

        let expired = lifecycle::expire_by_age(&mut state.balls, now_ms, LIFETIME_MS);

        motion::advance_all(&mut state.balls);
        motion::reflect_all(&mut state.balls, &state.container);

        let outcome = interaction::scan(
            &mut state.balls,
            config,
            now_ms,
            &mut self.rng,
            &mut state.ids,
        );
        let kills = outcome.kill_count();
        let births = outcome.births.len();
        lifecycle::commit(&mut state.balls, &outcome.killed, outcome.births);

        if !expired.is_empty() || kills > 0 || births > 0 {
            log::debug!(
                "Tick {}: {} expired, {} killed, {} born, population {}",
                state.time_ticks,
                expired.len(),
                kills,
                births,
                state.population()
            );
        }

        events.extend(expired);
        events.extend(outcome.events);
    }
}
