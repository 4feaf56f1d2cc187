//! Petri Dish headless entry point
//!
//! Runs the simulation at a fixed 60 Hz simulated frame rate for a number of
//! ticks, logging throttled stats and printing a JSON run summary.
//!
//! Usage: `petri-dish [CONFIG.json] [--ticks N] [--seed S]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use petri_dish::sim::{Simulation, TickInput};
use petri_dish::{PopulationTracker, SimulationConfig};

/// Simulated milliseconds per frame
const FRAME_MS: f64 = 1000.0 / 60.0;
const DEFAULT_TICKS: u64 = 3600;
const DEFAULT_SEED: u64 = 0x5eed;

/// Headless breeding-ball population run
#[derive(Parser, Debug)]
#[command(name = "petri-dish", version, about, long_about = None)]
struct Args {
    /// JSON file with simulation settings; defaults are used when omitted
    #[arg(value_name = "CONFIG.json")]
    config: Option<PathBuf>,

    /// Number of 60 Hz ticks to simulate
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TICKS)]
    ticks: u64,

    /// Seed for the simulation RNG
    #[arg(long, value_name = "S", default_value_t = DEFAULT_SEED)]
    seed: u64,
}

/// Printed to stdout when the run finishes
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    config: SimulationConfig,
    final_dish_radius: f32,
    totals: PopulationTracker,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match SimulationConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };

    log::info!("Starting run: seed={}, ticks={}, {:?}", args.seed, args.ticks, config);
    let mut sim = Simulation::new(args.seed, &config, 0.0);
    let mut tracker = PopulationTracker::new();

    for tick in 1..=args.ticks {
        let now_ms = tick as f64 * FRAME_MS;
        let report = sim.step(&TickInput {
            now_ms,
            frame_ms: now_ms,
            running: true,
            config,
        });
        tracker.record(&report);

        if let Some(stats) = report.stats {
            log::debug!(
                "t={:.0}ms population={} A={} B={}",
                now_ms,
                stats.population,
                stats.count_a,
                stats.count_b
            );
        }
        if sim.balls().is_empty() {
            log::info!("Population died out at tick {}", tick);
            break;
        }
    }

    let summary = RunSummary {
        seed: args.seed,
        ticks: sim.state().time_ticks,
        config: *sim.config(),
        final_dish_radius: sim.container().radius,
        totals: tracker,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize summary: {}", e);
            ExitCode::FAILURE
        }
    }
}
