//! drivesim - differential drive straight-line demo
//!
//! Simulates two mismatched drive motors chasing a shared encoder target.
//! A strength balancer bleeds power from whichever channel runs ahead, so
//! the pair holds a straight line despite unequal motor/encoder coupling
//! and per-step rate drift.
//!
//! Usage:
//!   cargo run -p drivesim
//!   cargo run -p drivesim -- --seed 42 --unpaced
//!
//! One telemetry line is written to stdout per simulation step; logs go to
//! stderr and honor RUST_LOG.

mod cli;

use anyhow::{Context, Result as AnyResult};
use cli::Cli;
use drivesim_core::{SimConfig, SimError, Simulation, Unpaced, WallClock};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

fn main() -> AnyResult<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "error" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => SimConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(target) = cli.target {
        config = config.with_desired_count(target);
    }
    if let Some(cap) = cli.max_steps {
        config = config.with_max_steps(Some(cap));
    }

    let mut sim = match cli.seed {
        Some(seed) => Simulation::with_seed(config, seed),
        None => Simulation::new(config),
    }?;

    info!("Starting drivesim");
    info!(
        desired_count = sim.config().desired_count,
        step_s = sim.config().step_duration,
        gain = sim.config().balance_gain,
        rate_a = sim.motor_a().rate,
        rate_b = sim.motor_b().rate,
        "drivetrain configured"
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("\nCtrl+C received! Stopping simulation...");
        flag.store(true, Ordering::Relaxed);
    }) {
        warn!("failed to set signal handler: {e}");
    }

    let stdout = std::io::stdout();
    let mut sink = stdout.lock();

    let outcome = if cli.unpaced {
        sim.run(&mut sink, &Unpaced, &shutdown)
    } else {
        sim.run(&mut sink, &WallClock, &shutdown)
    };
    sink.flush().context("failed to flush telemetry")?;

    match outcome {
        Ok(summary) => {
            info!(
                steps = summary.steps,
                count_a = summary.final_count_a,
                count_b = summary.final_count_b,
                simulated_s = summary.simulated_seconds,
                "target reached"
            );
            Ok(())
        }
        Err(SimError::Interrupted) => {
            info!(steps = sim.steps(), "simulation stopped before the target");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
