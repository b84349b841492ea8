//! # drivesim core
//!
//! Simulation runtime for a two-motor differential drive trying to travel in
//! a straight line. Each motor channel converts commanded power into encoder
//! counts through a drifting transfer rate; a proportional strength balancer
//! bleeds power from whichever channel runs ahead so the two counts stay
//! matched all the way to the target.
//!
//! The building blocks:
//!
//! - **Motors**: per-channel power, strength, rate and accumulated count
//! - **Balancer**: symmetric proportional correction on the tick divergence
//! - **Simulation**: the fixed-step loop with its terminal condition
//! - **Telemetry**: one formatted record per step
//!
//! ## Quick Start
//!
//! ```rust
//! use drivesim_core::{SimConfig, Simulation, Unpaced};
//! use std::sync::atomic::AtomicBool;
//!
//! let mut sim = Simulation::with_seed(SimConfig::default(), 42)?;
//! let mut out = Vec::new();
//! let summary = sim.run(&mut out, &Unpaced, &AtomicBool::new(false))?;
//! assert!(summary.actual_count >= 100);
//! # Ok::<(), drivesim_core::SimError>(())
//! ```

pub mod balance;
pub mod config;
pub mod error;
pub mod motor;
pub mod pacing;
pub mod random;
pub mod sim;
pub mod telemetry;

// Re-export commonly used types for easy access
pub use balance::balance_strengths;
pub use config::{MotorConfig, SimConfig};
pub use error::{SimError, SimResult};
pub use motor::MotorState;
pub use pacing::{Pacer, Unpaced, WallClock};
pub use sim::Simulation;
pub use telemetry::{RunSummary, StepRecord};
