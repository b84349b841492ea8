use crate::balance::balance_strengths;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::motor::MotorState;
use crate::pacing::Pacer;
use crate::random::{sample_range, seeded_rng, time_seeded_rng};
use crate::telemetry::{RunSummary, StepRecord};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// Two-motor straight-line simulation.
///
/// Owns the full mutable state of a run: both motor channels, the derived
/// run state, and the generator the rate drift is drawn from. The loop has
/// a single terminal condition: the averaged tick count reaching the target.
pub struct Simulation {
    config: SimConfig,
    motor_a: MotorState,
    motor_b: MotorState,
    actual_count: i64,
    percent_left: f64,
    steps: u64,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Build a simulation seeded from the wall clock.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::with_rng(config, time_seeded_rng())
    }

    /// Build a reproducible simulation from an explicit seed.
    pub fn with_seed(config: SimConfig, seed: u64) -> SimResult<Self> {
        Self::with_rng(config, seeded_rng(seed))
    }

    fn with_rng(config: SimConfig, mut rng: ChaCha8Rng) -> SimResult<Self> {
        config.validate()?;

        let (a_low, a_high) = config.motor_a.initial_rate;
        let (b_low, b_high) = config.motor_b.initial_rate;
        let rate_a = sample_range(&mut rng, a_low, a_high);
        let rate_b = sample_range(&mut rng, b_low, b_high);

        Ok(Self {
            motor_a: MotorState::new(&config.motor_a, rate_a),
            motor_b: MotorState::new(&config.motor_b, rate_b),
            actual_count: 0,
            percent_left: 1.0,
            steps: 0,
            config,
            rng,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn motor_a(&self) -> &MotorState {
        &self.motor_a
    }

    pub fn motor_b(&self) -> &MotorState {
        &self.motor_b
    }

    /// Averaged truncated tick count across both channels.
    pub fn actual_count(&self) -> i64 {
        self.actual_count
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Terminal condition: the averaged count reached the target.
    pub fn is_done(&self) -> bool {
        self.actual_count >= i64::from(self.config.desired_count)
    }

    /// Advance the simulation by one step and return its telemetry record.
    ///
    /// In order: integrate with the previous step's power, re-derive power
    /// from the distance remaining, snapshot telemetry, rebalance strengths
    /// from the truncated ticks, then drift both rates.
    pub fn step(&mut self) -> StepRecord {
        let dt = self.config.step_duration;
        self.motor_a.integrate(dt);
        self.motor_b.integrate(dt);

        let ticks_a = self.motor_a.ticks();
        let ticks_b = self.motor_b.ticks();
        self.actual_count = (ticks_a + ticks_b) / 2;
        self.percent_left =
            1.0 - self.actual_count as f64 / f64::from(self.config.desired_count);

        self.motor_a.update_power(&self.config.motor_a, self.percent_left);
        self.motor_b.update_power(&self.config.motor_b, self.percent_left);

        let record = StepRecord {
            rate_a: self.motor_a.rate,
            rate_b: self.motor_b.rate,
            strength_a: self.motor_a.strength,
            strength_b: self.motor_b.strength,
            power_a: self.motor_a.power,
            power_b: self.motor_b.power,
            count_a: ticks_a,
            count_b: ticks_b,
        };

        let (strength_a, strength_b) = balance_strengths(
            ticks_a,
            ticks_b,
            self.motor_a.strength,
            self.motor_b.strength,
            self.config.balance_gain,
        );
        self.motor_a.strength = strength_a;
        self.motor_b.strength = strength_b;

        let jitter = self.config.rate_jitter;
        self.motor_a.rate += sample_range(&mut self.rng, -jitter, jitter);
        self.motor_b.rate += sample_range(&mut self.rng, -jitter, jitter);

        self.steps += 1;
        record
    }

    /// Drive the loop to completion, writing one telemetry line per step.
    ///
    /// The shutdown flag is polled once per iteration; the step cap turns a
    /// stalled drivetrain into an error instead of a hung process.
    pub fn run<W: Write, P: Pacer>(
        &mut self,
        sink: &mut W,
        pacer: &P,
        shutdown: &AtomicBool,
    ) -> SimResult<RunSummary> {
        let step_pause = Duration::from_secs_f64(self.config.step_duration);

        while !self.is_done() {
            if shutdown.load(Ordering::Relaxed) {
                return Err(SimError::Interrupted);
            }
            if let Some(cap) = self.config.max_steps {
                if self.steps >= cap {
                    return Err(SimError::StepLimit { steps: self.steps });
                }
            }

            let record = self.step();
            writeln!(sink, "{record}")?;
            pacer.pause(step_pause);
        }

        debug!(steps = self.steps, count = self.actual_count, "target reached");
        Ok(self.summary())
    }

    /// Summary of the run so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            steps: self.steps,
            final_count_a: self.motor_a.ticks(),
            final_count_b: self.motor_b.ticks(),
            actual_count: self.actual_count,
            simulated_seconds: self.steps as f64 * self.config.step_duration,
        }
    }
}
