use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one simulated motor channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorConfig {
    /// Lowest commanded power as the target is approached.
    pub min_power: i32,
    /// Commanded power at the start of a run.
    pub max_power: i32,
    /// Closed interval the initial counts-per-power-second rate is drawn from.
    pub initial_rate: (f64, f64),
}

impl MotorConfig {
    /// Channel A of the stock drivetrain.
    pub fn channel_a() -> Self {
        Self {
            min_power: 50,
            max_power: 200,
            initial_rate: (1.800, 2.000),
        }
    }

    /// Channel B: higher floor, weaker motor/encoder coupling.
    pub fn channel_b() -> Self {
        Self {
            min_power: 60,
            max_power: 200,
            initial_rate: (1.400, 1.600),
        }
    }

    pub fn with_power_bounds(mut self, min_power: i32, max_power: i32) -> Self {
        self.min_power = min_power;
        self.max_power = max_power;
        self
    }

    pub fn with_initial_rate(mut self, low: f64, high: f64) -> Self {
        self.initial_rate = (low, high);
        self
    }

    /// Pin the initial rate to an exact value (no startup variance).
    pub fn with_fixed_rate(self, rate: f64) -> Self {
        self.with_initial_rate(rate, rate)
    }

    fn validate(&self, label: &str) -> SimResult<()> {
        if self.min_power > self.max_power {
            return Err(SimError::Config(format!(
                "motor {label}: min_power {} exceeds max_power {}",
                self.min_power, self.max_power
            )));
        }
        let (low, high) = self.initial_rate;
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(SimError::Config(format!(
                "motor {label}: initial_rate interval ({low}, {high}) is not ordered"
            )));
        }
        Ok(())
    }
}

/// Full drivetrain and loop configuration.
///
/// The defaults describe the stock two-channel drivetrain; every field can
/// be overridden from a TOML file or through the builder methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub motor_a: MotorConfig,
    pub motor_b: MotorConfig,
    /// Target encoder count, averaged across both channels.
    pub desired_count: i32,
    /// Simulated seconds covered by one step.
    pub step_duration: f64,
    /// Proportional gain applied to the tick divergence each step.
    pub balance_gain: f64,
    /// Half-width of the additive rate drift drawn each step.
    pub rate_jitter: f64,
    /// Divergence guard; `None` disables the cap.
    pub max_steps: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            motor_a: MotorConfig::channel_a(),
            motor_b: MotorConfig::channel_b(),
            desired_count: 100,
            step_duration: 0.0008, // 800 microseconds
            balance_gain: 0.005,
            rate_jitter: 0.0001,
            max_steps: Some(1_000_000),
        }
    }
}

impl SimConfig {
    pub fn with_motors(mut self, motor_a: MotorConfig, motor_b: MotorConfig) -> Self {
        self.motor_a = motor_a;
        self.motor_b = motor_b;
        self
    }

    pub fn with_desired_count(mut self, desired_count: i32) -> Self {
        self.desired_count = desired_count;
        self
    }

    pub fn with_step_duration(mut self, seconds: f64) -> Self {
        self.step_duration = seconds;
        self
    }

    pub fn with_balance_gain(mut self, gain: f64) -> Self {
        self.balance_gain = gain;
        self
    }

    pub fn with_rate_jitter(mut self, jitter: f64) -> Self {
        self.rate_jitter = jitter;
        self
    }

    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Load and validate a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&text).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that could stall or corrupt the loop.
    pub fn validate(&self) -> SimResult<()> {
        self.motor_a.validate("A")?;
        self.motor_b.validate("B")?;
        if self.desired_count <= 0 {
            return Err(SimError::Config(format!(
                "desired_count must be positive (got {})",
                self.desired_count
            )));
        }
        if !self.step_duration.is_finite() || self.step_duration <= 0.0 {
            return Err(SimError::Config(format!(
                "step_duration must be a positive number of seconds (got {})",
                self.step_duration
            )));
        }
        if !self.balance_gain.is_finite() || self.balance_gain < 0.0 {
            return Err(SimError::Config(format!(
                "balance_gain must be non-negative (got {})",
                self.balance_gain
            )));
        }
        if !self.rate_jitter.is_finite() || self.rate_jitter < 0.0 {
            return Err(SimError::Config(format!(
                "rate_jitter must be non-negative (got {})",
                self.rate_jitter
            )));
        }
        Ok(())
    }
}
