use crate::config::MotorConfig;

/// Mutable state of one motor channel.
///
/// `count` is a real so a single step can advance the encoder by a fraction
/// of a tick; controllers only ever see the truncated tick count.
#[derive(Debug, Clone, PartialEq)]
pub struct MotorState {
    /// Commanded PWM-like drive value.
    pub power: i32,
    /// Power scaling factor in [0, 1], moved by the strength balancer.
    pub strength: f64,
    /// Encoder counts per unit power per second; drifts each step.
    pub rate: f64,
    /// Accumulated encoder position.
    pub count: f64,
}

impl MotorState {
    /// Fresh channel at full power and full strength.
    pub fn new(config: &MotorConfig, rate: f64) -> Self {
        Self {
            power: config.max_power,
            strength: 1.0,
            rate,
            count: 0.0,
        }
    }

    /// Advance the encoder by one step of applied power.
    pub fn integrate(&mut self, step_duration: f64) {
        self.count += f64::from(self.power) * self.strength * self.rate * step_duration;
    }

    /// Truncated encoder ticks, as seen by the controller.
    pub fn ticks(&self) -> i64 {
        self.count as i64
    }

    /// Re-derive drive power from the fraction of distance remaining.
    ///
    /// The result is not clamped: on overshoot `percent_left` goes negative
    /// and power drops below the nominal minimum, which shapes the dynamics
    /// near the target.
    pub fn update_power(&mut self, config: &MotorConfig, percent_left: f64) {
        self.power = (f64::from(config.max_power - config.min_power) * percent_left
            + f64::from(config.min_power)) as i32;
    }
}
