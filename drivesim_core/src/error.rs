use thiserror::Error;

/// Errors produced by the simulation runtime.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration rejected before the loop starts.
    #[error("configuration error: {0}")]
    Config(String),

    /// Telemetry sink write failure.
    #[error("telemetry write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The step-limit guard fired before the target was reached.
    #[error("step limit reached after {steps} steps without reaching the target")]
    StepLimit { steps: u64 },

    /// The run was stopped by the shutdown flag.
    #[error("simulation interrupted before reaching the target")]
    Interrupted,
}

pub type SimResult<T> = Result<T, SimError>;
