use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "drivesim")]
#[command(about = "Differential drive straight-line simulator", long_about = None)]
pub struct Cli {
    /// Seed for the simulation RNG; wall clock when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// TOML file overriding the built-in drivetrain configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target encoder count override
    #[arg(short, long)]
    pub target: Option<i32>,

    /// Step cap override for the divergence guard
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Run at full speed instead of pacing telemetry to real time
    #[arg(long, default_value_t = false)]
    pub unpaced: bool,

    /// Suppress log output; telemetry lines only
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

impl Cli {
    pub fn parse() -> Self {
        Parser::parse()
    }
}
