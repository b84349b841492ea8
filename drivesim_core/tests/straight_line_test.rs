//! End-to-end runs of the public simulation API.

use drivesim_core::{MotorConfig, SimConfig, SimError, Simulation, Unpaced};
use std::sync::atomic::AtomicBool;

fn run_to_completion(config: SimConfig, seed: u64) -> (String, drivesim_core::RunSummary) {
    let mut sim = Simulation::with_seed(config, seed).unwrap();
    let mut sink = Vec::new();
    let summary = sim
        .run(&mut sink, &Unpaced, &AtomicBool::new(false))
        .unwrap();
    (String::from_utf8(sink).unwrap(), summary)
}

#[test]
fn default_drivetrain_reaches_its_target() {
    let (telemetry, summary) = run_to_completion(SimConfig::default(), 2024);

    assert!(summary.actual_count >= 100);
    assert!(summary.steps > 0);
    assert_eq!(telemetry.lines().count() as u64, summary.steps);

    // Every line carries the full record layout.
    for line in telemetry.lines() {
        assert!(line.starts_with("ratio("), "malformed line: {line}");
        assert!(line.contains(") strength("));
        assert!(line.contains(") power("));
        assert!(line.contains(") count("));
        assert!(line.contains(") = "));
    }
}

#[test]
fn matched_channels_hold_a_straight_line() {
    let config = SimConfig::default()
        .with_motors(
            MotorConfig::channel_a().with_fixed_rate(2.0),
            MotorConfig::channel_a().with_fixed_rate(2.0),
        )
        .with_rate_jitter(0.0);
    let (telemetry, summary) = run_to_completion(config, 1);

    assert!(summary.actual_count >= 100);
    assert_eq!(summary.final_count_a, summary.final_count_b);
    for line in telemetry.lines() {
        assert!(line.ends_with("=  0"), "matched channels diverged: {line}");
    }
}

#[test]
fn balancer_outperforms_open_loop_on_mismatched_channels() {
    let mismatched = SimConfig::default()
        .with_motors(
            MotorConfig::channel_a().with_fixed_rate(2.0),
            MotorConfig::channel_a().with_fixed_rate(1.0),
        )
        .with_rate_jitter(0.0);

    let final_diff = |config: SimConfig| {
        let (_, summary) = run_to_completion(config, 11);
        (summary.final_count_a - summary.final_count_b).abs()
    };

    let closed_loop = final_diff(mismatched.clone());
    let open_loop = final_diff(mismatched.with_balance_gain(0.0));
    assert!(
        closed_loop < open_loop,
        "balancer did not help: {closed_loop} vs {open_loop}"
    );
}

#[test]
fn telemetry_is_reproducible_for_a_seed() {
    let (first, _) = run_to_completion(SimConfig::default(), 77);
    let (second, _) = run_to_completion(SimConfig::default(), 77);
    assert_eq!(first, second);

    let (other_seed, _) = run_to_completion(SimConfig::default(), 78);
    assert_ne!(first, other_seed);
}

#[test]
fn zero_target_never_starts_the_loop() {
    let config = SimConfig::default().with_desired_count(0);
    assert!(matches!(
        Simulation::with_seed(config, 0),
        Err(SimError::Config(_))
    ));
}

#[test]
fn stalled_drivetrain_errors_instead_of_hanging() {
    let config = SimConfig::default()
        .with_motors(
            MotorConfig::channel_a().with_fixed_rate(0.0),
            MotorConfig::channel_b().with_fixed_rate(0.0),
        )
        .with_max_steps(Some(1_000));
    let mut sim = Simulation::with_seed(config, 9).unwrap();
    let mut sink = Vec::new();

    assert!(matches!(
        sim.run(&mut sink, &Unpaced, &AtomicBool::new(false)),
        Err(SimError::StepLimit { steps: 1_000 })
    ));
}
