use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of discrete buckets the range sampler quantizes into.
const BUCKETS: u32 = 10_000;

/// Generator seeded from the wall clock, one per process by convention.
pub fn time_seeded_rng() -> ChaCha8Rng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64;
    ChaCha8Rng::seed_from_u64(nanos)
}

/// Generator with a pinned seed for reproducible runs.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform sample over `[min, max)`, quantized into 10 000 buckets.
///
/// Every returned value has the form `min + (k / 10000) * (max - min)` for
/// some `k` in `0..10000`. `min == max` returns `min`.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn sample_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    assert!(
        min <= max,
        "sample_range requires min <= max (got {min} > {max})"
    );
    let r = f64::from(rng.gen_range(0..BUCKETS)) / f64::from(BUCKETS);
    min + r * (max - min)
}

/// Clamp `value` into the inclusive `[min, max]` range.
pub fn bound(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_range_stays_in_bounds() {
        let mut rng = seeded_rng(7);
        for _ in 0..10_000 {
            let v = sample_range(&mut rng, 1.400, 1.600);
            assert!((1.400..1.600).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn test_sample_range_quantization() {
        let mut rng = seeded_rng(42);
        let step = (2.000 - 1.800) / 10_000.0;
        for _ in 0..1_000 {
            let v = sample_range(&mut rng, 1.800, 2.000);
            let buckets = (v - 1.800) / step;
            assert_relative_eq!(buckets, buckets.round(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_sample_range_degenerate_interval() {
        let mut rng = seeded_rng(0);
        assert_eq!(sample_range(&mut rng, 2.0, 2.0), 2.0);
    }

    #[test]
    fn test_sample_range_deterministic_for_seed() {
        let mut a = seeded_rng(99);
        let mut b = seeded_rng(99);
        for _ in 0..100 {
            assert_eq!(
                sample_range(&mut a, -0.0001, 0.0001),
                sample_range(&mut b, -0.0001, 0.0001)
            );
        }
    }

    #[test]
    #[should_panic(expected = "min <= max")]
    fn test_sample_range_rejects_reversed_interval() {
        let mut rng = seeded_rng(0);
        sample_range(&mut rng, 1.0, 0.0);
    }

    #[test]
    fn test_bound_passes_in_range_value() {
        assert_eq!(bound(0.5, 0.0, 1.0), 0.5);
        assert_eq!(bound(0.0, 0.0, 1.0), 0.0);
        assert_eq!(bound(1.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_bound_clamps_to_nearest_edge() {
        assert_eq!(bound(-3.2, 0.0, 1.0), 0.0);
        assert_eq!(bound(42.0, 0.0, 1.0), 1.0);
    }
}
