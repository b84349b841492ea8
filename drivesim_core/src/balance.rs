use crate::random::bound;

/// Rebalance the two strength factors from the tick divergence.
///
/// The correction is proportional to `count_a - count_b` and is split
/// symmetrically: the leading channel gives up half of it and the lagging
/// channel gains the other half, so the pair converges back onto a straight
/// line. Equal counts return the inputs untouched. Both results are clamped
/// to [0, 1] no matter how large the divergence is.
pub fn balance_strengths(
    count_a: i64,
    count_b: i64,
    strength_a: f64,
    strength_b: f64,
    gain: f64,
) -> (f64, f64) {
    if count_a == count_b {
        return (strength_a, strength_b);
    }

    let adjustment = gain * (count_a - count_b) as f64;

    (
        bound(strength_a - adjustment / 2.0, 0.0, 1.0),
        bound(strength_b + adjustment / 2.0, 0.0, 1.0),
    )
}
