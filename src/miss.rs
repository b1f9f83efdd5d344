//! Miss-count estimation
//!
//! For throughputs below the expected-time skill level, estimate how many
//! misses a player would have at the same overall success probability as a
//! full combo at the baseline. Misses per movement are independent
//! non-identical Bernoulli trials, so the miss count follows a Poisson
//! binomial distribution. Its CDF is a step function, so it is inverted
//! exactly by walking the steps; the unbounded root finder only runs when
//! the walk cannot reach the target.

use crate::config::{AimConfig, DIFFICULTY_COUNT};
use crate::error::Result;
use crate::movement::Movement;
use crate::poisson_binomial::PoissonBinomial;
use crate::probability::{cheesed_movement_time, hit_probability};
use crate::roots::find_root_expand;
use crate::throughput::fc_probability;

/// Initial bracket for the miss-count search
const MISS_COUNT_LOWER: f64 = -100.0;
const MISS_COUNT_UPPER: f64 = 1000.0;

/// Relative slack when comparing the CDF against the target probability
const TARGET_TOLERANCE: f64 = 1e-9;

/// Per-movement miss probabilities at throughput `tp` and `cheese_level`
pub fn miss_probabilities(movements: &[Movement], tp: f64, cheese_level: f64) -> Vec<f64> {
    movements
        .iter()
        .map(|m| {
            let mt = cheesed_movement_time(m.movement_time, cheese_level, m.cheesable_ratio);
            1.0 - hit_probability(m.distance, mt, tp)
        })
        .collect()
}

/// Throughput levels below `fc_time_tp`: `fc_time_tp * (1 - i^1.5 * 0.005)`
pub fn miss_tps(fc_time_tp: f64) -> [f64; DIFFICULTY_COUNT] {
    std::array::from_fn(|i| fc_time_tp * (1.0 - (i as f64).powf(1.5) * 0.005))
}

/// Miss count at which the miss distribution's CDF reaches `probability`
///
/// Returns the smallest integer `k >= 0` with `CDF(k) >= probability`, up to
/// a relative tolerance that absorbs rounding between the CDF and a target
/// computed as a product of hit probabilities.
pub fn miss_count(probability: f64, miss_probabilities: &[f64], config: &AimConfig) -> Result<f64> {
    let distribution = PoissonBinomial::new(miss_probabilities);
    let target = probability.clamp(0.0, 1.0);
    let threshold = target - target * TARGET_TOLERANCE;

    if let Some(k) =
        (0..=distribution.len()).find(|&k| distribution.cdf(k as f64) >= threshold)
    {
        return Ok(k as f64);
    }

    tracing::warn!(probability = target, "CDF walk missed the target, searching for the step");
    find_root_expand(
        |count| distribution.cdf(count) - target,
        MISS_COUNT_LOWER,
        MISS_COUNT_UPPER,
        config.root_tolerance,
    )
}

/// Miss throughputs paired with their estimated miss counts
///
/// The target probability is the full-combo probability at `fc_time_tp`
/// with the default cheese level, and the miss probabilities use the same
/// cheese level.
pub fn miss_tps_miss_counts(
    movements: &[Movement],
    fc_time_tp: f64,
    config: &AimConfig,
) -> Result<([f64; DIFFICULTY_COUNT], [f64; DIFFICULTY_COUNT])> {
    let cheese_level = config.default_cheese_level;
    let fc_prob = fc_probability(movements, fc_time_tp, cheese_level);
    let tps = miss_tps(fc_time_tp);

    let mut counts = [0.0; DIFFICULTY_COUNT];
    for (count, &tp) in counts.iter_mut().zip(tps.iter()) {
        let probabilities = miss_probabilities(movements, tp, cheese_level);
        *count = miss_count(fc_prob, &probabilities, config)?;
    }

    tracing::debug!(fc_prob, ?counts, "estimated miss counts");
    Ok((tps, counts))
}
