//! Cheese model
//!
//! Cheesing lengthens the effective time of a movement (for example by
//! leaving a target early). The cheese level scales every movement's
//! cheesable ratio; the factor curve shows how far the required throughput
//! drops as the level rises, and the note count estimates how many movements
//! a player at the baseline throughput is likely to cheese.

use crate::config::{AimConfig, CHEESE_LEVEL_COUNT};
use crate::error::Result;
use crate::movement::Movement;
use crate::throughput::fc_prob_tp;
use statrs::function::logistic::logistic;

/// Index of performance (relative to throughput) at which cheesing becomes
/// likely
const CHEESE_IP_MIDPOINT: f64 = 0.6;

/// Steepness of the cheese likelihood curve
const CHEESE_IP_STEEPNESS: f64 = 15.0;

/// Evenly spaced cheese levels `0.0, 0.1, ..., 1.0`
pub fn cheese_levels() -> [f64; CHEESE_LEVEL_COUNT] {
    std::array::from_fn(|i| i as f64 / (CHEESE_LEVEL_COUNT - 1) as f64)
}

/// Cheese levels paired with their difficulty factors
///
/// Each factor is the probability throughput at that level divided by
/// `fc_prob_tp`, the probability throughput at the default cheese level.
pub fn cheese_levels_cheese_factors(
    movements: &[Movement],
    fc_prob_tp_baseline: f64,
    config: &AimConfig,
) -> Result<([f64; CHEESE_LEVEL_COUNT], [f64; CHEESE_LEVEL_COUNT])> {
    let levels = cheese_levels();
    let mut factors = [0.0; CHEESE_LEVEL_COUNT];

    for (factor, &level) in factors.iter_mut().zip(levels.iter()) {
        *factor = fc_prob_tp(movements, level, config)? / fc_prob_tp_baseline;
    }

    tracing::trace!(?factors, "cheese factors");
    Ok((levels, factors))
}

/// Smooth count of movements likely to be cheesed at throughput `tp`
///
/// Each movement contributes its cheesability weighted by a logistic curve
/// of `ip12 / tp`.
pub fn cheese_note_count(movements: &[Movement], tp: f64) -> f64 {
    movements
        .iter()
        .map(|m| {
            let relative_ip = m.ip12 / tp;
            logistic((relative_ip - CHEESE_IP_MIDPOINT) * CHEESE_IP_STEEPNESS) * m.cheesability
        })
        .sum()
}
