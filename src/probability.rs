//! Hit probability model
//!
//! Fitts's Law gives the index of performance of a movement; mapping the
//! achievable precision through the Gaussian error function gives the
//! probability of landing the movement at a given throughput.

use statrs::function::erf::erf;
use std::f64::consts::SQRT_2;

/// Guard added to movement times in the index of performance
const IP_EPSILON: f64 = 1e-10;

/// Precision scale of the error-function mapping
const PRECISION_SCALE: f64 = 2.066;

/// Above this `mt * tp` the exponential term saturates the probability
const SATURATION_EXPONENT: f64 = 100.0;

/// Probability of hitting a movement of distance `d` within `mt` at
/// throughput `tp`
///
/// - `d == 0` is stationary and always succeeds
/// - `mt * tp > 100` is saturated and always succeeds
/// - `mt <= 0` can never succeed
///
/// # Example
/// ```
/// use aimtp::probability::hit_probability;
///
/// assert_eq!(hit_probability(0.0, 0.2, 5.0), 1.0);
/// assert_eq!(hit_probability(3.0, 0.0, 5.0), 0.0);
///
/// let p = hit_probability(3.0, 0.2, 5.0);
/// assert!(p > 0.0 && p < 1.0);
/// ```
pub fn hit_probability(d: f64, mt: f64, tp: f64) -> f64 {
    if d == 0.0 {
        return 1.0;
    }

    if mt * tp > SATURATION_EXPONENT {
        return 1.0;
    }

    if mt <= 0.0 {
        return 0.0;
    }

    let precision = (PRECISION_SCALE / d) * ((mt * tp).exp2() - 1.0);
    erf(precision / SQRT_2).clamp(0.0, 1.0)
}

/// Index of performance `log2(relative_d + 1) / mt`
pub fn index_of_performance(relative_d: f64, mt: f64) -> f64 {
    (relative_d + 1.0).log2() / (mt + IP_EPSILON)
}

/// Movement time lengthened by cheesing at `cheese_level`
pub fn cheesed_movement_time(mt: f64, cheese_level: f64, cheesable_ratio: f64) -> f64 {
    mt * (1.0 + cheese_level * cheesable_ratio)
}
