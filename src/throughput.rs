//! Throughput inversion
//!
//! Turns a movement sequence into the throughput at which
//! - the full-combo probability equals `probability_threshold`, or
//! - the expected time to obtain a full combo equals the time budget.
//!
//! Both quantities are monotone in throughput, so each inversion clamps to
//! the configured bounds when the threshold is out of reach and otherwise
//! runs the bracketed root finder on `[tp_min, tp_max]`.

use crate::config::AimConfig;
use crate::error::Result;
use crate::movement::Movement;
use crate::probability::{cheesed_movement_time, hit_probability};
use crate::roots::find_root;

/// Guard against dividing by an exactly zero hit probability
const PROBABILITY_EPSILON: f64 = 1e-10;

/// Probability of hitting every movement at throughput `tp`
///
/// Movement times are lengthened by `cheese_level` times each movement's
/// cheesable ratio. Movements are treated as independent trials.
pub fn fc_probability(movements: &[Movement], tp: f64, cheese_level: f64) -> f64 {
    movements
        .iter()
        .map(|m| {
            let mt = cheesed_movement_time(m.movement_time, cheese_level, m.cheesable_ratio);
            hit_probability(m.distance, mt, tp)
        })
        .product()
}

/// Throughput at which the full-combo probability reaches the threshold
///
/// Returns `tp_min` when the map is full-combo-able at minimum skill and
/// `tp_max` when the threshold cannot be reached at all.
pub fn fc_prob_tp(movements: &[Movement], cheese_level: f64, config: &AimConfig) -> Result<f64> {
    let threshold = config.probability_threshold;

    if fc_probability(movements, config.tp_min, cheese_level) >= threshold {
        return Ok(config.tp_min);
    }

    if fc_probability(movements, config.tp_max, cheese_level) <= threshold {
        return Ok(config.tp_max);
    }

    let tp = find_root(
        |tp| fc_probability(movements, tp, cheese_level) - threshold,
        config.tp_min,
        config.tp_max,
        config.root_tolerance,
    )?;

    Ok(config.clamp_tp(tp))
}

/// Natural log of the expected time needed to obtain a full combo
///
/// Each movement is a renewal gate: a miss restarts the whole attempt, so
/// `E_i = (E_{i-1} + raw_mt_i) / p_i` starting from `E_0 = base_expected_time`.
/// The recurrence runs in log space so that long or impossible maps stay
/// finite.
pub fn log_expected_fc_time(movements: &[Movement], tp: f64, config: &AimConfig) -> f64 {
    movements
        .iter()
        .fold(config.base_expected_time.ln(), |log_time, m| {
            // ln(E + raw) without leaving log space; negative deltas add nothing
            let raw = m.raw_movement_time.max(0.0);
            let log_sum = log_time + (raw * (-log_time).exp()).ln_1p();
            let p = hit_probability(m.distance, m.movement_time, tp);
            log_sum - (p + PROBABILITY_EPSILON).ln()
        })
}

/// Expected time needed to obtain a full combo at throughput `tp`
///
/// May be `f64::INFINITY` for maps that are far out of reach.
pub fn expected_fc_time(movements: &[Movement], tp: f64, config: &AimConfig) -> f64 {
    log_expected_fc_time(movements, tp, config).exp()
}

/// Time budget for the expected-time inversion: base budget plus map length
pub fn time_threshold(movements: &[Movement], config: &AimConfig) -> f64 {
    let duration = match (movements.first(), movements.last()) {
        (Some(first), Some(last)) => last.time - first.time,
        _ => 0.0,
    };
    config.time_threshold_base + duration
}

/// Throughput at which the expected full-combo time meets the time budget
///
/// An empty sequence needs no skill and yields `tp_min`.
pub fn fc_time_tp(movements: &[Movement], config: &AimConfig) -> Result<f64> {
    if movements.is_empty() {
        return Ok(config.tp_min);
    }

    let log_threshold = time_threshold(movements, config).ln();
    let excess = |tp: f64| log_expected_fc_time(movements, tp, config) - log_threshold;

    if excess(config.tp_min) <= 0.0 {
        return Ok(config.tp_min);
    }

    if excess(config.tp_max) >= 0.0 {
        return Ok(config.tp_max);
    }

    let tp = find_root(
        excess,
        config.tp_min,
        config.tp_max,
        config.root_tolerance,
    )?;

    Ok(config.clamp_tp(tp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::function::erf::erf_inv;

    fn stream(count: usize, distance: f64, mt: f64) -> Vec<Movement> {
        (0..count)
            .map(|i| Movement::new(i as f64 * mt, distance, mt, mt))
            .collect()
    }

    #[test]
    fn test_fc_probability_is_product() {
        let movements = vec![
            Movement::new(0.0, 2.0, 0.2, 0.2),
            Movement::new(0.2, 3.0, 0.25, 0.25),
        ];
        let expected = hit_probability(2.0, 0.2, 4.0) * hit_probability(3.0, 0.25, 4.0);
        assert!((fc_probability(&movements, 4.0, 0.0) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_cheese_raises_fc_probability() {
        let movements: Vec<Movement> = stream(10, 3.0, 0.2)
            .into_iter()
            .map(|m| m.with_cheese(0.5, 1.0))
            .collect();
        assert!(fc_probability(&movements, 5.0, 1.0) > fc_probability(&movements, 5.0, 0.0));
    }

    #[test]
    fn test_single_movement_round_trip() {
        let config = AimConfig::default();
        let movements = vec![Movement::new(0.0, 5.0, 0.3, 0.3)];

        let tp = fc_prob_tp(&movements, 0.0, &config).unwrap();

        // erf(2.066/5 * (2^(0.3 tp) - 1) / sqrt 2) = 0.02
        let expected = (1.0 + erf_inv(0.02) * std::f64::consts::SQRT_2 * 5.0 / 2.066).log2() / 0.3;
        assert!((tp - expected).abs() < 1e-6, "tp={tp} expected={expected}");
    }

    #[test]
    fn test_fc_prob_tp_trivial_map_is_tp_min() {
        let config = AimConfig::default();
        let movements = stream(50, 0.0, 0.1);
        assert_eq!(fc_prob_tp(&movements, 0.3, &config).unwrap(), config.tp_min);
    }

    #[test]
    fn test_fc_prob_tp_impossible_map_is_tp_max() {
        let config = AimConfig::default();
        let movements = stream(5, 3.0, 0.0);
        assert_eq!(fc_prob_tp(&movements, 0.3, &config).unwrap(), config.tp_max);
    }

    #[test]
    fn test_fc_prob_tp_hits_threshold() {
        let config = AimConfig::default();
        let movements = stream(200, 4.0, 0.15);
        let tp = fc_prob_tp(&movements, 0.0, &config).unwrap();
        assert!(tp > config.tp_min && tp < config.tp_max);
        assert!((fc_probability(&movements, tp, 0.0) - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_expected_time_single_step() {
        let config = AimConfig::default();
        let movements = vec![Movement::new(0.0, 2.0, 0.3, 0.4)];
        let p = hit_probability(2.0, 0.3, 6.0);
        let expected = (5.0 + 0.4) / (p + 1e-10);
        let actual = expected_fc_time(&movements, 6.0, &config);
        assert!((actual - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_expected_time_matches_direct_recurrence() {
        let config = AimConfig::default();
        let movements = vec![
            Movement::new(0.0, 1.0, 0.2, 0.2),
            Movement::new(0.2, 4.0, 0.1, 0.2),
            Movement::new(0.4, 0.0, 0.2, 0.2),
            Movement::new(0.6, 2.5, 0.3, 0.3),
        ];
        let tp = 7.0;
        let direct = movements.iter().fold(5.0, |e, m| {
            (e + m.raw_movement_time) / (hit_probability(m.distance, m.movement_time, tp) + 1e-10)
        });
        let actual = expected_fc_time(&movements, tp, &config);
        assert!((actual - direct).abs() / direct < 1e-12);
    }

    #[test]
    fn test_negative_raw_delta_adds_no_time() {
        let config = AimConfig::default();
        let backwards = vec![Movement::new(0.0, 2.0, 0.3, -20.0)];
        let still = vec![Movement::new(0.0, 2.0, 0.3, 0.0)];

        let log_time = log_expected_fc_time(&backwards, 6.0, &config);
        assert!(log_time.is_finite());
        assert_eq!(log_time, log_expected_fc_time(&still, 6.0, &config));
    }

    #[test]
    fn test_log_expected_time_stays_finite() {
        let config = AimConfig::default();
        let movements = stream(5000, 8.0, 0.05);
        let log_time = log_expected_fc_time(&movements, config.tp_min, &config);
        assert!(log_time.is_finite());
        assert!(log_time > 1000.0);
    }

    #[test]
    fn test_time_threshold() {
        let config = AimConfig::default();
        let movements = stream(11, 1.0, 0.5);
        assert_eq!(time_threshold(&movements, &config), 3605.0);
        assert_eq!(time_threshold(&[], &config), 3600.0);
    }

    #[test]
    fn test_fc_time_tp_empty_is_tp_min() {
        let config = AimConfig::default();
        assert_eq!(fc_time_tp(&[], &config).unwrap(), config.tp_min);
    }

    #[test]
    fn test_fc_time_tp_meets_budget() {
        let config = AimConfig::default();
        let movements = stream(300, 4.0, 0.12);
        let tp = fc_time_tp(&movements, &config).unwrap();
        assert!(tp > config.tp_min && tp < config.tp_max);

        let budget = time_threshold(&movements, &config);
        let expected = expected_fc_time(&movements, tp, &config);
        assert!((expected - budget).abs() / budget < 1e-4);
    }

    #[test]
    fn test_fc_time_tp_harder_map_needs_more() {
        let config = AimConfig::default();
        let easy = stream(100, 2.0, 0.2);
        let hard = stream(100, 6.0, 0.2);
        assert!(fc_time_tp(&hard, &config).unwrap() > fc_time_tp(&easy, &config).unwrap());
    }

    #[test]
    fn test_fc_time_tp_impossible_map_is_tp_max() {
        let config = AimConfig::default();
        let movements = stream(5, 3.0, -0.1);
        assert_eq!(fc_time_tp(&movements, &config).unwrap(), config.tp_max);
    }
}
