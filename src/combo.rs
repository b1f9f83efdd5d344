//! Segment difficulty profile
//!
//! For each fraction `i / 20` of the map, find the contiguous stretch of that
//! relative length that is easiest to full combo and record the throughput
//! it needs. The result approximates the skill needed to hold a combo for a
//! given share of the map.

use crate::config::{AimConfig, DIFFICULTY_COUNT};
use crate::error::Result;
use crate::movement::Movement;
use crate::throughput::fc_time_tp;

/// Half-open index range of window `offset` in difficulty bucket `bucket`
///
/// `bucket` runs `1..=20` and `offset` runs `0..=20 - bucket`. Indices map
/// proportionally onto a sequence of `len` movements; the end index drops
/// the last movement of the proportional span, and a window whose end falls
/// at or before its start is empty.
pub fn window_bounds(len: usize, bucket: usize, offset: usize) -> (usize, usize) {
    let start = len * offset / DIFFICULTY_COUNT;
    let end = (len * (offset + bucket) / DIFFICULTY_COUNT).saturating_sub(1);
    (start, end.max(start))
}

/// Minimum expected-time throughput over every window of each relative length
///
/// `combo_tps[i - 1]` covers windows spanning `i / 20` of the sequence.
pub fn combo_tps(movements: &[Movement], config: &AimConfig) -> Result<[f64; DIFFICULTY_COUNT]> {
    let mut tps = [0.0; DIFFICULTY_COUNT];

    for bucket in 1..=DIFFICULTY_COUNT {
        let mut min_tp = f64::INFINITY;

        for offset in 0..=DIFFICULTY_COUNT - bucket {
            let (start, end) = window_bounds(movements.len(), bucket, offset);
            let tp = fc_time_tp(&movements[start..end], config)?;
            min_tp = min_tp.min(tp);
        }

        tps[bucket - 1] = min_tp;
    }

    tracing::trace!(?tps, "combo throughput profile");
    Ok(tps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds_full_map() {
        assert_eq!(window_bounds(100, 20, 0), (0, 99));
    }

    #[test]
    fn test_window_bounds_proportional() {
        assert_eq!(window_bounds(100, 1, 0), (0, 4));
        assert_eq!(window_bounds(100, 1, 19), (95, 99));
        assert_eq!(window_bounds(100, 10, 5), (25, 74));
    }

    #[test]
    fn test_window_bounds_small_sequence_collapses() {
        assert_eq!(window_bounds(5, 1, 0), (0, 0));
        assert_eq!(window_bounds(5, 4, 0), (0, 0));
        assert_eq!(window_bounds(5, 8, 0), (0, 1));
        assert_eq!(window_bounds(5, 20, 0), (0, 4));
    }

    #[test]
    fn test_window_bounds_stay_in_range() {
        for len in 0..60 {
            for bucket in 1..=DIFFICULTY_COUNT {
                for offset in 0..=DIFFICULTY_COUNT - bucket {
                    let (start, end) = window_bounds(len, bucket, offset);
                    assert!(start <= end && end <= len);
                }
            }
        }
    }

    #[test]
    fn test_combo_tps_uniform_map() {
        let config = AimConfig::default();
        let movements: Vec<Movement> = (0..400)
            .map(|i| Movement::new(i as f64 * 0.15, 4.0, 0.15, 0.15))
            .collect();

        let tps = combo_tps(&movements, &config).unwrap();

        // Longer stretches of the same pattern need at least as much skill
        for pair in tps.windows(2) {
            assert!(pair[1] >= pair[0] - 1e-9);
        }
        assert!((tps[19] - fc_time_tp(&movements[0..399], &config).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_combo_tps_empty_windows_need_tp_min() {
        let config = AimConfig::default();
        let movements: Vec<Movement> = (0..5)
            .map(|i| Movement::new(i as f64 * 0.1, 5.0, 0.1, 0.1))
            .collect();

        let tps = combo_tps(&movements, &config).unwrap();
        assert_eq!(tps[0], config.tp_min);
    }
}
