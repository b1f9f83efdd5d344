//! Aim attribute calculator
//!
//! Runs the full pipeline over one movement sequence:
//!
//! 1. `fc_prob_tp` at the default cheese level
//! 2. `fc_time_tp`
//! 3. diagnostic trace at `fc_prob_tp`
//! 4. combo profile
//! 5. miss curve below `fc_time_tp`
//! 6. cheese curve relative to `fc_prob_tp`
//! 7. cheese note count at `fc_prob_tp`
//!
//! Every stage is a pure function of the movements and the configuration;
//! calling the calculator twice on the same input gives bit-identical output.

use crate::attributes::AimAttributes;
use crate::cheese::{cheese_levels_cheese_factors, cheese_note_count};
use crate::combo::combo_tps;
use crate::config::AimConfig;
use crate::error::Result;
use crate::graph_output::graph_text;
use crate::miss::miss_tps_miss_counts;
use crate::movement::{Movement, MovementExtractor};
use crate::throughput::{fc_prob_tp, fc_time_tp};

/// Computes `AimAttributes` for movement sequences
#[derive(Debug, Clone, Default)]
pub struct AimCalculator {
    config: AimConfig,
}

impl AimCalculator {
    /// Create a calculator, validating the configuration
    pub fn new(config: AimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &AimConfig {
        &self.config
    }

    /// Calculate attributes for a chronological movement sequence
    ///
    /// An empty sequence yields `AimAttributes::default()` without running
    /// any inversion.
    ///
    /// # Example
    /// ```
    /// use aimtp::{AimCalculator, Movement};
    ///
    /// let movements: Vec<Movement> = (0..64)
    ///     .map(|i| Movement::new(i as f64 * 0.2, 3.0, 0.2, 0.2))
    ///     .collect();
    ///
    /// let attributes = AimCalculator::default().calculate(&movements).unwrap();
    /// assert!(attributes.fc_prob_tp > 0.1 && attributes.fc_prob_tp < 100.0);
    /// assert_eq!(attributes.graph_text.lines().count(), 64);
    /// ```
    pub fn calculate(&self, movements: &[Movement]) -> Result<AimAttributes> {
        if movements.is_empty() {
            tracing::debug!("empty movement sequence, returning zero attributes");
            return Ok(AimAttributes::default());
        }

        let config = &self.config;
        let cheese_level = config.default_cheese_level;

        let fc_prob_tp = fc_prob_tp(movements, cheese_level, config)?;
        tracing::debug!(movements = movements.len(), fc_prob_tp, "probability inversion");

        let fc_time_tp = fc_time_tp(movements, config)?;
        tracing::debug!(fc_time_tp, "expected-time inversion");

        let graph_text = graph_text(movements, fc_prob_tp, cheese_level);

        let combo_tps = combo_tps(movements, config)?;
        tracing::debug!(hardest = combo_tps[0], full = combo_tps[19], "combo profile");

        let (miss_tps, miss_counts) = miss_tps_miss_counts(movements, fc_time_tp, config)?;

        let (cheese_levels, cheese_factors) =
            cheese_levels_cheese_factors(movements, fc_prob_tp, config)?;

        let cheese_note_count = cheese_note_count(movements, fc_prob_tp);
        tracing::debug!(cheese_note_count, "cheese model");

        Ok(AimAttributes {
            fc_prob_tp,
            fc_time_tp,
            combo_tps,
            miss_tps,
            miss_counts,
            cheese_note_count,
            cheese_levels,
            cheese_factors,
            graph_text,
        })
    }

    /// Extract movements upstream, then calculate their attributes
    ///
    /// `tap_strain` and `clock_rate` go to the extractor untouched.
    pub fn calculate_from<E>(
        &self,
        extractor: &E,
        tap_strain: &[f64],
        clock_rate: f64,
    ) -> Result<AimAttributes>
    where
        E: MovementExtractor + ?Sized,
    {
        let movements = extractor.extract(tap_strain, clock_rate);
        self.calculate(&movements)
    }
}
