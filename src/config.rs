//! Calculator configuration
//!
//! Every tunable constant of the throughput inversion lives here so that a
//! single `AimConfig` value fully determines the output for a given movement
//! sequence. Defaults reproduce the canonical aim model.
//!
//! # Example aimtp.toml
//!
//! ```toml
//! tp_min = 0.1
//! tp_max = 100.0
//! probability_threshold = 0.02
//! default_cheese_level = 0.3
//! ```

use crate::error::{AimError, Result as AimResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Number of difficulty buckets in the combo profile
pub const DIFFICULTY_COUNT: usize = 20;

/// Number of evenly spaced cheese levels in `[0, 1]`
pub const CHEESE_LEVEL_COUNT: usize = 11;

/// Configuration for the aim throughput calculator
///
/// # Example
/// ```
/// use aimtp::config::AimConfig;
///
/// let config = AimConfig::default();
/// assert_eq!(config.probability_threshold, 0.02);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AimConfig {
    /// Lower throughput bound; inversions never return less
    pub tp_min: f64,

    /// Upper throughput bound; inversions never return more
    pub tp_max: f64,

    /// Full-combo probability the probability inversion solves for
    pub probability_threshold: f64,

    /// Base time budget (seconds) added to the map duration for the
    /// expected-time inversion
    pub time_threshold_base: f64,

    /// Fixed setup cost `E₀` (seconds) seeding the expected-time recurrence
    pub base_expected_time: f64,

    /// Cheese level used by the baseline probability inversion, the miss
    /// estimator and the diagnostic trace
    pub default_cheese_level: f64,

    /// Absolute x-tolerance of the bounded root finder
    pub root_tolerance: f64,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            tp_min: 0.1,
            tp_max: 100.0,
            probability_threshold: 0.02,
            time_threshold_base: 3600.0,
            base_expected_time: 5.0,
            default_cheese_level: 0.3,
            root_tolerance: 1e-8,
        }
    }
}

impl AimConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string, then validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> AimResult<()> {
        if !(self.tp_min > 0.0 && self.tp_min < self.tp_max && self.tp_max.is_finite()) {
            return Err(AimError::InvalidConfig(format!(
                "throughput bounds must satisfy 0 < tp_min < tp_max, got [{}, {}]",
                self.tp_min, self.tp_max
            )));
        }

        if !(self.probability_threshold > 0.0 && self.probability_threshold < 1.0) {
            return Err(AimError::InvalidConfig(format!(
                "probability_threshold must be in (0, 1), got {}",
                self.probability_threshold
            )));
        }

        if !(self.time_threshold_base > 0.0) {
            return Err(AimError::InvalidConfig(format!(
                "time_threshold_base must be positive, got {}",
                self.time_threshold_base
            )));
        }

        if !(self.base_expected_time > 0.0) {
            return Err(AimError::InvalidConfig(format!(
                "base_expected_time must be positive, got {}",
                self.base_expected_time
            )));
        }

        if !(0.0..=1.0).contains(&self.default_cheese_level) {
            return Err(AimError::InvalidConfig(format!(
                "default_cheese_level must be in [0, 1], got {}",
                self.default_cheese_level
            )));
        }

        if !(self.root_tolerance > 0.0) {
            return Err(AimError::InvalidConfig(format!(
                "root_tolerance must be positive, got {}",
                self.root_tolerance
            )));
        }

        Ok(())
    }

    /// Clamp a throughput value into `[tp_min, tp_max]`
    pub fn clamp_tp(&self, tp: f64) -> f64 {
        tp.clamp(self.tp_min, self.tp_max)
    }
}
