//! Movement records and their input document
//!
//! Movements are produced upstream from hit-object geometry and timing and
//! are consumed read-only by every stage of the pipeline. All times are in
//! seconds.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single aim movement towards a target object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// Timestamp of the target object (chronological ordering key)
    pub time: f64,
    /// Normalized target separation; 0 means stationary
    pub distance: f64,
    /// Effective time allotted to execute the movement
    pub movement_time: f64,
    /// Unadjusted time delta used for expected-time accounting
    pub raw_movement_time: f64,
    /// Fraction by which `movement_time` may be lengthened by cheesing
    #[serde(default)]
    pub cheesable_ratio: f64,
    /// How exploitable this movement is, independent of the ratio
    #[serde(default)]
    pub cheesability: f64,
    /// Precomputed index of performance, diagnostics only
    #[serde(default)]
    pub ip12: f64,
}

impl Movement {
    /// Create a movement without cheese metadata
    pub fn new(time: f64, distance: f64, movement_time: f64, raw_movement_time: f64) -> Self {
        Self {
            time,
            distance,
            movement_time,
            raw_movement_time,
            cheesable_ratio: 0.0,
            cheesability: 0.0,
            ip12: 0.0,
        }
    }

    /// Attach cheese metadata
    pub fn with_cheese(mut self, cheesable_ratio: f64, cheesability: f64) -> Self {
        self.cheesable_ratio = cheesable_ratio;
        self.cheesability = cheesability;
        self
    }

    /// Attach the precomputed index of performance
    pub fn with_ip12(mut self, ip12: f64) -> Self {
        self.ip12 = ip12;
        self
    }
}

/// Upstream producer of movement records
///
/// Building movements from raw hit objects happens outside this crate. The
/// tap strain vector and clock rate are handed through without being
/// interpreted here.
pub trait MovementExtractor {
    fn extract(&self, tap_strain: &[f64], clock_rate: f64) -> Vec<Movement>;
}

/// Precomputed movements ignore tap strain and clock rate
impl MovementExtractor for [Movement] {
    fn extract(&self, _tap_strain: &[f64], _clock_rate: f64) -> Vec<Movement> {
        self.to_vec()
    }
}

impl MovementExtractor for Vec<Movement> {
    fn extract(&self, tap_strain: &[f64], clock_rate: f64) -> Vec<Movement> {
        self.as_slice().extract(tap_strain, clock_rate)
    }
}

/// Input document: movements plus the auxiliary upstream values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementInput {
    pub movements: Vec<Movement>,
    #[serde(default)]
    pub tap_strain: Vec<f64>,
    #[serde(default = "default_clock_rate")]
    pub clock_rate: f64,
}

fn default_clock_rate() -> f64 {
    1.0
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InputDocument {
    Full(MovementInput),
    Bare(Vec<Movement>),
}

impl MovementInput {
    /// Load a movement document from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_json_str(&content)
            .with_context(|| format!("Failed to load movements from {}", path.display()))
    }

    /// Parse a movement document
    ///
    /// Accepts either the full `{ "movements": [...], ... }` object or a bare
    /// array of movements.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: InputDocument =
            serde_json::from_str(content).context("Failed to parse movement JSON")?;

        let input = match document {
            InputDocument::Full(input) => input,
            InputDocument::Bare(movements) => Self {
                movements,
                tap_strain: Vec::new(),
                clock_rate: default_clock_rate(),
            },
        };

        input.check_order()?;
        Ok(input)
    }

    fn check_order(&self) -> Result<()> {
        if let Some(i) = self
            .movements
            .windows(2)
            .position(|pair| pair[1].time < pair[0].time)
        {
            anyhow::bail!(
                "Movements must be chronological: movement {} at t={} precedes movement {} at t={}",
                i + 1,
                self.movements[i + 1].time,
                i,
                self.movements[i].time
            );
        }
        Ok(())
    }
}
