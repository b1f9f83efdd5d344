//! Diagnostic graph text
//!
//! One line per movement, in chronological order:
//!
//! ```text
//! {time} {raw_ip} {corrected_ip} {miss_probability}
//! ```
//!
//! `raw_ip` is the movement's precomputed index of performance,
//! `corrected_ip` recomputes it with the cheese-lengthened movement time and
//! `miss_probability` is evaluated at the baseline probability throughput.
//! There is no header row and fields are plain numbers.

use crate::movement::Movement;
use crate::probability::{cheesed_movement_time, hit_probability, index_of_performance};

/// A single row of the diagnostic trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphLine {
    pub time: f64,
    pub raw_ip: f64,
    pub corrected_ip: f64,
    pub miss_probability: f64,
}

impl GraphLine {
    /// Evaluate a movement at throughput `tp` and `cheese_level`
    pub fn from_movement(movement: &Movement, tp: f64, cheese_level: f64) -> Self {
        let mt = cheesed_movement_time(
            movement.movement_time,
            cheese_level,
            movement.cheesable_ratio,
        );

        Self {
            time: movement.time,
            raw_ip: movement.ip12,
            corrected_ip: index_of_performance(movement.distance, mt),
            miss_probability: 1.0 - hit_probability(movement.distance, mt, tp),
        }
    }

    fn format(&self) -> String {
        format!(
            "{} {} {} {}",
            self.time, self.raw_ip, self.corrected_ip, self.miss_probability
        )
    }
}

/// Diagnostic trace formatter
#[derive(Debug, Default)]
pub struct GraphOutput {
    lines: Vec<GraphLine>,
}

impl GraphOutput {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the trace for a whole movement sequence
    pub fn from_movements(movements: &[Movement], tp: f64, cheese_level: f64) -> Self {
        Self {
            lines: movements
                .iter()
                .map(|m| GraphLine::from_movement(m, tp, cheese_level))
                .collect(),
        }
    }

    /// Add a row to the trace
    pub fn add_line(&mut self, line: GraphLine) {
        self.lines.push(line);
    }

    /// Rows in insertion order
    pub fn lines(&self) -> &[GraphLine] {
        &self.lines
    }

    /// Render the trace, every line newline-terminated
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        for line in &self.lines {
            output.push_str(&line.format());
            output.push('\n');
        }

        output
    }
}

/// Render the diagnostic trace for `movements`
pub fn graph_text(movements: &[Movement], tp: f64, cheese_level: f64) -> String {
    GraphOutput::from_movements(movements, tp, cheese_level).to_text()
}
