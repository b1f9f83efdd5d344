//! Aim attribute output
//!
//! The fixed-shape result of one calculation: baseline throughputs, the
//! combo profile, the miss curve, the cheese curve and the diagnostic trace.

use crate::config::{CHEESE_LEVEL_COUNT, DIFFICULTY_COUNT};
use serde::{Deserialize, Serialize};

/// Aim attributes of a movement sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AimAttributes {
    /// Throughput at which the full-combo probability hits the threshold
    pub fc_prob_tp: f64,
    /// Throughput at which the expected full-combo time meets the budget
    pub fc_time_tp: f64,
    /// Hardest-window throughput for each relative combo length `i / 20`
    pub combo_tps: [f64; DIFFICULTY_COUNT],
    /// Throughput levels below `fc_time_tp`
    pub miss_tps: [f64; DIFFICULTY_COUNT],
    /// Estimated miss count at each of `miss_tps`
    pub miss_counts: [f64; DIFFICULTY_COUNT],
    /// Smooth count of movements likely to be cheesed
    pub cheese_note_count: f64,
    /// Cheese levels `0.0..=1.0`
    pub cheese_levels: [f64; CHEESE_LEVEL_COUNT],
    /// Required-throughput factor at each cheese level
    pub cheese_factors: [f64; CHEESE_LEVEL_COUNT],
    /// Per-movement diagnostic trace
    pub graph_text: String,
}

impl Default for AimAttributes {
    fn default() -> Self {
        Self {
            fc_prob_tp: 0.0,
            fc_time_tp: 0.0,
            combo_tps: [0.0; DIFFICULTY_COUNT],
            miss_tps: [0.0; DIFFICULTY_COUNT],
            miss_counts: [0.0; DIFFICULTY_COUNT],
            cheese_note_count: 0.0,
            cheese_levels: [0.0; CHEESE_LEVEL_COUNT],
            cheese_factors: [0.0; CHEESE_LEVEL_COUNT],
            graph_text: String::new(),
        }
    }
}

fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.3}", v))
        .collect::<Vec<_>>()
        .join(" ")
}

impl AimAttributes {
    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Aim Attributes ===\n\n");
        report.push_str(&format!("FC probability TP: {:.4}\n", self.fc_prob_tp));
        report.push_str(&format!("FC time TP:        {:.4}\n", self.fc_time_tp));
        report.push_str(&format!(
            "Cheese notes:      {:.2}\n",
            self.cheese_note_count
        ));

        report.push_str("\nCombo TPs (1/20 .. 20/20 of map):\n");
        for chunk in self.combo_tps.chunks(5) {
            report.push_str(&format!("  {}\n", join_values(chunk)));
        }

        report.push_str("\nMiss curve (TP -> misses):\n");
        for (tp, count) in self.miss_tps.iter().zip(self.miss_counts.iter()) {
            report.push_str(&format!("  {:>8.3} -> {:.2}\n", tp, count));
        }

        report.push_str("\nCheese curve (level -> factor):\n");
        for (level, factor) in self.cheese_levels.iter().zip(self.cheese_factors.iter()) {
            report.push_str(&format!("  {:.1} -> {:.4}\n", level, factor));
        }

        report.push_str(&format!(
            "\nDiagnostic trace: {} lines\n",
            self.graph_text.lines().count()
        ));

        report
    }
}
