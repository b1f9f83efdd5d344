//! aimtp - Probabilistic aim-skill estimation for rhythm-game maps
//!
//! This library turns a sequence of aim movements into the player
//! throughput needed to full combo it, plus the auxiliary curves used by
//! downstream rating systems: combo length vs. difficulty, miss count vs.
//! throughput and cheese sensitivity.

pub mod attributes;
pub mod calculator;
pub mod cheese;
pub mod cli;
pub mod combo;
pub mod config;
pub mod error;
pub mod graph_output;
pub mod miss;
pub mod movement;
pub mod poisson_binomial;
pub mod probability;
pub mod roots;
pub mod throughput;

pub use attributes::AimAttributes;
pub use calculator::AimCalculator;
pub use config::AimConfig;
pub use error::AimError;
pub use movement::{Movement, MovementExtractor, MovementInput};
