//! Configuration module for loading simulation parameters.
//!
//! Parameters come from a JSON file (or defaults) and are overridden by CLI
//! flags in the binary.

mod parameters;

pub use parameters::{Parameters, ScoringOverrides, SimulationParameters};
