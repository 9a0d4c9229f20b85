//! Parameter structures for DILI simulation runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::model::{ModelVariant, VariantConfig};
use crate::scoring::{RiskThresholds, ScoreWeights};

/// Top-level parameters container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Dose, duration and sampling
    pub simulation: SimulationParameters,
    /// Model variant name (`bioactivation`, `oxidative`, `genotoxic`)
    pub variant: String,
    /// Optional replacement weights/thresholds for the chosen variant
    pub scoring: ScoringOverrides,
}

impl Parameters {
    /// Load parameters from a JSON file, or use defaults if the file is
    /// missing or malformed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded simulation parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse simulation parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Simulation parameters file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Load parameters from a JSON file, propagating I/O and parse errors
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let params = serde_json::from_str(&contents)?;
        log::info!("Loaded simulation parameters from {:?}", path.as_ref());
        Ok(params)
    }

    /// Resolve the variant name and apply scoring overrides
    pub fn variant_config(&self) -> std::result::Result<VariantConfig, ConfigurationError> {
        let mut config = ModelVariant::from_name(&self.variant)?.config();
        if let Some(weights) = self.scoring.weights {
            config = config.with_weights(weights)?;
        }
        if let Some(thresholds) = self.scoring.thresholds {
            config = config.with_thresholds(thresholds)?;
        }
        Ok(config)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            simulation: SimulationParameters::default(),
            variant: ModelVariant::Bioactivation.name().to_string(),
            scoring: ScoringOverrides::default(),
        }
    }
}

/// Per-run simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Dose level (typical range 0.1-3.0)
    pub dose: f64,
    /// Simulated time span in hours (typical 12-96)
    pub duration_hours: u32,
    /// Number of evenly spaced output samples including t=0 and t=duration
    pub sample_count: usize,
}

impl SimulationParameters {
    /// Reject parameters the core cannot simulate
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        if self.sample_count < 2 {
            return Err(ConfigurationError::SampleCount(self.sample_count));
        }
        if self.duration_hours == 0 {
            return Err(ConfigurationError::Duration(self.duration_hours));
        }
        if !self.dose.is_finite() || self.dose <= 0.0 {
            return Err(ConfigurationError::Dose(self.dose));
        }
        Ok(())
    }

    /// Evenly spaced sample times over `[0, duration]`.
    ///
    /// The last entry is exactly `duration_hours`.
    pub fn sample_times(&self) -> Vec<f64> {
        let duration = self.duration_hours as f64;
        let n = self.sample_count;
        if n < 2 {
            return vec![0.0; n];
        }
        let last = (n - 1) as f64;
        (0..n)
            .map(|i| {
                if i == n - 1 {
                    duration
                } else {
                    duration * i as f64 / last
                }
            })
            .collect()
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            dose: 1.0,
            duration_hours: 48,
            sample_count: 300,
        }
    }
}

/// Explicit replacements for a variant's scoring configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringOverrides {
    pub weights: Option<ScoreWeights>,
    pub thresholds: Option<RiskThresholds>,
}
