//! Model variants.
//!
//! Three configurations of the hepatotoxicity model are in use. They differ
//! in rate constants, in what the stress slot tracks, in which modifiers
//! they model, and in how the terminal state is scored:
//!
//! | Variant          | Stress slot | Modifiers       | Thresholds  |
//! |------------------|-------------|-----------------|-------------|
//! | `bioactivation`  | mito        | idiosyncratic   | 0.60 / 1.5  |
//! | `oxidative`      | mito        | antioxidant     | 0.60 / 1.5  |
//! | `genotoxic`      | DNA damage  | none            | 0.75 / 1.5  |
//!
//! Each variant is one `VariantConfig` value; there is a single dynamics
//! implementation that reads its behaviour from the config.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rates::RateConstants;
use super::{StateLayout, StressMarker};
use crate::error::ConfigurationError;
use crate::scoring::{RiskThresholds, ScoreWeights};

/// Named model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    /// CYP450 bioactivation with idiosyncratic sensitivity (variant A)
    Bioactivation,
    /// Oxidative stress with antioxidant clearance (variant B)
    Oxidative,
    /// DNA damage in place of mitochondrial stress (variant C)
    Genotoxic,
}

impl ModelVariant {
    /// All variants in registry order
    pub const ALL: [ModelVariant; 3] = [
        ModelVariant::Bioactivation,
        ModelVariant::Oxidative,
        ModelVariant::Genotoxic,
    ];

    /// Registry name
    pub fn name(&self) -> &'static str {
        match self {
            ModelVariant::Bioactivation => "bioactivation",
            ModelVariant::Oxidative => "oxidative",
            ModelVariant::Genotoxic => "genotoxic",
        }
    }

    /// Parse a variant name (case-insensitive, `a`/`b`/`c` accepted)
    pub fn from_name(name: &str) -> Result<Self, ConfigurationError> {
        match name.trim().to_lowercase().as_str() {
            "bioactivation" | "a" => Ok(ModelVariant::Bioactivation),
            "oxidative" | "b" => Ok(ModelVariant::Oxidative),
            "genotoxic" | "c" => Ok(ModelVariant::Genotoxic),
            _ => Err(ConfigurationError::UnknownVariant(name.to_string())),
        }
    }

    /// Default configuration for this variant
    pub fn config(&self) -> VariantConfig {
        match self {
            ModelVariant::Bioactivation => VariantConfig {
                variant: *self,
                layout: StateLayout::new(StressMarker::Mitochondrial),
                rates: RateConstants::bioactivation(),
                weights: ScoreWeights::bioactivation(),
                thresholds: RiskThresholds::STANDARD,
                features: VariantFeatures {
                    idiosyncratic: true,
                    antioxidant: false,
                    dominant_pathway: false,
                },
            },
            ModelVariant::Oxidative => VariantConfig {
                variant: *self,
                layout: StateLayout::new(StressMarker::Mitochondrial),
                rates: RateConstants::oxidative(),
                weights: ScoreWeights::oxidative(),
                thresholds: RiskThresholds::STANDARD,
                features: VariantFeatures {
                    idiosyncratic: false,
                    antioxidant: true,
                    dominant_pathway: true,
                },
            },
            ModelVariant::Genotoxic => VariantConfig {
                variant: *self,
                layout: StateLayout::new(StressMarker::DnaDamage),
                rates: RateConstants::genotoxic(),
                weights: ScoreWeights::genotoxic(),
                thresholds: RiskThresholds::CONSERVATIVE,
                features: VariantFeatures {
                    idiosyncratic: false,
                    antioxidant: false,
                    dominant_pathway: false,
                },
            },
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelVariant {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Optional terms a variant models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantFeatures {
    /// Sinusoidal sensitivity on cholestasis and necrosis
    pub idiosyncratic: bool,
    /// Extra ROS clearance for antioxidant compounds
    pub antioxidant: bool,
    /// Report the dominant injury pathway
    pub dominant_pathway: bool,
}

/// Complete configuration of one model variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantConfig {
    pub variant: ModelVariant,
    pub layout: StateLayout,
    pub rates: RateConstants,
    pub weights: ScoreWeights,
    pub thresholds: RiskThresholds,
    pub features: VariantFeatures,
}

impl VariantConfig {
    /// Replace the score weights (validated)
    pub fn with_weights(mut self, weights: ScoreWeights) -> Result<Self, ConfigurationError> {
        weights.validate()?;
        let total = weights.total();
        if (total - 1.0).abs() > 1e-9 {
            log::debug!("Score weights for {} sum to {:.4}, not 1.0", self.variant, total);
        }
        self.weights = weights;
        Ok(self)
    }

    /// Replace the risk thresholds (validated)
    pub fn with_thresholds(
        mut self,
        thresholds: RiskThresholds,
    ) -> Result<Self, ConfigurationError> {
        thresholds.validate()?;
        self.thresholds = thresholds;
        Ok(self)
    }
}

/// Registry of available model variants.
pub struct VariantRegistry;

impl VariantRegistry {
    /// List available variant names
    pub fn list_models() -> Vec<&'static str> {
        ModelVariant::ALL.iter().map(|v| v.name()).collect()
    }

    /// Create the default configuration for a named variant
    pub fn create(name: &str) -> Result<VariantConfig, ConfigurationError> {
        ModelVariant::from_name(name).map(|v| v.config())
    }

    /// Help text for a variant
    pub fn help(name: &str) -> Option<&'static str> {
        match ModelVariant::from_name(name).ok()? {
            ModelVariant::Bioactivation => Some(
                "Bioactivation Model (A)\n\
                 CYP450 conversion with 3% toxic metabolite yield\n\
                 Modifiers: idiosyncratic sensitivity on cholestasis/necrosis\n\
                 Thresholds: LOW < 0.60 <= MODERATE < 1.5 <= HIGH"
            ),
            ModelVariant::Oxidative => Some(
                "Oxidative Stress Model (B)\n\
                 Full metabolite yield, faster GSH conjugation\n\
                 Modifiers: antioxidant ROS clearance; reports dominant pathway\n\
                 Thresholds: LOW < 0.60 <= MODERATE < 1.5 <= HIGH"
            ),
            ModelVariant::Genotoxic => Some(
                "Genotoxic Model (C)\n\
                 Tracks DNA damage in place of mitochondrial stress\n\
                 Modifiers: none\n\
                 Thresholds: LOW < 0.75 <= MODERATE < 1.5 <= HIGH"
            ),
        }
    }
}
