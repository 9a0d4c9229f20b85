//! DILI risk scoring and classification.
//!
//! The terminal state of a simulation is reduced to one scalar:
//!
//! ```text
//! score = w_ros*ROS + w_alt*ALT + w_stress*stress + w_apop*apoptosis
//!       + w_necro*necrosis + w_fib*fibrosis + w_chol*cholestasis
//! ```
//!
//! and mapped to a tier with two thresholds. Boundaries belong to the upper
//! tier: `score == low` is MODERATE, `score == high` is HIGH.
//!
//! Weight sets and threshold pairs differ between model variants and are
//! kept as explicit named configurations. Score has no upper bound.

mod pathway;

pub use pathway::{dominant_pathway, explain_pathway, DominantPathway, GENERIC_EXPLANATION};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::model::{LiverState, StateLayout};

/// Weights applied to terminal-state components.
///
/// `stress` weights the stress slot (mitochondrial stress or DNA damage).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub ros: f64,
    pub alt: f64,
    pub stress: f64,
    pub apoptosis: f64,
    pub necrosis: f64,
    pub fibrosis: f64,
    pub cholestasis: f64,
}

impl ScoreWeights {
    /// Variant A weights
    pub const fn bioactivation() -> Self {
        Self {
            ros: 0.18,
            alt: 0.14,
            stress: 0.12,
            apoptosis: 0.12,
            necrosis: 0.12,
            fibrosis: 0.18,
            cholestasis: 0.14,
        }
    }

    /// Variant B weights
    pub const fn oxidative() -> Self {
        Self {
            ros: 0.20,
            alt: 0.13,
            stress: 0.13,
            apoptosis: 0.13,
            necrosis: 0.13,
            fibrosis: 0.18,
            cholestasis: 0.10,
        }
    }

    /// Variant C weights (no ALT term; stress is DNA damage)
    pub const fn genotoxic() -> Self {
        Self {
            ros: 0.20,
            alt: 0.0,
            stress: 0.15,
            apoptosis: 0.15,
            necrosis: 0.15,
            fibrosis: 0.20,
            cholestasis: 0.15,
        }
    }

    /// Sum of all weights. Not required to be 1.0.
    pub fn total(&self) -> f64 {
        self.ros + self.alt + self.stress + self.apoptosis + self.necrosis + self.fibrosis
            + self.cholestasis
    }

    /// Weights must be finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let named = [
            ("ros", self.ros),
            ("alt", self.alt),
            ("stress", self.stress),
            ("apoptosis", self.apoptosis),
            ("necrosis", self.necrosis),
            ("fibrosis", self.fibrosis),
            ("cholestasis", self.cholestasis),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::Weight { name, value });
            }
        }
        Ok(())
    }

    /// Weighted sum over the scored components of `state`
    pub fn score(&self, state: &LiverState, layout: &StateLayout) -> f64 {
        self.ros * state.get(layout.ros)
            + self.alt * state.get(layout.alt)
            + self.stress * state.get(layout.stress)
            + self.apoptosis * state.get(layout.apoptosis)
            + self.necrosis * state.get(layout.necrosis)
            + self.fibrosis * state.get(layout.fibrosis)
            + self.cholestasis * state.get(layout.cholestasis)
    }
}

/// Risk tier, ordered LOW < MODERATE < HIGH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Moderate => "MODERATE",
            RiskTier::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Threshold pair separating the three tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Scores below this are LOW
    pub low: f64,
    /// Scores at or above this are HIGH
    pub high: f64,
}

impl RiskThresholds {
    /// Thresholds used by variants A and B
    pub const STANDARD: RiskThresholds = RiskThresholds { low: 0.6, high: 1.5 };

    /// Thresholds used by variant C
    pub const CONSERVATIVE: RiskThresholds = RiskThresholds { low: 0.75, high: 1.5 };

    /// Create a validated threshold pair
    pub fn new(low: f64, high: f64) -> Result<Self, ConfigurationError> {
        let thresholds = Self { low, high };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Require finite `0 <= low <= high`
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let ok = self.low.is_finite()
            && self.high.is_finite()
            && self.low >= 0.0
            && self.low <= self.high;
        if ok {
            Ok(())
        } else {
            Err(ConfigurationError::Thresholds { low: self.low, high: self.high })
        }
    }

    /// Map a score to its tier
    pub fn classify(&self, score: f64) -> RiskTier {
        if score < self.low {
            RiskTier::Low
        } else if score < self.high {
            RiskTier::Moderate
        } else {
            RiskTier::High
        }
    }
}

/// Score a terminal state
pub fn score(terminal: &LiverState, layout: &StateLayout, weights: &ScoreWeights) -> f64 {
    weights.score(terminal, layout)
}

/// Classify a score
pub fn classify(score: f64, thresholds: &RiskThresholds) -> RiskTier {
    thresholds.classify(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StressMarker;

    #[test]
    fn test_weight_sets_sum_to_one() {
        for weights in [
            ScoreWeights::bioactivation(),
            ScoreWeights::oxidative(),
            ScoreWeights::genotoxic(),
        ] {
            assert!((weights.total() - 1.0).abs() < 1e-9, "{:?}", weights);
        }
    }

    #[test]
    fn test_score_ignores_unweighted_components() {
        let layout = StateLayout::new(StressMarker::Mitochondrial);
        let mut state = LiverState::zeros();
        state.set(layout.drug, 100.0);
        state.set(layout.gsh, 100.0);
        state.set(layout.ast, 100.0);
        state.set(layout.toxic_metabolite, 100.0);

        assert_eq!(score(&state, &layout, &ScoreWeights::bioactivation()), 0.0);
    }

    #[test]
    fn test_score_weighted_sum() {
        let layout = StateLayout::new(StressMarker::Mitochondrial);
        let mut state = LiverState::zeros();
        state.set(layout.ros, 1.0);
        state.set(layout.fibrosis, 2.0);

        let s = score(&state, &layout, &ScoreWeights::bioactivation());
        assert!((s - (0.18 + 0.36)).abs() < 1e-12);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(RiskTier::Low < RiskTier::Moderate);
        assert!(RiskTier::Moderate < RiskTier::High);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(RiskThresholds::new(0.6, 1.5).is_ok());
        assert!(RiskThresholds::new(1.0, 1.0).is_ok());
        assert!(RiskThresholds::new(-0.1, 1.5).is_err());
        assert!(RiskThresholds::new(f64::NAN, 1.5).is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoreWeights { necrosis: -0.1, ..ScoreWeights::oxidative() };
        assert_eq!(
            weights.validate(),
            Err(ConfigurationError::Weight { name: "necrosis", value: -0.1 })
        );
    }

    #[test]
    fn test_tier_serializes_uppercase() {
        let json = serde_json::to_string(&RiskTier::Moderate).unwrap();
        assert_eq!(json, "\"MODERATE\"");
    }
}
