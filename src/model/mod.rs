//! Hepatotoxicity model for drug-induced liver injury (DILI) simulation.
//!
//! The model is a fixed system of 11 coupled ODEs covering the main
//! hepatotoxicity pathways:
//! - CYP450 bioactivation of the parent drug into a toxic metabolite
//! - Glutathione (GSH) conjugation of the metabolite (saturable detox)
//! - Reactive oxygen species (ROS) production and clearance
//! - ALT/AST leakage from damaged hepatocytes
//! - Mitochondrial stress (or DNA damage in the genotoxic variant)
//! - Cholestasis, apoptosis, necrosis and downstream fibrosis
//!
//! The only nonlinearity is the `min(metabolite, GSH)` conjugation flux.
//! Everything else is linear in its inputs, so stability is governed by
//! that term and by the exponential decay of the parent drug.
//!
//! Rate constants are illustrative, not literature-calibrated.

pub mod dynamics;
pub mod integrator;
pub mod rates;
pub mod variant;

pub use dynamics::LiverDynamics;
pub use integrator::{integrate, AdaptiveIntegrator, IntegratorConfig};
pub use rates::RateConstants;
pub use variant::{ModelVariant, VariantConfig, VariantFeatures, VariantRegistry};

use serde::{Deserialize, Serialize};

/// Number of state variables in every model variant
pub const STATE_DIM: usize = 11;

/// Baseline hepatic glutathione level (normalized detox capacity)
pub const BASELINE_GSH: f64 = 1.0;

/// Marker tracked in the stress slot of the state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressMarker {
    /// Mitochondrial stress driven by ROS + metabolite
    Mitochondrial,
    /// DNA damage driven by metabolite alone
    DnaDamage,
}

impl StressMarker {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            StressMarker::Mitochondrial => "Mito Stress",
            StressMarker::DnaDamage => "DNA Damage",
        }
    }
}

/// Index layout of the state vector for one model variant.
///
/// Variants share slot positions but not meaning: slot `stress` holds
/// mitochondrial stress in some variants and DNA damage in others, so
/// states from different variants must never be compared index by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateLayout {
    pub drug: usize,
    pub toxic_metabolite: usize,
    pub gsh: usize,
    pub ros: usize,
    pub alt: usize,
    pub ast: usize,
    pub stress: usize,
    pub cholestasis: usize,
    pub apoptosis: usize,
    pub necrosis: usize,
    pub fibrosis: usize,
    /// What the `stress` slot means
    pub stress_marker: StressMarker,
}

impl StateLayout {
    /// Standard layout with the given marker in the stress slot
    pub const fn new(stress_marker: StressMarker) -> Self {
        Self {
            drug: 0,
            toxic_metabolite: 1,
            gsh: 2,
            ros: 3,
            alt: 4,
            ast: 5,
            stress: 6,
            cholestasis: 7,
            apoptosis: 8,
            necrosis: 9,
            fibrosis: 10,
            stress_marker,
        }
    }

    /// Column labels in index order
    pub fn labels(&self) -> [&'static str; STATE_DIM] {
        [
            "Drug",
            "Toxic Metabolite",
            "GSH",
            "ROS",
            "ALT",
            "AST",
            self.stress_marker.label(),
            "Cholestasis",
            "Apoptosis",
            "Necrosis",
            "Fibrosis",
        ]
    }
}

/// Liver state vector (dimensionless levels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiverState {
    pub levels: [f64; STATE_DIM],
}

impl LiverState {
    /// All-zero state
    pub fn zeros() -> Self {
        Self { levels: [0.0; STATE_DIM] }
    }

    /// Initial condition: drug = dose, GSH = baseline, everything else 0
    pub fn initial(dose: f64, layout: &StateLayout) -> Self {
        let mut state = Self::zeros();
        state.levels[layout.drug] = dose;
        state.levels[layout.gsh] = BASELINE_GSH;
        state
    }

    /// Build from a solver slice of length `STATE_DIM`
    pub(crate) fn from_slice(values: &[f64]) -> Self {
        let mut state = Self::zeros();
        state.levels.copy_from_slice(values);
        state
    }

    /// Level at index (0.0 if out of range)
    #[inline]
    pub fn get(&self, idx: usize) -> f64 {
        self.levels.get(idx).copied().unwrap_or(0.0)
    }

    /// Set level at index
    #[inline]
    pub fn set(&mut self, idx: usize, value: f64) {
        if idx < STATE_DIM {
            self.levels[idx] = value;
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.levels
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.levels
    }
}

impl Default for LiverState {
    fn default() -> Self {
        Self::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let layout = StateLayout::new(StressMarker::Mitochondrial);
        let state = LiverState::initial(1.5, &layout);

        assert_eq!(state.get(layout.drug), 1.5);
        assert_eq!(state.get(layout.gsh), BASELINE_GSH);
        let others: f64 = state
            .levels
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != layout.drug && *i != layout.gsh)
            .map(|(_, v)| v.abs())
            .sum();
        assert_eq!(others, 0.0);
    }

    #[test]
    fn test_labels_follow_stress_marker() {
        let mito = StateLayout::new(StressMarker::Mitochondrial);
        let dna = StateLayout::new(StressMarker::DnaDamage);
        assert_eq!(mito.labels()[mito.stress], "Mito Stress");
        assert_eq!(dna.labels()[dna.stress], "DNA Damage");
    }

    #[test]
    fn test_out_of_range_access() {
        let mut state = LiverState::zeros();
        state.set(42, 1.0);
        assert_eq!(state.get(42), 0.0);
    }
}
