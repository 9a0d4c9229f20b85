//! Rate constant tables for the hepatotoxicity ODE system.
//!
//! All rates are per hour. The toxicity amplifier (1.0 for benign
//! structures, 2.5 for reactive ones) scales the damage rates: ROS
//! production, stress, apoptosis, necrosis, cholestasis and fibrosis.
//! Bioactivation, conjugation, clearance and leakage are not amplified.

use serde::{Deserialize, Serialize};

/// Rate constants for one model variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateConstants {
    /// CYP450 drug -> metabolite conversion (k_cyp)
    pub cyp_per_h: f64,
    /// Fraction of converted drug that becomes toxic metabolite (k_bio).
    /// `None` means the full flux becomes metabolite.
    pub bioactivation_yield: Option<f64>,
    /// GSH conjugation rate (k_gsh)
    pub gsh_conjugation_per_h: f64,
    /// ROS production per unit metabolite (k_ros, amplified)
    pub ros_production_per_h: f64,
    /// Mitochondrial stress or DNA damage accrual (k_mito / k_dna, amplified)
    pub stress_per_h: f64,
    /// Baseline ROS clearance (k_clear)
    pub ros_clearance_per_h: f64,
    /// Additional ROS clearance when the antioxidant modifier is active
    pub antioxidant_clearance_per_h: f64,
    /// ROS-driven apoptosis (k_apop, amplified)
    pub apoptosis_per_h: f64,
    /// Stress-driven apoptosis coupling
    pub stress_apoptosis_per_h: f64,
    /// ROS-driven necrosis (k_necro, amplified)
    pub necrosis_per_h: f64,
    /// Metabolite-driven cholestasis (k_chol, amplified)
    pub cholestasis_per_h: f64,
    /// Fibrosis from apoptosis + necrosis (k_fib, amplified)
    pub fibrosis_per_h: f64,
    /// ALT/AST leakage per unit ROS
    pub enzyme_leakage_per_h: f64,
    /// Time constant of the idiosyncratic sensitivity oscillation, sin(t / period)
    pub idiosyncratic_period_h: f64,
}

impl RateConstants {
    /// CYP450-bioactivation model with partial metabolite yield
    ///
    /// Source: DILI screening prototype (bioactivation + idiosyncratic model)
    /// Illustrative constants, not literature-calibrated.
    pub const fn bioactivation() -> Self {
        Self {
            cyp_per_h: 0.04,
            bioactivation_yield: Some(0.03),
            gsh_conjugation_per_h: 0.025,
            ros_production_per_h: 0.03,
            stress_per_h: 0.015,
            ros_clearance_per_h: 0.01,
            antioxidant_clearance_per_h: 0.015,
            apoptosis_per_h: 0.012,
            stress_apoptosis_per_h: 0.01,
            necrosis_per_h: 0.008,
            cholestasis_per_h: 0.006,
            fibrosis_per_h: 0.005,
            enzyme_leakage_per_h: 0.012,
            idiosyncratic_period_h: 5.0,
        }
    }

    /// Oxidative-stress model: full metabolite yield, faster conjugation
    ///
    /// Source: upper ends of the screening prototype's rate ranges
    /// Illustrative constants, not literature-calibrated.
    pub const fn oxidative() -> Self {
        Self {
            cyp_per_h: 0.05,
            bioactivation_yield: None,
            gsh_conjugation_per_h: 0.03,
            ros_production_per_h: 0.02,
            stress_per_h: 0.015,
            ros_clearance_per_h: 0.01,
            antioxidant_clearance_per_h: 0.015,
            apoptosis_per_h: 0.01,
            stress_apoptosis_per_h: 0.01,
            necrosis_per_h: 0.008,
            cholestasis_per_h: 0.006,
            fibrosis_per_h: 0.005,
            enzyme_leakage_per_h: 0.012,
            idiosyncratic_period_h: 5.0,
        }
    }

    /// Genotoxic model: stress slot tracks DNA damage (k_dna)
    ///
    /// Source: screening prototype rate ranges, k_dna = k_mito
    /// Illustrative constants, not literature-calibrated.
    pub const fn genotoxic() -> Self {
        Self {
            cyp_per_h: 0.05,
            bioactivation_yield: None,
            gsh_conjugation_per_h: 0.03,
            ros_production_per_h: 0.03,
            stress_per_h: 0.015,
            ros_clearance_per_h: 0.01,
            antioxidant_clearance_per_h: 0.015,
            apoptosis_per_h: 0.01,
            stress_apoptosis_per_h: 0.01,
            necrosis_per_h: 0.008,
            cholestasis_per_h: 0.006,
            fibrosis_per_h: 0.005,
            enzyme_leakage_per_h: 0.012,
            idiosyncratic_period_h: 5.0,
        }
    }

    /// Copy with the damage rates scaled by the toxicity amplifier
    pub fn amplified(&self, amplifier: f64) -> Self {
        Self {
            ros_production_per_h: self.ros_production_per_h * amplifier,
            stress_per_h: self.stress_per_h * amplifier,
            apoptosis_per_h: self.apoptosis_per_h * amplifier,
            necrosis_per_h: self.necrosis_per_h * amplifier,
            cholestasis_per_h: self.cholestasis_per_h * amplifier,
            fibrosis_per_h: self.fibrosis_per_h * amplifier,
            ..*self
        }
    }

    /// Metabolite yield per unit of converted drug
    pub fn metabolite_yield(&self) -> f64 {
        self.bioactivation_yield.unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amplifier_scales_damage_rates_only() {
        let base = RateConstants::bioactivation();
        let amp = base.amplified(2.5);

        assert!((amp.ros_production_per_h - 0.075).abs() < 1e-12);
        assert!((amp.stress_per_h - 0.0375).abs() < 1e-12);
        assert!((amp.fibrosis_per_h - 0.0125).abs() < 1e-12);

        assert_eq!(amp.cyp_per_h, base.cyp_per_h);
        assert_eq!(amp.gsh_conjugation_per_h, base.gsh_conjugation_per_h);
        assert_eq!(amp.ros_clearance_per_h, base.ros_clearance_per_h);
        assert_eq!(amp.enzyme_leakage_per_h, base.enzyme_leakage_per_h);
    }

    #[test]
    fn test_unit_amplifier_is_identity() {
        let base = RateConstants::oxidative();
        assert_eq!(base.amplified(1.0), base);
    }

    #[test]
    fn test_metabolite_yield() {
        assert_eq!(RateConstants::bioactivation().metabolite_yield(), 0.03);
        assert_eq!(RateConstants::genotoxic().metabolite_yield(), 1.0);
    }
}
