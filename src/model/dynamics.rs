//! Right-hand side of the hepatotoxicity ODE system.
//!
//! ```text
//! d(drug)/dt        = -k_cyp * drug
//! d(metabolite)/dt  =  k_cyp * drug * yield - k_gsh * min(metabolite, GSH)
//! d(GSH)/dt         = -k_gsh * min(metabolite, GSH)
//! d(ROS)/dt         =  k_ros * metabolite - (k_clear + k_antiox) * ROS
//! d(ALT)/dt         =  d(AST)/dt = k_leak * ROS
//! d(stress)/dt      =  k_mito * (ROS + metabolite)      (mitochondrial)
//!                   =  k_dna * metabolite               (DNA damage)
//! d(cholestasis)/dt =  k_chol * metabolite * idio(t)
//! d(apoptosis)/dt   =  k_apop * ROS + k_sa * stress
//! d(necrosis)/dt    =  k_necro * ROS * idio(t)
//! d(fibrosis)/dt    =  k_fib * (apoptosis + necrosis)
//! ```
//!
//! `idio(t) = 1 + sin(t / 5)` when the idiosyncratic modifier is active,
//! otherwise 1. Conjugation flux is capped by whichever of metabolite and
//! GSH is scarcer, which keeps GSH from being driven below zero.

use super::rates::RateConstants;
use super::variant::VariantConfig;
use super::{StateLayout, StressMarker};
use crate::compound::Modifiers;

/// Derivative function for one (variant, compound) pair.
///
/// Holds only immutable rate constants, so it is `Copy` and safe to share
/// between concurrent integrations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiverDynamics {
    rates: RateConstants,
    layout: StateLayout,
    /// Amplitude of the idiosyncratic oscillation (0 = off)
    idiosyncratic_amplitude: f64,
    /// Additional ROS clearance (0 = off)
    antioxidant_clearance_per_h: f64,
}

impl LiverDynamics {
    /// Build the dynamics for a compound under a model variant.
    ///
    /// Modifiers the variant does not model are ignored with a warning.
    pub fn new(config: &VariantConfig, amplifier: f64, modifiers: Modifiers) -> Self {
        let rates = config.rates.amplified(amplifier);

        if modifiers.idiosyncratic && !config.features.idiosyncratic {
            log::warn!(
                "Variant {} has no idiosyncratic term; modifier ignored",
                config.variant
            );
        }
        if modifiers.antioxidant && !config.features.antioxidant {
            log::warn!(
                "Variant {} has no antioxidant term; modifier ignored",
                config.variant
            );
        }

        let idiosyncratic_amplitude = if modifiers.idiosyncratic && config.features.idiosyncratic {
            1.0
        } else {
            0.0
        };
        let antioxidant_clearance_per_h = if modifiers.antioxidant && config.features.antioxidant {
            rates.antioxidant_clearance_per_h
        } else {
            0.0
        };

        Self {
            rates,
            layout: config.layout,
            idiosyncratic_amplitude,
            antioxidant_clearance_per_h,
        }
    }

    /// Effective (amplified) rate constants
    pub fn rates(&self) -> &RateConstants {
        &self.rates
    }

    pub fn layout(&self) -> &StateLayout {
        &self.layout
    }

    /// Total ROS clearance rate including the antioxidant term
    pub fn ros_clearance_per_h(&self) -> f64 {
        self.rates.ros_clearance_per_h + self.antioxidant_clearance_per_h
    }

    /// Idiosyncratic sensitivity multiplier at time `t_h`
    #[inline]
    pub fn idiosyncratic_multiplier(&self, t_h: f64) -> f64 {
        1.0 + self.idiosyncratic_amplitude * (t_h / self.rates.idiosyncratic_period_h).sin()
    }

    /// Compute dy/dt at time `t_h`.
    ///
    /// Pure: no internal state, valid for any `t_h` (the adaptive solver
    /// evaluates stages out of order).
    pub fn derivatives(&self, t_h: f64, y: &[f64], dydt: &mut [f64]) {
        let l = &self.layout;
        let r = &self.rates;

        let drug = y[l.drug];
        let metabolite = y[l.toxic_metabolite];
        let gsh = y[l.gsh];
        let ros = y[l.ros];
        let stress = y[l.stress];
        let apoptosis = y[l.apoptosis];
        let necrosis = y[l.necrosis];

        let idio = self.idiosyncratic_multiplier(t_h);

        // Bioactivation
        let activation = r.cyp_per_h * drug;
        // Stoichiometric conjugation, limited by the scarcer partner
        let detox = r.gsh_conjugation_per_h * metabolite.min(gsh);

        dydt[l.drug] = -activation;
        dydt[l.toxic_metabolite] = activation * r.metabolite_yield() - detox;
        dydt[l.gsh] = -detox;
        dydt[l.ros] = r.ros_production_per_h * metabolite - self.ros_clearance_per_h() * ros;

        let leakage = r.enzyme_leakage_per_h * ros;
        dydt[l.alt] = leakage;
        dydt[l.ast] = leakage;

        dydt[l.stress] = match l.stress_marker {
            StressMarker::Mitochondrial => r.stress_per_h * (ros + metabolite),
            StressMarker::DnaDamage => r.stress_per_h * metabolite,
        };

        dydt[l.cholestasis] = r.cholestasis_per_h * metabolite * idio;
        dydt[l.apoptosis] = r.apoptosis_per_h * ros + r.stress_apoptosis_per_h * stress;
        dydt[l.necrosis] = r.necrosis_per_h * ros * idio;
        dydt[l.fibrosis] = r.fibrosis_per_h * (apoptosis + necrosis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelVariant, STATE_DIM};

    fn state(values: &[(usize, f64)]) -> [f64; STATE_DIM] {
        let mut y = [0.0; STATE_DIM];
        for &(i, v) in values {
            y[i] = v;
        }
        y
    }

    #[test]
    fn test_initial_derivatives_only_move_drug_and_metabolite() {
        let config = ModelVariant::Bioactivation.config();
        let dynamics = LiverDynamics::new(&config, 1.0, Modifiers::default());
        let l = config.layout;
        let y = state(&[(l.drug, 1.0), (l.gsh, 1.0)]);
        let mut dydt = [0.0; STATE_DIM];

        dynamics.derivatives(0.0, &y, &mut dydt);

        assert!((dydt[l.drug] + 0.04).abs() < 1e-12);
        assert!((dydt[l.toxic_metabolite] - 0.04 * 0.03).abs() < 1e-12);
        assert_eq!(dydt[l.gsh], 0.0);
        assert_eq!(dydt[l.ros], 0.0);
        assert_eq!(dydt[l.fibrosis], 0.0);
    }

    #[test]
    fn test_detox_capped_by_scarce_gsh() {
        let config = ModelVariant::Oxidative.config();
        let dynamics = LiverDynamics::new(&config, 1.0, Modifiers::default());
        let l = config.layout;
        let y = state(&[(l.toxic_metabolite, 5.0), (l.gsh, 0.2)]);
        let mut dydt = [0.0; STATE_DIM];

        dynamics.derivatives(0.0, &y, &mut dydt);

        assert!((dydt[l.gsh] + 0.03 * 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_idiosyncratic_multiplier_bounds() {
        let config = ModelVariant::Bioactivation.config();
        let on = LiverDynamics::new(
            &config,
            1.0,
            Modifiers { idiosyncratic: true, antioxidant: false },
        );
        let off = LiverDynamics::new(&config, 1.0, Modifiers::default());

        for i in 0..200 {
            let t = i as f64 * 0.5;
            let m = on.idiosyncratic_multiplier(t);
            assert!((0.0..=2.0).contains(&m));
            assert_eq!(off.idiosyncratic_multiplier(t), 1.0);
        }
        let peak = 5.0 * std::f64::consts::FRAC_PI_2;
        assert!((on.idiosyncratic_multiplier(peak) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_unsupported_modifier_is_ignored() {
        let config = ModelVariant::Genotoxic.config();
        let plain = LiverDynamics::new(&config, 1.0, Modifiers::default());
        let modified = LiverDynamics::new(
            &config,
            1.0,
            Modifiers { idiosyncratic: true, antioxidant: true },
        );
        assert_eq!(plain, modified);
    }
}
