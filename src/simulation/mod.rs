//! Simulation driver: integrate one compound, then score and classify.
//!
//! Flow per compound:
//! 1. Validate simulation parameters (dose, duration, sample grid)
//! 2. Build the initial state: drug = dose, GSH = 1.0, rest 0
//! 3. Integrate `LiverDynamics` over the sample grid
//! 4. Score the terminal state with the variant's weights
//! 5. Classify with the variant's thresholds
//! 6. Optionally report the dominant pathway
//!
//! Each compound is independent; see `simulate_batch` for running a list
//! of compounds in parallel.

mod batch;

pub use batch::simulate_batch;

use serde::Serialize;

use crate::compound::{CompoundDescriptor, Modifiers};
use crate::config::SimulationParameters;
use crate::error::Result;
use crate::model::{
    integrate, IntegratorConfig, LiverDynamics, LiverState, ModelVariant, VariantConfig,
};
use crate::scoring::{dominant_pathway, DominantPathway, RiskTier};

/// State at one sample time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub time_h: f64,
    pub state: LiverState,
}

/// Output of one integration run.
///
/// The trajectory exists for presentation only; scoring reads the
/// terminal state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub compound_id: String,
    pub trajectory: Vec<TrajectoryPoint>,
    pub terminal_state: LiverState,
}

impl SimulationResult {
    /// Sample times in hours
    pub fn times(&self) -> Vec<f64> {
        self.trajectory.iter().map(|p| p.time_h).collect()
    }

    /// Time series of one state component
    pub fn series(&self, idx: usize) -> Vec<f64> {
        self.trajectory.iter().map(|p| p.state.get(idx)).collect()
    }
}

/// Scored simulation of one compound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundAssessment {
    pub compound_id: String,
    pub amplifier: f64,
    pub modifiers: Modifiers,
    pub variant: ModelVariant,
    pub score: f64,
    pub risk_tier: RiskTier,
    pub dominant_pathway: Option<DominantPathway>,
    pub result: SimulationResult,
}

impl CompoundAssessment {
    /// Print a formatted summary
    pub fn print_summary(&self) {
        println!("=== Compound: {} ===", self.compound_id);
        println!("Model variant: {}", self.variant);
        println!("Toxicity amplifier: {:.1}", self.amplifier);
        if self.modifiers.antioxidant {
            println!("Modifier: antioxidant");
        }
        if self.modifiers.idiosyncratic {
            println!("Modifier: idiosyncratic");
        }
        println!("DILI score: {:.2} -> Risk: {}", self.score, self.risk_tier);

        if let Some(dominant) = &self.dominant_pathway {
            println!();
            println!("Dominant pathway: {} ({:.4})", dominant.name, dominant.value);
            println!("  {}", dominant.explanation);
        }
        println!();
    }
}

/// Runs compounds through one model variant with fixed parameters.
#[derive(Debug, Clone)]
pub struct Simulator {
    variant: VariantConfig,
    params: SimulationParameters,
    integrator: IntegratorConfig,
}

impl Simulator {
    /// Create a simulator; fails if the parameters are invalid
    pub fn new(variant: VariantConfig, params: SimulationParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            variant,
            params,
            integrator: IntegratorConfig::default(),
        })
    }

    /// Replace solver tolerances (e.g. to retry after an integration error)
    pub fn with_integrator_config(mut self, integrator: IntegratorConfig) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn variant(&self) -> &VariantConfig {
        &self.variant
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Integrate one compound over the sample grid
    pub fn simulate(&self, compound: &CompoundDescriptor) -> Result<SimulationResult> {
        let layout = &self.variant.layout;
        let dynamics =
            LiverDynamics::new(&self.variant, compound.amplifier(), compound.modifiers());
        let initial = LiverState::initial(self.params.dose, layout);
        let times = self.params.sample_times();

        let samples = integrate(
            |t, y: &[f64], dydt: &mut [f64]| dynamics.derivatives(t, y, dydt),
            initial.as_slice(),
            &times,
            &self.integrator,
        )?;

        let trajectory: Vec<TrajectoryPoint> = times
            .iter()
            .zip(samples.iter())
            .map(|(&time_h, y)| TrajectoryPoint {
                time_h,
                state: LiverState::from_slice(y),
            })
            .collect();

        let terminal_state = trajectory.last().map(|p| p.state).unwrap_or(initial);

        Ok(SimulationResult {
            compound_id: compound.compound_id().to_string(),
            trajectory,
            terminal_state,
        })
    }

    /// Score, classify and (if the variant supports it) explain a result
    pub fn score(
        &self,
        compound: &CompoundDescriptor,
        result: SimulationResult,
    ) -> CompoundAssessment {
        let layout = &self.variant.layout;
        let terminal = &result.terminal_state;

        let score = self.variant.weights.score(terminal, layout);
        let risk_tier = self.variant.thresholds.classify(score);
        let dominant_pathway = if self.variant.features.dominant_pathway {
            Some(dominant_pathway(terminal, layout))
        } else {
            None
        };

        log::debug!(
            "{}: score={:.4}, tier={}",
            compound.compound_id(),
            score,
            risk_tier
        );

        CompoundAssessment {
            compound_id: compound.compound_id().to_string(),
            amplifier: compound.amplifier(),
            modifiers: compound.modifiers(),
            variant: self.variant.variant,
            score,
            risk_tier,
            dominant_pathway,
            result,
        }
    }

    /// Simulate and score one compound
    pub fn assess(&self, compound: &CompoundDescriptor) -> Result<CompoundAssessment> {
        let result = self.simulate(compound)?;
        Ok(self.score(compound, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigurationError, Error};

    fn compound(amplifier: f64) -> CompoundDescriptor {
        CompoundDescriptor::new("test", amplifier, Modifiers::default()).unwrap()
    }

    #[test]
    fn test_trajectory_shape() {
        let params = SimulationParameters { dose: 1.0, duration_hours: 24, sample_count: 50 };
        let sim = Simulator::new(ModelVariant::Bioactivation.config(), params).unwrap();
        let result = sim.simulate(&compound(1.0)).unwrap();

        assert_eq!(result.trajectory.len(), 50);
        assert_eq!(result.trajectory[0].time_h, 0.0);
        assert_eq!(result.trajectory[49].time_h, 24.0);
        assert_eq!(result.terminal_state, result.trajectory[49].state);
    }

    #[test]
    fn test_first_sample_is_initial_state() {
        let params = SimulationParameters { dose: 2.0, duration_hours: 12, sample_count: 10 };
        let sim = Simulator::new(ModelVariant::Oxidative.config(), params).unwrap();
        let result = sim.simulate(&compound(1.0)).unwrap();
        let layout = sim.variant().layout;

        assert_eq!(
            result.trajectory[0].state,
            LiverState::initial(2.0, &layout)
        );
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let params = SimulationParameters { dose: -1.0, duration_hours: 24, sample_count: 50 };
        let err = Simulator::new(ModelVariant::Bioactivation.config(), params).unwrap_err();
        assert!(matches!(err, Error::Configuration(ConfigurationError::Dose(_))));
    }

    #[test]
    fn test_dominant_pathway_only_when_supported() {
        let params = SimulationParameters::default();
        let a = Simulator::new(ModelVariant::Bioactivation.config(), params).unwrap();
        let b = Simulator::new(ModelVariant::Oxidative.config(), params).unwrap();

        assert!(a.assess(&compound(1.0)).unwrap().dominant_pathway.is_none());
        assert!(b.assess(&compound(1.0)).unwrap().dominant_pathway.is_some());
    }
}
