//! Parallel evaluation of a compound list.
//!
//! Compounds share no mutable state, so each one is integrated on its own
//! rayon task. Results come back in input order; one compound failing does
//! not affect the others.

use rayon::prelude::*;

use super::{CompoundAssessment, Simulator};
use crate::compound::CompoundDescriptor;
use crate::error::Result;

/// Simulate and score every compound, preserving input order
pub fn simulate_batch(
    simulator: &Simulator,
    compounds: &[CompoundDescriptor],
) -> Vec<Result<CompoundAssessment>> {
    log::info!(
        "Simulating {} compound(s) with variant {} ({} h, dose {})",
        compounds.len(),
        simulator.variant().variant,
        simulator.params().duration_hours,
        simulator.params().dose
    );

    let results: Vec<Result<CompoundAssessment>> = compounds
        .par_iter()
        .map(|compound| simulator.assess(compound))
        .collect();

    let failures = results.iter().filter(|r| r.is_err()).count();
    if failures > 0 {
        log::warn!("{} of {} compound(s) failed", failures, compounds.len());
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound::Modifiers;
    use crate::config::SimulationParameters;
    use crate::model::ModelVariant;

    #[test]
    fn test_batch_preserves_order() {
        let simulator = Simulator::new(
            ModelVariant::Bioactivation.config(),
            SimulationParameters { dose: 1.0, duration_hours: 24, sample_count: 20 },
        )
        .unwrap();

        let compounds: Vec<CompoundDescriptor> = (0..8)
            .map(|i| {
                let amp = if i % 2 == 0 { 1.0 } else { 2.5 };
                CompoundDescriptor::new(format!("cmpd-{}", i), amp, Modifiers::default()).unwrap()
            })
            .collect();

        let results = simulate_batch(&simulator, &compounds);
        assert_eq!(results.len(), 8);
        for (i, r) in results.iter().enumerate() {
            let assessment = r.as_ref().unwrap();
            assert_eq!(assessment.compound_id, format!("cmpd-{}", i));
        }
    }

    #[test]
    fn test_batch_matches_sequential() {
        let simulator = Simulator::new(
            ModelVariant::Genotoxic.config(),
            SimulationParameters::default(),
        )
        .unwrap();
        let compounds = vec![
            CompoundDescriptor::new("a", 1.0, Modifiers::default()).unwrap(),
            CompoundDescriptor::new("b", 2.5, Modifiers::default()).unwrap(),
        ];

        let batch = simulate_batch(&simulator, &compounds);
        for (compound, result) in compounds.iter().zip(batch) {
            let sequential = simulator.assess(compound).unwrap();
            assert_eq!(result.unwrap().score, sequential.score);
        }
    }
}
