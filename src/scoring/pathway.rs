//! Dominant injury pathway lookup.
//!
//! Picks the largest of the pathway components in the terminal state and
//! attaches a short explanation. Ties go to the component listed first.

use serde::Serialize;

use crate::model::{LiverState, StateLayout};

/// Explanation used for component names with no specific entry
pub const GENERIC_EXPLANATION: &str =
    "No specific mechanism on record for this pathway; review the full trajectory.";

/// Component with the largest terminal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominantPathway {
    pub name: &'static str,
    pub value: f64,
    pub explanation: &'static str,
}

/// Pathway components in tie-break order
fn pathway_components(layout: &StateLayout) -> [(&'static str, usize); 7] {
    [
        ("ROS", layout.ros),
        ("ALT", layout.alt),
        (layout.stress_marker.label(), layout.stress),
        ("Cholestasis", layout.cholestasis),
        ("Apoptosis", layout.apoptosis),
        ("Necrosis", layout.necrosis),
        ("Fibrosis", layout.fibrosis),
    ]
}

/// Static explanation for a pathway name
pub fn explain_pathway(name: &str) -> &'static str {
    match name {
        "ROS" => "Oxidative stress dominates: reactive oxygen species outpace clearance.",
        "ALT" => "Hepatocellular leakage dominates: transaminase release signals membrane damage.",
        "Mito Stress" => "Mitochondrial dysfunction dominates: energy failure drives cell injury.",
        "DNA Damage" => "Genotoxic injury dominates: metabolite adducts accumulate in DNA.",
        "Cholestasis" => {
            "Cholestatic injury dominates: bile flow impairment from metabolite burden."
        }
        "Apoptosis" => "Programmed cell death dominates: injury proceeds through apoptosis.",
        "Necrosis" => "Necrotic cell death dominates: acute, inflammatory hepatocyte loss.",
        "Fibrosis" => "Fibrotic remodeling dominates: sustained injury is driving scar formation.",
        _ => GENERIC_EXPLANATION,
    }
}

/// Find the dominant pathway in a terminal state
pub fn dominant_pathway(terminal: &LiverState, layout: &StateLayout) -> DominantPathway {
    let components = pathway_components(layout);
    let (mut name, idx) = components[0];
    let mut value = terminal.get(idx);

    for &(candidate, idx) in &components[1..] {
        let v = terminal.get(idx);
        if v > value {
            name = candidate;
            value = v;
        }
    }

    DominantPathway {
        name,
        value,
        explanation: explain_pathway(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StressMarker;

    #[test]
    fn test_picks_maximum() {
        let layout = StateLayout::new(StressMarker::Mitochondrial);
        let mut state = LiverState::zeros();
        state.set(layout.ros, 0.2);
        state.set(layout.necrosis, 0.9);
        state.set(layout.fibrosis, 0.5);
        // Not a pathway component
        state.set(layout.drug, 10.0);

        let dominant = dominant_pathway(&state, &layout);
        assert_eq!(dominant.name, "Necrosis");
        assert_eq!(dominant.value, 0.9);
        assert_eq!(dominant.explanation, explain_pathway("Necrosis"));
    }

    #[test]
    fn test_tie_goes_to_first_listed() {
        let layout = StateLayout::new(StressMarker::Mitochondrial);
        let mut state = LiverState::zeros();
        state.set(layout.alt, 0.7);
        state.set(layout.cholestasis, 0.7);
        state.set(layout.fibrosis, 0.7);

        assert_eq!(dominant_pathway(&state, &layout).name, "ALT");
    }

    #[test]
    fn test_all_zero_returns_first() {
        let layout = StateLayout::new(StressMarker::Mitochondrial);
        assert_eq!(dominant_pathway(&LiverState::zeros(), &layout).name, "ROS");
    }

    #[test]
    fn test_stress_slot_uses_variant_label() {
        let layout = StateLayout::new(StressMarker::DnaDamage);
        let mut state = LiverState::zeros();
        state.set(layout.stress, 3.0);
        assert_eq!(dominant_pathway(&state, &layout).name, "DNA Damage");
    }

    #[test]
    fn test_unmapped_name_falls_back() {
        assert_eq!(explain_pathway("Steatosis"), GENERIC_EXPLANATION);
        assert_ne!(explain_pathway("Fibrosis"), GENERIC_EXPLANATION);
    }
}
