//! JSON assessment report.
//!
//! One document per run with the inputs and the scored outcome of every
//! compound. Trajectories are not included; use the CSV export for those.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use crate::compound::Modifiers;
use crate::config::SimulationParameters;
use crate::model::ModelVariant;
use crate::scoring::{DominantPathway, RiskThresholds, RiskTier, ScoreWeights};
use crate::simulation::{CompoundAssessment, Simulator};

/// Per-compound entry of the report
#[derive(Debug, Clone, Serialize)]
pub struct CompoundSummary {
    pub compound_id: String,
    pub amplifier: f64,
    pub modifiers: Modifiers,
    pub score: f64,
    pub risk_tier: RiskTier,
    pub dominant_pathway: Option<DominantPathway>,
    /// Terminal levels keyed by component label
    pub terminal_state: Vec<(String, f64)>,
}

/// Full report structure
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    /// Export timestamp
    pub exported_at: String,
    /// Export version for compatibility
    pub version: &'static str,
    pub variant: ModelVariant,
    pub parameters: SimulationParameters,
    pub weights: ScoreWeights,
    pub thresholds: RiskThresholds,
    pub compounds: Vec<CompoundSummary>,
}

impl AssessmentReport {
    /// Build a report from a simulator and its assessments
    pub fn new(simulator: &Simulator, assessments: &[CompoundAssessment]) -> Self {
        let variant = simulator.variant();
        let labels = variant.layout.labels();

        let compounds = assessments
            .iter()
            .map(|a| CompoundSummary {
                compound_id: a.compound_id.clone(),
                amplifier: a.amplifier,
                modifiers: a.modifiers,
                score: a.score,
                risk_tier: a.risk_tier,
                dominant_pathway: a.dominant_pathway.clone(),
                terminal_state: labels
                    .iter()
                    .zip(a.result.terminal_state.levels.iter())
                    .map(|(label, value)| (label.to_string(), *value))
                    .collect(),
            })
            .collect();

        Self {
            exported_at: Local::now().to_rfc3339(),
            version: "1.0.0",
            variant: variant.variant,
            parameters: *simulator.params(),
            weights: variant.weights,
            thresholds: variant.thresholds,
            compounds,
        }
    }
}

/// Export assessments to `exports/dili_report_YYYYMMDD_HHMMSS.json`
///
/// Returns the path to the saved JSON file.
pub fn export_assessment_json(
    simulator: &Simulator,
    assessments: &[CompoundAssessment],
) -> Result<PathBuf> {
    let dir = PathBuf::from("exports");
    std::fs::create_dir_all(&dir)?;

    let filename = format!("dili_report_{}.json", Local::now().format("%Y%m%d_%H%M%S"));
    let path = dir.join(&filename);

    export_assessment_json_to(simulator, assessments, &path)?;
    Ok(path)
}

/// Export assessments to a specific file
pub fn export_assessment_json_to(
    simulator: &Simulator,
    assessments: &[CompoundAssessment],
    path: &Path,
) -> Result<()> {
    let report = AssessmentReport::new(simulator, assessments);

    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &report)?;

    log::info!("JSON report exported: {}", path.display());
    Ok(())
}
