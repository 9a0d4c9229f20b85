//! Export functionality for simulation data.
//!
//! Provides CSV trajectory export and a JSON assessment report.

mod csv_export;
mod json_export;

pub use csv_export::{export_trajectory_csv, export_trajectory_csv_to, write_trajectory};
pub use json_export::{
    export_assessment_json, export_assessment_json_to, AssessmentReport, CompoundSummary,
};
