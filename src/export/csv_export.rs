//! CSV time-series export for simulation trajectories.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;

use crate::model::StateLayout;
use crate::simulation::SimulationResult;

/// Write a trajectory as CSV: `time_h` followed by one column per state
/// component, labelled from the layout.
pub fn write_trajectory<W: Write>(
    writer: W,
    result: &SimulationResult,
    layout: &StateLayout,
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec!["time_h".to_string()];
    header.extend(layout.labels().iter().map(|l| l.to_string()));
    writer.write_record(&header)?;

    for point in &result.trajectory {
        let mut row = Vec::with_capacity(header.len());
        row.push(format!("{:.6}", point.time_h));
        row.extend(point.state.levels.iter().map(|v| format!("{:.8}", v)));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Export a trajectory to `exports/trajectory_<index>_<timestamp>.csv`
///
/// Compound identifiers can contain characters that are not valid in file
/// names, so the file is keyed by the compound's position in the batch.
pub fn export_trajectory_csv(
    result: &SimulationResult,
    layout: &StateLayout,
    index: usize,
) -> Result<PathBuf> {
    let dir = PathBuf::from("exports");
    std::fs::create_dir_all(&dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("trajectory_{}_{}.csv", index + 1, timestamp);
    let path = dir.join(&filename);

    export_trajectory_csv_to(result, layout, &path)?;
    Ok(path)
}

/// Export a trajectory to a specific file
pub fn export_trajectory_csv_to(
    result: &SimulationResult,
    layout: &StateLayout,
    path: &Path,
) -> Result<()> {
    let file = File::create(path)?;
    write_trajectory(file, result, layout)?;
    log::info!(
        "CSV trajectory for {} exported: {}",
        result.compound_id,
        path.display()
    );
    Ok(())
}
