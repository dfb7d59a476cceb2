//! # Trajectory Export
//!
//! Plain-text XY format consumed by the operator console and simulator:
//!
//! ```text
//! X Y
//! 0.000000 0.000000
//! 10.000000 0.000000
//! NaN NaN
//! ```
//!
//! One header line, one line per point with six fractional digits, and a
//! literal `NaN NaN` line closing every trajectory.

use cutpath_core::{PipelineStage, Result, Trajectory, TrajectoryError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Header line of the export format
pub const HEADER: &str = "X Y";
/// Separator written after every trajectory
pub const SEPARATOR: &str = "NaN NaN";

/// Write trajectories to any sink.
///
/// # Errors
/// `EmptyState` when there are no trajectories, `Io` on write failure.
pub fn write_trajectories<W: Write>(trajectories: &[Trajectory], mut writer: W) -> Result<()> {
    if trajectories.is_empty() {
        return Err(TrajectoryError::empty(PipelineStage::Export));
    }

    writeln!(writer, "{}", HEADER)?;
    for trajectory in trajectories {
        for p in &trajectory.points {
            writeln!(writer, "{:.6} {:.6}", p.x, p.y)?;
        }
        writeln!(writer, "{}", SEPARATOR)?;
    }
    writer.flush()?;

    Ok(())
}

/// Export trajectories to a text file and return its path.
pub fn export_to_text(trajectories: &[Trajectory], path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if trajectories.is_empty() {
        return Err(TrajectoryError::empty(PipelineStage::Export));
    }

    let file = File::create(path)?;
    write_trajectories(trajectories, BufWriter::new(file))?;

    let points: usize = trajectories.iter().map(Trajectory::len).sum();
    tracing::info!(
        path = %path.display(),
        trajectories = trajectories.len(),
        points,
        "Exported trajectories"
    );

    Ok(path.to_path_buf())
}
