//! SVG preview of reconstructed trajectories.
//! Renders each trajectory as a polyline for a quick visual check.
//! Features:
//! - Drawing Y axis pointing up (SVG Y is flipped)
//! - viewBox fitted to the trajectory bounds with a margin
//! - Closed trajectories and open ones drawn in different colours

use cutpath_core::{PipelineStage, Result, Trajectory, TrajectoryError};
use std::fmt::Write as _;
use std::path::Path;

const MARGIN_RATIO: f64 = 0.05;
const MIN_EXTENT: f64 = 1.0;
const OPEN_COLOR: &str = "#1f77b4";
const CLOSED_COLOR: &str = "#2ca02c";

/// Render trajectories as a standalone SVG document
pub fn render_svg(trajectories: &[Trajectory]) -> Result<String> {
    let (min_x, min_y, max_x, max_y) = trajectories
        .iter()
        .filter_map(Trajectory::bounds)
        .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
        .ok_or_else(|| TrajectoryError::empty(PipelineStage::Preview))?;

    let width = (max_x - min_x).max(MIN_EXTENT);
    let height = (max_y - min_y).max(MIN_EXTENT);
    let margin = width.max(height) * MARGIN_RATIO;
    let stroke = width.max(height) / 500.0;

    let mut svg = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.6} {:.6} {:.6} {:.6}">"#,
        min_x - margin,
        -(max_y + margin),
        width + 2.0 * margin,
        height + 2.0 * margin
    );

    for (i, trajectory) in trajectories.iter().enumerate() {
        let color = if trajectory.is_closed() {
            CLOSED_COLOR
        } else {
            OPEN_COLOR
        };
        let mut points = String::new();
        for p in &trajectory.points {
            let _ = write!(points, "{:.6},{:.6} ", p.x, -p.y);
        }
        let _ = writeln!(
            svg,
            r#"  <polyline id="trajectory-{}" fill="none" stroke="{}" stroke-width="{:.6}" points="{}"/>"#,
            i + 1,
            color,
            stroke,
            points.trim_end()
        );
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Render and optionally save the preview; returns the SVG text
pub fn render_preview(trajectories: &[Trajectory], save_path: Option<&Path>) -> Result<String> {
    let svg = render_svg(trajectories)?;

    if let Some(path) = save_path {
        std::fs::write(path, &svg)?;
        tracing::info!(path = %path.display(), "Saved trajectory preview");
    }

    Ok(svg)
}
