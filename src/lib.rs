//! # Cutpath
//!
//! Rebuilds continuous cutting trajectories from CAD drawings:
//! - Reads LINE, ARC, CIRCLE, (LW)POLYLINE and SPLINE entities from DXF
//! - Snaps endpoints that lie within a tolerance of each other
//! - Merges the snapped pieces into maximal open or closed trajectories
//! - Exports XY point lists for the operator console and the simulator
//!
//! ## Architecture
//!
//! Cutpath is organized as a workspace with multiple crates:
//!
//! 1. **cutpath-core** - Geometry primitives, statistics, error types
//! 2. **cutpath-geometry** - DXF import and the reconstruction pipeline
//! 3. **cutpath-settings** - Configuration files
//! 4. **cutpath** - This facade and the command-line binary

pub mod cli;
pub mod commands;

pub use cutpath_core::{
    EndpointRef, PipelineStage, Point2D, Result, Segment, SegmentEnd, Statistics, Trajectory,
    TrajectoryError, DEFAULT_TOLERANCE,
};

pub use cutpath_geometry::{
    cluster_endpoints, export_to_text, merge_segments, render_preview, write_trajectories,
    Cluster, Clustering, DxfImporter, Entity, EntityExtractor, EntityKind, ProcessingContext,
    ProcessingOptions, SplineFitter,
};

pub use cutpath_settings::{Config, OutputSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for command results
/// - RUST_LOG environment variable support
/// - INFO by default, DEBUG when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
