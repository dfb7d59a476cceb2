//! # Cutpath Core
//!
//! Core types and error handling for cutpath.
//! Provides the geometry primitives every pipeline stage exchanges
//! (points, segments, trajectories, endpoint references), the run
//! statistics, and the shared error taxonomy.

pub mod error;
pub mod geometry;
pub mod stats;

pub use error::{PipelineStage, Result, TrajectoryError};
pub use geometry::{EndpointRef, Point2D, Segment, SegmentEnd, Trajectory};
pub use stats::Statistics;

/// Default endpoint tolerance (ε) in drawing units.
pub const DEFAULT_TOLERANCE: f64 = 0.05;
