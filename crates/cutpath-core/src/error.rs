//! Error handling for cutpath
//!
//! Provides the error taxonomy shared by every pipeline stage:
//! - Drawing errors (unreadable file, nothing usable inside it)
//! - Stage errors (a stage invoked without input)
//! - Entity errors (one entity could not be discretised; never fatal)
//! - Export errors (write failures)
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage that reported an [`TrajectoryError::EmptyState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Endpoint clustering
    Clustering,
    /// Segment merging
    Merging,
    /// Text export
    Export,
    /// SVG preview rendering
    Preview,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clustering => write!(f, "endpoint clustering"),
            Self::Merging => write!(f, "segment merging"),
            Self::Export => write!(f, "trajectory export"),
            Self::Preview => write!(f, "preview rendering"),
        }
    }
}

/// Main error type for cutpath
///
/// Whole-pipeline failures are returned to the caller; `EntityProcessing`
/// is produced per entity by the extractor and only ever logged.
#[derive(Error, Debug)]
pub enum TrajectoryError {
    /// The drawing could not be opened or parsed
    #[error("Failed to read drawing {}: {reason}", .path.display())]
    FileRead {
        /// The drawing that failed to load.
        path: PathBuf,
        /// The underlying reader message.
        reason: String,
    },

    /// The drawing parsed but produced no usable segment
    #[error("No valid entities found in drawing {}", .path.display())]
    NoValidEntities {
        /// The drawing that was loaded.
        path: PathBuf,
    },

    /// A stage was invoked with nothing to work on
    #[error("Nothing to process: {stage} has no input")]
    EmptyState {
        /// The stage that found its input empty.
        stage: PipelineStage,
    },

    /// A single entity could not be discretised
    #[error("Could not process {kind} entity: {reason}")]
    EntityProcessing {
        /// The entity kind, e.g. `ARC`.
        kind: String,
        /// Why the entity was rejected.
        reason: String,
    },

    /// Spline fitting failed
    #[error("Spline fit failed: {0}")]
    Spline(String),

    /// Tolerance must be a positive, finite distance
    #[error("Invalid tolerance {0}: must be positive and finite")]
    InvalidTolerance(f64),

    /// Sampling or other processing options are out of range
    #[error("Invalid processing options: {0}")]
    InvalidOptions(String),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A full pipeline run failed; wraps the root cause
    #[error("Processing {} failed", .path.display())]
    Processing {
        /// The drawing being processed.
        path: PathBuf,
        /// The stage error that aborted the run.
        #[source]
        source: Box<TrajectoryError>,
    },
}

impl TrajectoryError {
    /// Create an empty-state error for a stage
    pub fn empty(stage: PipelineStage) -> Self {
        TrajectoryError::EmptyState { stage }
    }

    /// Create an entity-processing error
    pub fn entity(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        TrajectoryError::EntityProcessing {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is an empty-state error
    pub fn is_empty_state(&self) -> bool {
        matches!(self.root_cause(), TrajectoryError::EmptyState { .. })
    }

    /// Innermost error, looking through `Processing` wrappers
    pub fn root_cause(&self) -> &TrajectoryError {
        match self {
            TrajectoryError::Processing { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type using TrajectoryError
pub type Result<T> = std::result::Result<T, TrajectoryError>;
