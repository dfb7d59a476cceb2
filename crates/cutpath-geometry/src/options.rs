//! Tunables for a pipeline run.

use cutpath_core::{Result, TrajectoryError, DEFAULT_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Points sampled around a full circle.
pub const DEFAULT_CIRCLE_SAMPLES: usize = 200;
/// Points sampled along an arc.
pub const DEFAULT_ARC_SAMPLES: usize = 120;
/// Points sampled along a fitted spline.
pub const DEFAULT_SPLINE_SAMPLES: usize = 200;

/// Processing parameters shared by every stage of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
    /// Endpoint snapping distance (ε) in drawing units
    pub tolerance: f64,
    /// Samples per circle
    pub circle_samples: usize,
    /// Samples per arc
    pub arc_samples: usize,
    /// Samples per spline
    pub spline_samples: usize,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            circle_samples: DEFAULT_CIRCLE_SAMPLES,
            arc_samples: DEFAULT_ARC_SAMPLES,
            spline_samples: DEFAULT_SPLINE_SAMPLES,
        }
    }
}

impl ProcessingOptions {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Validate options
    pub fn validate(&self) -> Result<()> {
        validate_tolerance(self.tolerance)?;

        if self.circle_samples < 2 || self.arc_samples < 2 || self.spline_samples < 2 {
            return Err(TrajectoryError::InvalidOptions(
                "sample counts must be at least 2".to_string(),
            ));
        }

        Ok(())
    }
}

/// Tolerance must be a positive, finite distance.
pub fn validate_tolerance(tolerance: f64) -> Result<()> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(TrajectoryError::InvalidTolerance(tolerance))
    }
}
