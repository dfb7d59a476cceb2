//! Processing statistics reported after a pipeline run.

use serde::{Deserialize, Serialize};

/// Summary of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Segments produced by the extractor
    pub original_segment_count: usize,
    /// Trajectories produced by the last merge
    pub final_trajectory_count: usize,
    /// Endpoint clusters found by the last clustering run
    pub cluster_count: usize,
    /// Tolerance (ε) in drawing units
    pub tolerance_used: f64,
}
