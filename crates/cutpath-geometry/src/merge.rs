//! # Segment Merger
//!
//! Chains snapped segments into maximal trajectories.
//!
//! Distinct endpoint coordinates are graph nodes and every segment is an
//! edge carrying its point sequence. Chains grow through nodes of degree
//! exactly 2; any other node (a branch point or a free end) terminates
//! every chain touching it. Each maximal simple path or closed loop becomes
//! one trajectory.

use cutpath_core::{
    EndpointRef, PipelineStage, Point2D, Result, Segment, SegmentEnd, Trajectory,
    TrajectoryError,
};
use std::collections::{HashMap, HashSet};

/// Exact coordinate key; -0.0 and 0.0 map to the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeKey(u64, u64);

impl NodeKey {
    fn of(p: Point2D) -> Self {
        NodeKey((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
    }
}

struct MergeGraph<'a> {
    segments: &'a [Segment],
    incidence: HashMap<NodeKey, Vec<EndpointRef>>,
    used: Vec<bool>,
}

impl<'a> MergeGraph<'a> {
    fn new(segments: &'a [Segment]) -> Self {
        let mut incidence: HashMap<NodeKey, Vec<EndpointRef>> = HashMap::new();
        let mut used = vec![false; segments.len()];
        let mut stubs = Vec::new();

        for (i, seg) in segments.iter().enumerate() {
            if seg.is_degenerate() {
                stubs.push(i);
                continue;
            }
            for end in [SegmentEnd::Start, SegmentEnd::End] {
                incidence
                    .entry(NodeKey::of(seg.endpoint(end)))
                    .or_default()
                    .push(EndpointRef::new(i, end));
            }
        }

        // A stub on a node shared with real segments is dropped; an isolated
        // one stays as a singleton, once per node.
        let mut isolated_nodes = HashSet::new();
        for i in stubs {
            let node = NodeKey::of(segments[i].start());
            if incidence.contains_key(&node) || !isolated_nodes.insert(node) {
                tracing::debug!(segment = i, "Zero-length segment excluded from merge");
                used[i] = true;
            }
        }

        Self {
            segments,
            incidence,
            used,
        }
    }

    /// Unused segment continuing the chain at `at`, if the node there has
    /// degree exactly 2.
    fn continuation(&self, at: Point2D) -> Option<EndpointRef> {
        let incident = self.incidence.get(&NodeKey::of(at))?;
        if incident.len() != 2 {
            return None;
        }
        incident.iter().copied().find(|r| !self.used[r.segment])
    }

    /// Grow `points` from its last point until a node stops the chain.
    fn extend_tail(&mut self, points: &mut Vec<Point2D>) {
        while let Some(tail) = points.last().copied() {
            let Some(next) = self.continuation(tail) else {
                break;
            };
            self.used[next.segment] = true;
            let seg = self.segments[next.segment].points();
            match next.end {
                SegmentEnd::Start => points.extend_from_slice(&seg[1..]),
                SegmentEnd::End => points.extend(seg.iter().rev().skip(1)),
            }
        }
    }

    fn trajectory_from(&mut self, index: usize) -> Trajectory {
        self.used[index] = true;
        let mut points = self.segments[index].points().to_vec();

        self.extend_tail(&mut points);
        points.reverse();
        self.extend_tail(&mut points);
        points.reverse();

        Trajectory::new(points)
    }
}

/// Merge segments into maximal trajectories.
///
/// Chains start at the lowest-index unused segment and keep its direction.
///
/// # Errors
/// `EmptyState` when `segments` is empty.
pub fn merge_segments(segments: &[Segment]) -> Result<Vec<Trajectory>> {
    if segments.is_empty() {
        return Err(TrajectoryError::empty(PipelineStage::Merging));
    }

    let mut graph = MergeGraph::new(segments);
    tracing::debug!(
        nodes = graph.incidence.len(),
        branch_nodes = graph.incidence.values().filter(|r| r.len() > 2).count(),
        "Built merge graph"
    );
    let mut trajectories = Vec::new();

    for index in 0..segments.len() {
        if graph.used[index] {
            continue;
        }
        trajectories.push(graph.trajectory_from(index));
    }

    tracing::info!(
        segments = segments.len(),
        trajectories = trajectories.len(),
        closed = trajectories.iter().filter(|t| t.is_closed()).count(),
        "Merged segments into trajectories"
    );

    Ok(trajectories)
}
