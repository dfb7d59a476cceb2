//! # Endpoint Clusterer
//!
//! Snaps near-coincident segment endpoints together.
//!
//! Endpoints are enumerated as `2i` (start of segment `i`) and `2i + 1`
//! (its end). Two endpoints are linked when their Euclidean distance is at
//! most ε; clusters are the connected components of that relation
//! (single linkage, every endpoint belongs to exactly one cluster).
//!
//! An R*-tree supplies neighbour candidates, each confirmed with the exact
//! distance test, and a union-find joins the components. Cluster ids are
//! assigned in order of first discovery, so the result is deterministic for
//! a fixed input order.

use crate::options::validate_tolerance;
use cutpath_core::{EndpointRef, PipelineStage, Point2D, Result, Segment, TrajectoryError};
use petgraph::unionfind::UnionFind;
use rstar::primitives::GeomWithData;
use rstar::RTree;
use std::collections::HashMap;

type IndexedEndpoint = GeomWithData<[f64; 2], usize>;

/// A set of endpoints treated as one point.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: usize,
    pub centroid: Point2D,
    pub members: Vec<EndpointRef>,
}

/// Result of one clustering run.
#[derive(Debug, Clone)]
pub struct Clustering {
    /// Clusters in discovery order; `clusters[k].id == k`
    pub clusters: Vec<Cluster>,
    /// Input segments with endpoints replaced by their cluster centroid
    pub segments: Vec<Segment>,
    labels: Vec<usize>,
}

impl Clustering {
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Cluster id assigned to an endpoint
    pub fn cluster_of(&self, endpoint: EndpointRef) -> usize {
        self.labels[endpoint.ordinal()]
    }
}

/// Cluster the endpoints of `segments` with tolerance ε.
///
/// # Errors
/// `EmptyState` when `segments` is empty, `InvalidTolerance` when ε is not a
/// positive finite distance.
pub fn cluster_endpoints(segments: &[Segment], tolerance: f64) -> Result<Clustering> {
    if segments.is_empty() {
        return Err(TrajectoryError::empty(PipelineStage::Clustering));
    }
    validate_tolerance(tolerance)?;

    let endpoints: Vec<Point2D> = segments
        .iter()
        .flat_map(|s| [s.start(), s.end()])
        .collect();
    let n = endpoints.len();

    let tree = RTree::bulk_load(
        endpoints
            .iter()
            .enumerate()
            .map(|(i, p)| IndexedEndpoint::new([p.x, p.y], i))
            .collect(),
    );

    // Candidate radius is padded; the exact test below decides membership.
    let search_radius = tolerance * (1.0 + 1e-9);
    let search_radius_2 = search_radius * search_radius;

    let mut uf = UnionFind::<usize>::new(n);
    for (i, p) in endpoints.iter().enumerate() {
        for candidate in tree.locate_within_distance([p.x, p.y], search_radius_2) {
            let j = candidate.data;
            if j > i && p.distance_to(&endpoints[j]) <= tolerance {
                uf.union(i, j);
            }
        }
    }

    let mut root_to_id: HashMap<usize, usize> = HashMap::new();
    let mut members: Vec<Vec<usize>> = Vec::new();
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let root = uf.find_mut(i);
        let id = match root_to_id.get(&root) {
            Some(&id) => id,
            None => {
                let id = members.len();
                root_to_id.insert(root, id);
                members.push(Vec::new());
                id
            }
        };
        members[id].push(i);
        labels.push(id);
    }

    let clusters: Vec<Cluster> = members
        .iter()
        .enumerate()
        .map(|(id, ordinals)| Cluster {
            id,
            centroid: centroid(ordinals.iter().map(|&o| endpoints[o])),
            members: ordinals.iter().map(|&o| EndpointRef::from_ordinal(o)).collect(),
        })
        .collect();

    let snapped: Vec<Segment> = segments
        .iter()
        .enumerate()
        .map(|(i, s)| {
            s.with_endpoints(
                clusters[labels[2 * i]].centroid,
                clusters[labels[2 * i + 1]].centroid,
            )
        })
        .collect();

    tracing::info!(
        endpoints = n,
        clusters = clusters.len(),
        tolerance,
        "Clustered segment endpoints"
    );

    Ok(Clustering {
        clusters,
        segments: snapped,
        labels,
    })
}

/// Arithmetic mean of the points. Coincident points keep their exact
/// coordinate so re-clustering snapped endpoints is a fixed point.
fn centroid(points: impl Iterator<Item = Point2D>) -> Point2D {
    let points: Vec<Point2D> = points.collect();
    let first = points[0];
    if points.iter().all(|p| *p == first) {
        return first;
    }

    let count = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point2D::new(sx / count, sy / count)
}
