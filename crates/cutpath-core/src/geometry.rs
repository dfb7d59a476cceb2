//! Geometry primitives shared by the pipeline stages.
//!
//! A [`Segment`] is the discretised form of one drawing entity; a
//! [`Trajectory`] is one or more segments joined end to end.

use serde::{Deserialize, Serialize};

/// A 2D point in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Which end of a segment an endpoint reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentEnd {
    Start,
    End,
}

/// Identifies one endpoint of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointRef {
    pub segment: usize,
    pub end: SegmentEnd,
}

impl EndpointRef {
    pub fn new(segment: usize, end: SegmentEnd) -> Self {
        Self { segment, end }
    }

    /// Position in the flat endpoint enumeration: `2i` for the start of
    /// segment `i`, `2i + 1` for its end.
    pub fn ordinal(&self) -> usize {
        match self.end {
            SegmentEnd::Start => 2 * self.segment,
            SegmentEnd::End => 2 * self.segment + 1,
        }
    }

    /// Inverse of [`EndpointRef::ordinal`].
    pub fn from_ordinal(ordinal: usize) -> Self {
        let end = if ordinal % 2 == 0 {
            SegmentEnd::Start
        } else {
            SegmentEnd::End
        };
        Self::new(ordinal / 2, end)
    }
}

/// Discretised polyline produced from a single drawing entity.
///
/// Always holds at least two points; direction carries no meaning for
/// merging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    points: Vec<Point2D>,
}

impl Segment {
    /// Build a segment, or `None` when fewer than two points are given.
    pub fn new(points: Vec<Point2D>) -> Option<Self> {
        (points.len() >= 2).then_some(Self { points })
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point2D> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> Point2D {
        self.points[0]
    }

    pub fn end(&self) -> Point2D {
        self.points[self.points.len() - 1]
    }

    pub fn endpoint(&self, end: SegmentEnd) -> Point2D {
        match end {
            SegmentEnd::Start => self.start(),
            SegmentEnd::End => self.end(),
        }
    }

    /// Copy of this segment with its first and last points replaced.
    /// Interior points are untouched.
    pub fn with_endpoints(&self, start: Point2D, end: Point2D) -> Self {
        let mut points = self.points.clone();
        let last = points.len() - 1;
        points[0] = start;
        points[last] = end;
        Self { points }
    }

    /// True when every point coincides, e.g. a short line whose ends were
    /// snapped into the same cluster.
    pub fn is_degenerate(&self) -> bool {
        let first = self.points[0];
        self.points.iter().all(|p| *p == first)
    }

    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }
}

/// One continuous cutting path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<Point2D>,
}

impl Trajectory {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closed trajectories end exactly where they start.
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.points.first() == self.points.last()
    }

    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }

    /// Axis-aligned bounds as (min_x, min_y, max_x, max_y).
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.points.first()?;
        let init = (first.x, first.y, first.x, first.y);
        Some(self.points.iter().fold(init, |(x0, y0, x1, y1), p| {
            (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))
        }))
    }
}
