//! Drawing entities accepted by the extractor.
//!
//! A closed set of the five curve kinds the pipeline understands. Anything
//! else found in a drawing is reported as [`EntityKind::Unsupported`] by the
//! importer and never reaches the extractor.

use cutpath_core::Point2D;
use std::fmt;

/// Straight line between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineEntity {
    pub start: Point2D,
    pub end: Point2D,
}

/// Open or closed chain of straight spans.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineEntity {
    pub points: Vec<Point2D>,
    pub closed: bool,
}

/// Full circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleEntity {
    pub center: Point2D,
    pub radius: f64,
}

/// Counter-clockwise circular arc, angles in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcEntity {
    pub center: Point2D,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Spline given by fit points, a control polygon, or both.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineEntity {
    pub fit_points: Vec<Point2D>,
    pub control_points: Vec<Point2D>,
    /// Curve degree for the control polygon; 0 means unspecified.
    pub degree: usize,
    /// Knot vector for the control polygon; may be empty.
    pub knots: Vec<f64>,
    /// Rational weights, one per control point; may be empty.
    pub weights: Vec<f64>,
}

impl SplineEntity {
    pub fn from_fit_points(fit_points: Vec<Point2D>) -> Self {
        Self {
            fit_points,
            control_points: Vec::new(),
            degree: 3,
            knots: Vec::new(),
            weights: Vec::new(),
        }
    }

    pub fn from_control_points(control_points: Vec<Point2D>, degree: usize) -> Self {
        Self {
            fit_points: Vec::new(),
            control_points,
            degree,
            knots: Vec::new(),
            weights: Vec::new(),
        }
    }
}

/// A supported drawing entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Line(LineEntity),
    Polyline(PolylineEntity),
    Circle(CircleEntity),
    Arc(ArcEntity),
    Spline(SplineEntity),
}

impl Entity {
    pub fn line(start: Point2D, end: Point2D) -> Self {
        Entity::Line(LineEntity { start, end })
    }

    pub fn polyline(points: Vec<Point2D>, closed: bool) -> Self {
        Entity::Polyline(PolylineEntity { points, closed })
    }

    pub fn circle(center: Point2D, radius: f64) -> Self {
        Entity::Circle(CircleEntity { center, radius })
    }

    pub fn arc(center: Point2D, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Entity::Arc(ArcEntity {
            center,
            radius,
            start_angle,
            end_angle,
        })
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Line(_) => EntityKind::Line,
            Entity::Polyline(_) => EntityKind::Polyline,
            Entity::Circle(_) => EntityKind::Circle,
            Entity::Arc(_) => EntityKind::Arc,
            Entity::Spline(_) => EntityKind::Spline,
        }
    }
}

/// Entity type tag, used for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    Line,
    Polyline,
    Circle,
    Arc,
    Spline,
    /// A drawing entity the pipeline does not discretise.
    Unsupported(String),
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "LINE"),
            Self::Polyline => write!(f, "POLYLINE"),
            Self::Circle => write!(f, "CIRCLE"),
            Self::Arc => write!(f, "ARC"),
            Self::Spline => write!(f, "SPLINE"),
            Self::Unsupported(name) => write!(f, "{}", name),
        }
    }
}
