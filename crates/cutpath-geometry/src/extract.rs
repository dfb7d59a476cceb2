//! # Entity Extractor
//!
//! Discretises one drawing entity into a [`Segment`]. Every entity kind
//! has its own extraction function; failures are reported per entity and
//! never abort a batch.

use crate::entity::{ArcEntity, CircleEntity, Entity, LineEntity, PolylineEntity, SplineEntity};
use crate::options::ProcessingOptions;
use crate::spline::SplineFitter;
use cutpath_core::{Point2D, Result, Segment, TrajectoryError};
use std::f64::consts::PI;

/// Converts entities into segments using the sampling densities of a run.
#[derive(Debug, Clone, Copy)]
pub struct EntityExtractor {
    options: ProcessingOptions,
}

impl EntityExtractor {
    pub fn new(options: ProcessingOptions) -> Self {
        Self { options }
    }

    /// Extract zero or one segment from an entity.
    ///
    /// `Ok(None)` means the entity produced fewer than two points and is
    /// dropped. `Err` carries an `EntityProcessing` diagnostic.
    pub fn extract(&self, entity: &Entity) -> Result<Option<Segment>> {
        let points = match entity {
            Entity::Line(line) => extract_line(line)?,
            Entity::Polyline(polyline) => extract_polyline(polyline)?,
            Entity::Circle(circle) => extract_circle(circle, self.options.circle_samples)?,
            Entity::Arc(arc) => extract_arc(arc, self.options.arc_samples)?,
            Entity::Spline(spline) => extract_spline(spline, self.options.spline_samples)?,
        };

        Ok(Segment::new(points))
    }

    /// Extract every entity, logging and skipping the ones that fail.
    pub fn extract_all(&self, entities: &[Entity]) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(entities.len());

        for (index, entity) in entities.iter().enumerate() {
            match self.extract(entity) {
                Ok(Some(segment)) => segments.push(segment),
                Ok(None) => {
                    tracing::debug!(index, kind = %entity.kind(), "Entity produced fewer than two points; dropped");
                }
                Err(e) => {
                    tracing::warn!(index, kind = %entity.kind(), "Skipping entity: {}", e);
                }
            }
        }

        segments
    }
}

fn check_point(kind: &str, p: &Point2D) -> Result<()> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(TrajectoryError::entity(kind, "coordinates must be finite"))
    }
}

fn check_radius(kind: &str, radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(TrajectoryError::entity(
            kind,
            format!("radius must be positive, got {}", radius),
        ))
    }
}

fn extract_line(line: &LineEntity) -> Result<Vec<Point2D>> {
    check_point("LINE", &line.start)?;
    check_point("LINE", &line.end)?;
    Ok(vec![line.start, line.end])
}

fn extract_polyline(polyline: &PolylineEntity) -> Result<Vec<Point2D>> {
    for p in &polyline.points {
        check_point("POLYLINE", p)?;
    }

    let mut points = polyline.points.clone();
    if polyline.closed && points.len() >= 2 && points.first() != points.last() {
        points.push(points[0]);
    }
    Ok(points)
}

fn extract_circle(circle: &CircleEntity, samples: usize) -> Result<Vec<Point2D>> {
    check_point("CIRCLE", &circle.center)?;
    check_radius("CIRCLE", circle.radius)?;

    let samples = samples.max(2);
    let step = 2.0 * PI / (samples - 1) as f64;
    Ok(sample_circle(circle.center, circle.radius, 0.0, step, samples))
}

fn extract_arc(arc: &ArcEntity, samples: usize) -> Result<Vec<Point2D>> {
    check_point("ARC", &arc.center)?;
    check_radius("ARC", arc.radius)?;
    if !arc.start_angle.is_finite() || !arc.end_angle.is_finite() {
        return Err(TrajectoryError::entity("ARC", "angles must be finite"));
    }

    let sweep = arc_sweep_degrees(arc.start_angle, arc.end_angle);
    let start = arc.start_angle.to_radians();
    let samples = samples.max(2);
    let step = sweep.to_radians() / (samples - 1) as f64;
    Ok(sample_circle(arc.center, arc.radius, start, step, samples))
}

/// Counter-clockwise sweep from start to end, in (0, 360]. Equal angles
/// describe a full turn.
pub fn arc_sweep_degrees(start_angle: f64, end_angle: f64) -> f64 {
    let sweep = (end_angle - start_angle).rem_euclid(360.0);
    if sweep == 0.0 {
        360.0
    } else {
        sweep
    }
}

fn sample_circle(center: Point2D, radius: f64, start: f64, step: f64, samples: usize) -> Vec<Point2D> {
    (0..samples)
        .map(|k| {
            let t = start + k as f64 * step;
            Point2D::new(center.x + radius * t.cos(), center.y + radius * t.sin())
        })
        .collect()
}

fn extract_spline(spline: &SplineEntity, samples: usize) -> Result<Vec<Point2D>> {
    for p in spline.fit_points.iter().chain(&spline.control_points) {
        check_point("SPLINE", p)?;
    }

    SplineFitter::new(samples)
        .fit(spline)
        .map_err(|e| TrajectoryError::entity("SPLINE", e.to_string()))
}
