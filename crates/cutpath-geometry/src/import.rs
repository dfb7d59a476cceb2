//! # DXF Import
//!
//! Reads a DXF drawing with the `dxf` crate and maps its entities onto the
//! pipeline's [`Entity`] set.
//!
//! Supports:
//! - LINE, CIRCLE, ARC
//! - LWPOLYLINE and POLYLINE (closed flag honoured, bulges ignored)
//! - SPLINE (fit points, control points, degree, knots, weights)
//!
//! Every other entity kind is reported as unsupported and skipped with a
//! warning.

use crate::entity::{Entity, EntityKind, SplineEntity};
use cutpath_core::{Point2D, Result, TrajectoryError};
use dxf::entities::EntityType;
use std::path::Path;

/// Entities read from one drawing.
#[derive(Debug, Clone, Default)]
pub struct ImportedDrawing {
    /// Supported entities in file order
    pub entities: Vec<Entity>,
    /// Kinds of the entities that were skipped
    pub skipped: Vec<EntityKind>,
}

impl ImportedDrawing {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// DXF importer producing pipeline entities
pub struct DxfImporter;

impl DxfImporter {
    /// Import DXF from file path
    ///
    /// # Errors
    /// Returns `FileRead` if the file cannot be opened or parsed.
    pub fn import_file(path: impl AsRef<Path>) -> Result<ImportedDrawing> {
        let path = path.as_ref();
        let file_error = |reason: String| TrajectoryError::FileRead {
            path: path.to_path_buf(),
            reason,
        };

        let mut file = std::fs::File::open(path).map_err(|e| file_error(e.to_string()))?;
        let drawing = dxf::Drawing::load(&mut file).map_err(|e| file_error(e.to_string()))?;

        let imported = Self::import_drawing(&drawing);
        tracing::info!(
            path = %path.display(),
            entities = imported.entities.len(),
            skipped = imported.skipped_count(),
            "Imported DXF drawing"
        );
        Ok(imported)
    }

    /// Convert an already-loaded drawing
    pub fn import_drawing(drawing: &dxf::Drawing) -> ImportedDrawing {
        let mut imported = ImportedDrawing::default();

        for entity in drawing.entities() {
            match convert_entity(&entity.specific) {
                Ok(converted) => imported.entities.push(converted),
                Err(kind) => {
                    tracing::warn!(
                        kind = %kind,
                        layer = %entity.common.layer,
                        "Unsupported entity skipped"
                    );
                    imported.skipped.push(kind);
                }
            }
        }

        imported
    }
}

fn to_point(p: &dxf::Point) -> Point2D {
    Point2D::new(p.x, p.y)
}

fn convert_entity(entity_type: &EntityType) -> std::result::Result<Entity, EntityKind> {
    match entity_type {
        EntityType::Line(line) => Ok(Entity::line(to_point(&line.p1), to_point(&line.p2))),
        EntityType::Circle(circle) => Ok(Entity::circle(to_point(&circle.center), circle.radius)),
        EntityType::Arc(arc) => Ok(Entity::arc(
            to_point(&arc.center),
            arc.radius,
            arc.start_angle,
            arc.end_angle,
        )),
        EntityType::LwPolyline(polyline) => {
            let points = polyline
                .vertices
                .iter()
                .map(|v| Point2D::new(v.x, v.y))
                .collect();
            // Bit 0 (value 1) indicates closed
            Ok(Entity::polyline(points, polyline.flags & 1 != 0))
        }
        EntityType::Polyline(polyline) => {
            let points = polyline.vertices().map(|v| to_point(&v.location)).collect();
            Ok(Entity::polyline(points, polyline.flags & 1 != 0))
        }
        EntityType::Spline(spline) => Ok(Entity::Spline(SplineEntity {
            fit_points: spline.fit_points.iter().map(to_point).collect(),
            control_points: spline.control_points.iter().map(to_point).collect(),
            degree: spline.degree_of_curve.max(0) as usize,
            knots: spline.knot_values.clone(),
            weights: spline.weight_values.clone(),
        })),
        other => Err(EntityKind::Unsupported(unsupported_name(other).to_string())),
    }
}

fn unsupported_name(entity_type: &EntityType) -> &'static str {
    match entity_type {
        EntityType::Ellipse(_) => "ELLIPSE",
        EntityType::Insert(_) => "INSERT",
        EntityType::Text(_) => "TEXT",
        EntityType::MText(_) => "MTEXT",
        EntityType::ModelPoint(_) => "POINT",
        EntityType::Solid(_) => "SOLID",
        _ => "UNKNOWN",
    }
}
