use cutpath_core::{Point2D, TrajectoryError};
use cutpath_geometry::{DxfImporter, Entity, EntityKind, ProcessingContext, ProcessingOptions};
use dxf::entities::{Circle, Entity as DxfEntity, EntityType, Line, LwPolyline, Text};
use dxf::enums::AcadVersion;
use dxf::{Drawing, LwPolylineVertex};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn dxf_point(x: f64, y: f64) -> dxf::Point {
    dxf::Point::new(x, y, 0.0)
}

fn write_drawing(dir: &Path, name: &str, entities: Vec<EntityType>) -> PathBuf {
    let mut drawing = Drawing::new();
    drawing.header.version = AcadVersion::R2000;
    for specific in entities {
        drawing.add_entity(DxfEntity::new(specific));
    }
    let path = dir.join(name);
    drawing.save_file(&path).unwrap();
    path
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> EntityType {
    EntityType::Line(Line::new(dxf_point(x1, y1), dxf_point(x2, y2)))
}

fn context() -> ProcessingContext {
    ProcessingContext::new(ProcessingOptions::default()).unwrap()
}

#[test]
fn test_single_line_drawing() {
    let dir = TempDir::new().unwrap();
    let path = write_drawing(dir.path(), "line.dxf", vec![line(0.0, 0.0, 10.0, 0.0)]);

    let mut ctx = context();
    let stats = ctx.process_file(&path).unwrap();
    assert_eq!(stats.original_segment_count, 1);
    assert_eq!(stats.final_trajectory_count, 1);
    assert_eq!(stats.cluster_count, 2);
    assert_eq!(stats.tolerance_used, 0.05);
    assert_eq!(ctx.trajectories()[0].len(), 2);
    assert_eq!(ctx.source(), Some(path.as_path()));
}

#[test]
fn test_circle_drawing_yields_closed_trajectory() {
    let dir = TempDir::new().unwrap();
    let path = write_drawing(
        dir.path(),
        "circle.dxf",
        vec![EntityType::Circle(Circle::new(dxf_point(5.0, 5.0), 2.5))],
    );

    let mut ctx = context();
    ctx.process_file(&path).unwrap();
    assert_eq!(ctx.trajectories().len(), 1);
    let traj = &ctx.trajectories()[0];
    assert_eq!(traj.len(), 200);
    // Both ends fall in one cluster and snap onto the same coordinate
    assert_eq!(traj.points[0], traj.points[199]);
    assert!(traj.is_closed());
}

#[test]
fn test_outline_with_gaps_is_stitched() {
    let dir = TempDir::new().unwrap();
    let path = write_drawing(
        dir.path(),
        "square.dxf",
        vec![
            line(0.0, 0.0, 10.0, 0.0),
            line(10.02, 0.0, 10.0, 10.0),
            line(10.0, 10.01, 0.0, 10.0),
            line(0.0, 10.0, 0.0, 0.03),
        ],
    );

    let mut ctx = context();
    let stats = ctx.process_file(&path).unwrap();
    assert_eq!(stats.original_segment_count, 4);
    assert_eq!(stats.cluster_count, 4);
    assert_eq!(stats.final_trajectory_count, 1);
    assert!(ctx.trajectories()[0].is_closed());
}

#[test]
fn test_unsupported_entities_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_drawing(
        dir.path(),
        "mixed.dxf",
        vec![EntityType::Text(Text::default()), line(0.0, 0.0, 1.0, 1.0)],
    );

    let imported = DxfImporter::import_file(&path).unwrap();
    assert_eq!(imported.entities.len(), 1);
    assert_eq!(imported.skipped, vec![EntityKind::Unsupported("TEXT".to_string())]);

    let mut ctx = context();
    assert_eq!(ctx.load(&path).unwrap(), 1);
}

#[test]
fn test_closed_lwpolyline_import() {
    let dir = TempDir::new().unwrap();
    let mut poly = LwPolyline::default();
    for (x, y) in [(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)] {
        poly.vertices.push(LwPolylineVertex {
            x,
            y,
            ..Default::default()
        });
    }
    poly.flags = 1;
    let path = write_drawing(dir.path(), "poly.dxf", vec![EntityType::LwPolyline(poly)]);

    let imported = DxfImporter::import_file(&path).unwrap();
    match &imported.entities[..] {
        [Entity::Polyline(p)] => {
            assert!(p.closed);
            assert_eq!(p.points.len(), 3);
        }
        other => panic!("unexpected entities: {:?}", other),
    }

    let mut ctx = context();
    ctx.process_file(&path).unwrap();
    assert_eq!(ctx.trajectories()[0].len(), 4);
    assert!(ctx.trajectories()[0].is_closed());
}

#[test]
fn test_missing_file_is_wrapped_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.dxf");

    let err = context().process_file(&path).unwrap_err();
    match err {
        TrajectoryError::Processing { source, .. } => {
            assert!(matches!(*source, TrajectoryError::FileRead { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_drawing_without_usable_entities() {
    let dir = TempDir::new().unwrap();
    let path = write_drawing(dir.path(), "text.dxf", vec![EntityType::Text(Text::default())]);

    let err = context().process_file(&path).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        TrajectoryError::NoValidEntities { .. }
    ));
}

#[test]
fn test_failed_run_keeps_previous_result() {
    let dir = TempDir::new().unwrap();
    let good = write_drawing(dir.path(), "good.dxf", vec![line(0.0, 0.0, 1.0, 0.0)]);

    let mut ctx = context();
    ctx.process_file(&good).unwrap();
    assert!(ctx.process_file(dir.path().join("absent.dxf")).is_err());
    assert_eq!(ctx.trajectories().len(), 1);
    assert_eq!(ctx.source(), Some(good.as_path()));
}

#[test]
fn test_single_short_line_still_exports() {
    let dir = TempDir::new().unwrap();
    let path = write_drawing(dir.path(), "dot.dxf", vec![line(0.0, 0.0, 0.03, 0.0)]);

    let mut ctx = context();
    let stats = ctx.process_file(&path).unwrap();
    assert_eq!(stats.cluster_count, 1);
    assert_eq!(stats.final_trajectory_count, 1);
    assert_eq!(ctx.trajectories()[0].len(), 2);

    let out = ctx.export_to_text(dir.path().join("dot.txt")).unwrap();
    assert_eq!(std::fs::read_to_string(out).unwrap().lines().count(), 4);
}

#[test]
fn test_staged_run_from_memory() {
    let mut ctx = context();
    let entities = vec![
        Entity::line(Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)),
        Entity::line(Point2D::new(1.0, 0.0), Point2D::new(2.0, 0.0)),
    ];
    assert_eq!(ctx.load_entities(&entities).unwrap(), 2);
    assert_eq!(ctx.cluster_endpoints().unwrap().cluster_count(), 3);
    assert_eq!(ctx.merge_geometries().unwrap().len(), 1);
    assert_eq!(ctx.trajectories()[0].len(), 3);

    // Merging again recomputes rather than appends
    ctx.merge_geometries().unwrap();
    assert_eq!(ctx.statistics().final_trajectory_count, 1);
}

#[test]
fn test_export_and_preview_after_run() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context();
    ctx.load_entities(&[Entity::line(Point2D::new(0.0, 0.0), Point2D::new(2.0, 1.0))])
        .unwrap();
    ctx.cluster_endpoints().unwrap();
    ctx.merge_geometries().unwrap();

    let out = ctx.export_to_text(dir.path().join("out.txt")).unwrap();
    assert_eq!(
        std::fs::read_to_string(out).unwrap(),
        "X Y\n0.000000 0.000000\n2.000000 1.000000\nNaN NaN\n"
    );

    let svg_path = dir.path().join("preview.svg");
    let svg = ctx.render_preview(Some(&svg_path)).unwrap();
    assert_eq!(std::fs::read_to_string(&svg_path).unwrap(), svg);
    assert!(svg.contains("<polyline"));
}
