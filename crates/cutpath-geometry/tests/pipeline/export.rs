use cutpath_core::{Point2D, Trajectory};
use cutpath_geometry::{export_to_text, write_trajectories};
use tempfile::TempDir;

fn two_trajectories() -> Vec<Trajectory> {
    vec![
        Trajectory::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.5)]),
        Trajectory::new(vec![Point2D::new(-2.5, 3.0), Point2D::new(4.0, 1.0 / 3.0)]),
    ]
}

#[test]
fn test_export_format() {
    let mut buf = Vec::new();
    write_trajectories(&two_trajectories(), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "X Y",
            "0.000000 0.000000",
            "1.000000 0.500000",
            "NaN NaN",
            "-2.500000 3.000000",
            "4.000000 0.333333",
            "NaN NaN",
        ]
    );
}

#[test]
fn test_export_empty_is_error() {
    let mut buf = Vec::new();
    assert!(write_trajectories(&[], &mut buf).unwrap_err().is_empty_state());
    assert!(buf.is_empty());
}

#[test]
fn test_export_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.txt");

    let written = export_to_text(&two_trajectories(), &path).unwrap();
    assert_eq!(written, path);

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 7);
    assert!(text.ends_with("NaN NaN\n"));
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.txt");
    let err = export_to_text(&two_trajectories(), &path).unwrap_err();
    assert!(matches!(err, cutpath_core::TrajectoryError::Io(_)));
}
