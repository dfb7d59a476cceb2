use cutpath_core::{Point2D, Segment};
use cutpath_geometry::{cluster_endpoints, merge_segments};

fn seg(points: &[(f64, f64)]) -> Segment {
    Segment::new(points.iter().map(|&p| p.into()).collect()).unwrap()
}

fn pts(points: &[(f64, f64)]) -> Vec<Point2D> {
    points.iter().map(|&p| p.into()).collect()
}

#[test]
fn test_empty_input_is_empty_state() {
    assert!(merge_segments(&[]).unwrap_err().is_empty_state());
}

#[test]
fn test_single_segment_is_singleton_trajectory() {
    let result = merge_segments(&[seg(&[(0.0, 0.0), (3.0, 4.0)])]).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].points, pts(&[(0.0, 0.0), (3.0, 4.0)]));
    assert!(!result[0].is_closed());
}

#[test]
fn test_shared_endpoint_merges_into_three_points() {
    let segments = vec![seg(&[(0.0, 0.0), (1.0, 0.0)]), seg(&[(1.0, 0.0), (1.0, 1.0)])];
    let result = merge_segments(&segments).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].points, pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]));
}

#[test]
fn test_chain_grows_in_both_directions() {
    // Middle segment comes first; neighbours attach at both of its ends
    let segments = vec![
        seg(&[(1.0, 0.0), (2.0, 0.0)]),
        seg(&[(3.0, 0.0), (2.0, 0.0)]),
        seg(&[(0.0, 0.0), (1.0, 0.0)]),
    ];
    let result = merge_segments(&segments).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(
        result[0].points,
        pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])
    );
}

#[test]
fn test_square_closes_into_loop() {
    let segments = vec![
        seg(&[(0.0, 0.0), (1.0, 0.0)]),
        seg(&[(1.0, 0.0), (1.0, 1.0)]),
        seg(&[(1.0, 1.0), (0.0, 1.0)]),
        seg(&[(0.0, 1.0), (0.0, 0.0)]),
    ];
    let result = merge_segments(&segments).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].len(), 5);
    assert!(result[0].is_closed());
    assert_eq!(result[0].points.first(), result[0].points.last());
}

#[test]
fn test_branch_point_terminates_chains() {
    // Three segments meet at the origin
    let segments = vec![
        seg(&[(0.0, 0.0), (1.0, 0.0)]),
        seg(&[(0.0, 0.0), (0.0, 1.0)]),
        seg(&[(0.0, 0.0), (-1.0, 0.0)]),
    ];
    let result = merge_segments(&segments).unwrap();
    assert_eq!(result.len(), 3);
    assert!(result.iter().all(|t| t.len() == 2));
}

#[test]
fn test_result_is_maximal() {
    let segments = vec![
        seg(&[(0.0, 0.0), (1.0, 0.0)]),
        seg(&[(5.0, 5.0), (6.0, 5.0)]),
        seg(&[(1.0, 0.0), (2.0, 1.0)]),
        seg(&[(6.0, 5.0), (7.0, 7.0)]),
    ];
    let result = merge_segments(&segments).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].len(), 3);
    assert_eq!(result[1].len(), 3);
}

#[test]
fn test_degenerate_stub_is_excluded() {
    let segments = vec![
        seg(&[(0.0, 0.0), (1.0, 0.0)]),
        seg(&[(1.0, 0.0), (1.0, 0.0)]),
        seg(&[(1.0, 0.0), (2.0, 0.0)]),
    ];
    let result = merge_segments(&segments).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].points, pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]));
}

#[test]
fn test_gap_boundary_is_inclusive() {
    let merged_at = |gap: f64| {
        let segments = vec![
            seg(&[(0.0, 0.0), (0.0, 1.0)]),
            seg(&[(0.0, 1.0 + gap), (0.0, 2.0)]),
        ];
        let clustering = cluster_endpoints(&segments, 0.25).unwrap();
        merge_segments(&clustering.segments).unwrap().len()
    };

    // Gaps chosen so the sum is exact in binary
    assert_eq!(merged_at(0.25), 1);
    assert_eq!(merged_at(0.5), 2);
}

#[test]
fn test_split_round_trip() {
    let original = pts(&[
        (0.0, 0.0),
        (1.0, 0.5),
        (2.0, 0.25),
        (3.0, 1.0),
        (4.0, 0.0),
    ]);
    let first = Segment::new(original[..3].to_vec()).unwrap();
    let second = Segment::new(original[2..].to_vec()).unwrap();

    let clustering = cluster_endpoints(&[second, first], 0.05).unwrap();
    let result = merge_segments(&clustering.segments).unwrap();
    assert_eq!(result.len(), 1);

    let mut points = result[0].points.clone();
    if points[0] != original[0] {
        points.reverse();
    }
    assert_eq!(points, original);
}

#[test]
fn test_short_line_collapses_to_singleton_stub() {
    // Both ends of a 0.03 line fall within ε = 0.05 of each other
    let segments = vec![seg(&[(0.0, 0.0), (0.03, 0.0)])];
    let clustering = cluster_endpoints(&segments, 0.05).unwrap();
    assert!(clustering.segments[0].is_degenerate());

    let result = merge_segments(&clustering.segments).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].len(), 2);
    assert_eq!(result[0].points[0], result[0].points[1]);
}
