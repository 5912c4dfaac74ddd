use super::*;

#[test]
fn segment_has_expected_points() {
    let p = Pattern::segment(2, 0, 4);
    assert_eq!(p.point_count(), 4);
    assert_eq!(p.dim_count(), 2);
    assert_eq!(p.rounded_coord_range(0), (0, 3));
    assert_eq!(p.rounded_coord_range(1), (0, 0));
}

#[test]
fn rectangle_point_count_matches_product() {
    let p = Pattern::rectangle(&[3, 4], false);
    assert_eq!(p.point_count(), 12);
    assert!(p.is_actually_rectangular());
}

#[test]
fn rectangle_minkowski_decomposes_into_edge_segments() {
    let p = Pattern::rectangle(&[3, 5], false);
    let summands = p.minkowski_decomposition(2);
    assert_eq!(summands.len(), 2);
    let total: usize = summands.iter().map(|s| s.point_count()).sum();
    assert_eq!(total, 3 + 5);
    assert!(p.has_minkowski_decomposition(2));
}

#[test]
fn single_point_pattern_has_no_decomposition() {
    let p = Pattern::single_origin(2);
    let summands = p.minkowski_decomposition(1);
    assert_eq!(summands.len(), 1);
    assert_eq!(summands[0], p);
    assert!(!p.has_minkowski_decomposition(1));
}

#[test]
fn segment_is_not_rectangular_decomposable_further() {
    let p = Pattern::segment(2, 1, 6);
    let summands = p.minkowski_decomposition(2);
    assert_eq!(summands.len(), 1);
}

#[test]
fn disk_recognized_and_decomposed_into_scanline_rows() {
    let p = Pattern::disk(4);
    let decompositions = p.all_union_decompositions(2);
    assert_eq!(decompositions.len(), 1);
    let rows = &decompositions[0];
    assert!(rows.len() >= 5);
    let total_points: usize = rows.iter().map(|r| r.point_count()).sum();
    assert_eq!(total_points, p.point_count());
    for row in rows {
        assert!(row.as_axis_segment().is_some());
    }
}

#[test]
fn cross_has_no_recognized_decomposition() {
    let p = Pattern::cross(2);
    assert_eq!(p.point_count(), 5);
    let decompositions = p.all_union_decompositions(2);
    assert_eq!(decompositions.len(), 1);
    assert_eq!(decompositions[0].len(), 1);
}

#[test]
fn as_axis_segment_detects_shifted_segment() {
    let p = Pattern::segment(1, 0, 5).shift(&[10]);
    let (axis, start, len) = p.as_axis_segment().unwrap();
    assert_eq!(axis, 0);
    assert_eq!(start, 10);
    assert_eq!(len, 5);
}

#[test]
fn as_axis_segment_rejects_non_segment() {
    let p = Pattern::rectangle(&[2, 2], false);
    assert!(p.as_axis_segment().is_none());
}

#[test]
fn normalize_segment_moves_start_to_origin() {
    let p = Pattern::segment(1, 0, 5).shift(&[10]);
    let (normalized, translation) = p.normalize_segment().unwrap();
    assert_eq!(normalized.rounded_coord_range(0), (0, 4));
    assert_eq!(translation, vec![10]);
}

#[test]
fn shift_translates_every_point() {
    let p = Pattern::single_origin(2).shift(&[3, -2]);
    assert_eq!(p.points()[0].coords, vec![3, -2]);
}

#[test]
fn projection_along_axis_deduplicates() {
    let p = Pattern::rectangle(&[3, 3], false);
    let proj = p.projection_along_axis(1);
    assert_eq!(proj.point_count(), 3);
}

#[test]
fn forced_non_integer_reports_false() {
    let p = Pattern::single_origin(1).with_forced_non_integer();
    assert!(!p.is_surely_integer());
}

#[test]
fn non_flat_point_carries_increment() {
    let p = Point::with_increment(vec![1, 2], 0.5);
    assert_eq!(p.dim_count(), 3);
    assert_eq!(p.increment, Some(0.5));
}
