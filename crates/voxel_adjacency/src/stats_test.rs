use super::*;

#[test]
fn test_occupancy_of_empty_grid() {
  let stats = RunStats::default();
  assert_eq!(stats.occupancy(), 0.0);
  assert_eq!(stats.channels(), 1);
}

#[test]
fn test_occupancy_fraction() {
  let stats = RunStats {
    voxel_count: 8,
    voi_count: 2,
    ..Default::default()
  };
  assert!((stats.occupancy() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn test_total_timing() {
  let timings = StageTimings {
    voi_us: 1,
    labels_us: 2,
    discover_us: 3,
    pack_us: 4,
  };
  assert_eq!(timings.total_us(), 10);
}

#[test]
fn test_display_summary() {
  let stats = RunStats {
    voxel_count: 4,
    voi_count: 2,
    label_count: 2,
    max_neighbors: 1,
    timings: StageTimings::default(),
  };
  let text = stats.to_string();
  assert!(text.starts_with("2 labels over 2/4 voxels (50.00%)"), "{}", text);
  assert!(text.contains("2 channels"));
}
