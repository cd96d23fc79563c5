use glam::UVec3;

use super::*;
use crate::labels::LabelSet;
use crate::neighbors::discover;
use crate::test_utils::*;

fn pack_grid(grid: &VoxelGrid) -> OutputGrid {
  let voi = VoiIndex::build(grid);
  let labels = LabelSet::extract(grid, &voi);
  let discovery = discover(grid, &voi, labels);
  pack(grid, &voi, &discovery.table, &discovery.label_index)
}

#[test]
fn test_separated_labels_single_channel() {
  let output = pack_grid(&line_grid(&[1, 0, 2]));
  assert_eq!(output.channels(), 1);
  assert_eq!(output.dims(), UVec3::new(3, 1, 1));
  assert_eq!(output.as_slice(), &[1, 0, 2]);
}

#[test]
fn test_empty_volume_still_has_one_channel() {
  let grid = VoxelGrid::zeroed(UVec3::new(2, 3, 4)).unwrap();
  let output = pack_grid(&grid);
  assert_eq!(output.channels(), 1);
  assert_eq!(output.as_slice().len(), 24);
  assert!(output.as_slice().iter().all(|&v| v == 0));
}

#[test]
fn test_zero_sized_volume() {
  let grid = VoxelGrid::new(UVec3::new(0, 3, 3), Vec::new()).unwrap();
  let output = pack_grid(&grid);
  assert_eq!(output.channels(), 1);
  assert!(output.as_slice().is_empty());
}

#[test]
fn test_single_label_without_neighbors() {
  let grid = grid_from_fn(UVec3::splat(2), |_| 6);
  let output = pack_grid(&grid);
  assert_eq!(output.channels(), 1);
  assert!(output.channel(0).iter().all(|&v| v == 6));
}

#[test]
fn test_rows_spread_over_channels() {
  let output = pack_grid(&line_grid(&[1, 2, 2, 3, 0]));
  // Label 2 has two neighbors, so three channels
  assert_eq!(output.channels(), 3);
  assert_eq!(output.channel(0), &[1, 2, 2, 3, 0]);
  assert_eq!(output.channel(1), &[2, 1, 1, 2, 0]);
  assert_eq!(output.channel(2), &[0, 3, 3, 0, 0]);
}

#[test]
fn test_channel_major_offsets() {
  let output = pack_grid(&line_grid(&[1, 2]));
  // channel * voxel_count + index
  assert_eq!(output.as_slice(), &[1, 2, 2, 1]);
  assert_eq!(output.get(0, 1), 2);
  assert_eq!(output.get(1, 1), 1);
  assert_eq!(output.voxel_count(), 2);
}

#[test]
fn test_neighbors_at_reads_back_rows() {
  let output = pack_grid(&line_grid(&[1, 2, 2, 3, 0]));
  assert_eq!(output.neighbors_at(0), vec![2]);
  assert_eq!(output.neighbors_at(1), vec![1, 3]);
  assert_eq!(output.neighbors_at(3), vec![2]);
  assert!(output.neighbors_at(4).is_empty());
}

#[test]
fn test_background_untouched_in_every_channel() {
  let output = pack_grid(&line_grid(&[1, 2, 0, 0, 3, 4]));
  for channel in 0..output.channels() {
    assert_eq!(output.get(2, channel), 0);
    assert_eq!(output.get(3, channel), 0);
  }
}

#[test]
fn test_into_vec_matches_slice() {
  let output = pack_grid(&line_grid(&[4, 5]));
  let copy = output.as_slice().to_vec();
  assert_eq!(output.into_vec(), copy);
}
