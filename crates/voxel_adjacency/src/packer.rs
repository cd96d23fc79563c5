//! Ragged-to-dense packing of the adjacency table.
//!
//! # Output Layout
//!
//! ```text
//! channel 0          channel 1            ...  channel max_neighbors
//! ┌───────────────┐  ┌─────────────────┐      ┌─────────────────┐
//! │ input labels  │  │ 1st neighbor of │ ...  │ last slot       │
//! │ (VOI only)    │  │ voxel's label   │      │ (0 if unused)   │
//! └───────────────┘  └─────────────────┘      └─────────────────┘
//!  offset = channel * voxel_count + index
//! ```
//!
//! The trailing dimension is always `max_neighbors + 1`, so a volume with no
//! adjacency (or no labels at all) still gets one channel.

use glam::UVec3;

use crate::grid::{Label, VoxelGrid, BACKGROUND};
use crate::neighbors::{AdjacencyTable, LabelIndexGrid};
use crate::voi::VoiIndex;

/// Dense 4D label grid: spatial dims plus a trailing channel axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputGrid {
  dims: UVec3,
  channels: usize,
  voxel_count: usize,
  data: Vec<Label>,
}

impl OutputGrid {
  fn zeroed(dims: UVec3, voxel_count: usize, channels: usize) -> Self {
    Self {
      dims,
      channels,
      voxel_count,
      data: vec![BACKGROUND; voxel_count * channels],
    }
  }

  /// Spatial dimensions, identical to the input grid.
  #[inline]
  pub fn dims(&self) -> UVec3 {
    self.dims
  }

  /// Length of the trailing dimension.
  #[inline]
  pub fn channels(&self) -> usize {
    self.channels
  }

  /// Voxels per channel.
  #[inline]
  pub fn voxel_count(&self) -> usize {
    self.voxel_count
  }

  /// Whole buffer, channel-major.
  #[inline]
  pub fn as_slice(&self) -> &[Label] {
    &self.data
  }

  pub fn into_vec(self) -> Vec<Label> {
    self.data
  }

  /// One channel as a contiguous slice.
  pub fn channel(&self, channel: usize) -> &[Label] {
    let start = channel * self.voxel_count;
    &self.data[start..start + self.voxel_count]
  }

  #[inline]
  pub fn get(&self, index: usize, channel: usize) -> Label {
    self.data[channel * self.voxel_count + index]
  }

  /// Neighbor labels written at voxel `index` (channels `1..`), stopping at
  /// the first empty slot.
  pub fn neighbors_at(&self, index: usize) -> Vec<Label> {
    (1..self.channels)
      .map(|channel| self.get(index, channel))
      .take_while(|&label| label != BACKGROUND)
      .collect()
  }
}

/// Expand each label's row onto every voxel the label occupies.
///
/// Channel 0 receives the input label, channels `1..=len(row)` receive the
/// row, and everything else stays background.
#[cfg_attr(feature = "trace_spans", tracing::instrument(skip_all, name = "packer::pack"))]
pub fn pack(
  grid: &VoxelGrid,
  voi: &VoiIndex,
  table: &AdjacencyTable,
  label_index: &LabelIndexGrid,
) -> OutputGrid {
  let voxel_count = grid.len();
  let channels = table.max_neighbors() + 1;
  let mut output = OutputGrid::zeroed(grid.dims(), voxel_count, channels);

  for index in voi.iter() {
    output.data[index] = grid.value(index);

    let row = table.row(label_index.row(index));
    for (slot, &neighbor) in row.iter().enumerate() {
      output.data[(slot + 1) * voxel_count + index] = neighbor;
    }
  }

  output
}

#[cfg(test)]
#[path = "packer_test.rs"]
mod packer_test;
