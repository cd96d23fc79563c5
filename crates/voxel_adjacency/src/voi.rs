//! Voxel-of-interest index.
//!
//! Records the linear index of every non-background voxel in one pass, so
//! later stages do work proportional to occupied voxels instead of the full
//! volume. Sparse label volumes are mostly background, which makes this the
//! main lever on runtime.

use crate::grid::{VoxelGrid, BACKGROUND};

/// Ascending linear indices of all non-background voxels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoiIndex {
  positions: Vec<usize>,
}

impl VoiIndex {
  /// Scan the grid once and collect occupied positions.
  pub fn build(grid: &VoxelGrid) -> Self {
    let positions = grid
      .as_slice()
      .iter()
      .enumerate()
      .filter(|&(_, &label)| label != BACKGROUND)
      .map(|(index, _)| index)
      .collect();
    Self { positions }
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.positions.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  #[inline]
  pub fn as_slice(&self) -> &[usize] {
    &self.positions
  }

  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self.positions.iter().copied()
  }
}

#[cfg(test)]
#[path = "voi_test.rs"]
mod voi_test;
