//! LabelSet - sorted distinct labels present in a volume.
//!
//! Ascending label order fixes each label's row index for the rest of the
//! pipeline. Output parity depends on it.

use crate::grid::{Label, VoxelGrid};
use crate::voi::VoiIndex;

/// Ascending, duplicate-free labels found at voxel-of-interest positions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSet {
  labels: Vec<Label>,
}

impl LabelSet {
  /// Collect the distinct labels occupying `voi`.
  pub fn extract(grid: &VoxelGrid, voi: &VoiIndex) -> Self {
    let mut labels: Vec<Label> = voi.iter().map(|index| grid.value(index)).collect();
    labels.sort_unstable();
    labels.dedup();
    Self { labels }
  }

  /// Number of distinct labels.
  #[inline]
  pub fn len(&self) -> usize {
    self.labels.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.labels.is_empty()
  }

  #[inline]
  pub fn as_slice(&self) -> &[Label] {
    &self.labels
  }

  pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
    self.labels.iter().copied()
  }

  /// Row index (0-based ordinal) of `label`, or `None` if absent.
  #[inline]
  pub fn row_index(&self, label: Label) -> Option<usize> {
    self.labels.binary_search(&label).ok()
  }

  /// Label at row index `row`.
  #[inline]
  pub fn label(&self, row: usize) -> Option<Label> {
    self.labels.get(row).copied()
  }

  pub fn contains(&self, label: Label) -> bool {
    self.row_index(label).is_some()
  }
}

#[cfg(test)]
#[path = "labels_test.rs"]
mod labels_test;
