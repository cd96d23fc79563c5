//! Neighbor discovery over the 26-connected neighborhood.
//!
//! # Algorithm
//!
//! 1. **Bucket**: one pass over the VOI assigns every occupied voxel to its
//!    label's row.
//! 2. **Explore**: for each label in ascending order, visit its voxels, stamp
//!    the row index into the [`LabelIndexGrid`], and read all in-bounds
//!    neighbors into an ordered set.
//! 3. **Filter**: drop background and the label itself, emit the set as the
//!    label's row.
//!
//! Every voxel belongs to exactly one label, so each is visited once with at
//! most 26 lookups. Total work is linear in the VOI size.
//!
//! Adjacency is not symmetrized. Each row is built only from its own label's
//! voxels; symmetry follows from the neighborhood being reciprocal.

use std::collections::BTreeSet;

use glam::UVec3;

use crate::constants::{offset_coord, NEIGHBOR_OFFSETS};
use crate::grid::{Label, VoxelGrid, BACKGROUND};
use crate::labels::LabelSet;
use crate::voi::VoiIndex;

// =============================================================================
// LabelIndexGrid
// =============================================================================

/// Per-voxel row index of the occupying label.
///
/// Written only during discovery and read only by the packer. Positions
/// outside the VOI hold 0, which is indistinguishable from row 0 and must
/// not be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelIndexGrid {
  dims: UVec3,
  rows: Vec<u32>,
}

impl LabelIndexGrid {
  fn zeroed(dims: UVec3, len: usize) -> Self {
    Self {
      dims,
      rows: vec![0; len],
    }
  }

  #[inline]
  pub fn dims(&self) -> UVec3 {
    self.dims
  }

  /// Row index at a VOI position.
  #[inline(always)]
  pub fn row(&self, index: usize) -> usize {
    self.rows[index] as usize
  }

  #[inline]
  pub fn as_slice(&self) -> &[u32] {
    &self.rows
  }
}

// =============================================================================
// AdjacencyTable
// =============================================================================

/// Ragged table: one ascending neighbor list per label, in label order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyTable {
  labels: LabelSet,
  rows: Vec<Vec<Label>>,
  max_neighbors: usize,
}

impl AdjacencyTable {
  /// Number of rows (equals the number of labels).
  #[inline]
  pub fn len(&self) -> usize {
    self.rows.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Labels in row order.
  #[inline]
  pub fn labels(&self) -> &LabelSet {
    &self.labels
  }

  pub fn rows(&self) -> &[Vec<Label>] {
    &self.rows
  }

  /// Neighbor row at row index `row`.
  #[inline]
  pub fn row(&self, row: usize) -> &[Label] {
    &self.rows[row]
  }

  /// Longest row length. 0 when there are no rows.
  #[inline]
  pub fn max_neighbors(&self) -> usize {
    self.max_neighbors
  }

  /// Neighbor row of `label`, or `None` if the label is not in the volume.
  pub fn neighbors_of(&self, label: Label) -> Option<&[Label]> {
    self
      .labels
      .row_index(label)
      .map(|row| self.rows[row].as_slice())
  }

  /// `(label, neighbor)` pairs in row order, neighbors ascending.
  pub fn edges(&self) -> impl Iterator<Item = (Label, Label)> + '_ {
    self
      .labels
      .iter()
      .zip(&self.rows)
      .flat_map(|(label, row)| row.iter().map(move |&neighbor| (label, neighbor)))
  }
}

// =============================================================================
// Discovery
// =============================================================================

/// Products of [`discover`]: the table and the row index grid the packer
/// needs to expand it.
#[derive(Debug)]
pub struct Discovery {
  pub table: AdjacencyTable,
  pub label_index: LabelIndexGrid,
}

/// Group VOI positions by row index in one pass.
fn bucket_by_row(grid: &VoxelGrid, voi: &VoiIndex, labels: &LabelSet) -> Vec<Vec<usize>> {
  let mut buckets = vec![Vec::new(); labels.len()];
  for index in voi.iter() {
    if let Some(row) = labels.row_index(grid.value(index)) {
      buckets[row].push(index);
    }
  }
  buckets
}

/// Collect every in-bounds neighbor value of the voxel at `index`.
#[inline]
fn accumulate_neighbors(grid: &VoxelGrid, index: usize, accumulator: &mut BTreeSet<Label>) {
  let dims = grid.dims();
  let coord = grid.coord_of(index);
  for offset in NEIGHBOR_OFFSETS {
    if let Some(neighbor) = offset_coord(coord, offset, dims) {
      accumulator.insert(grid.get(neighbor));
    }
  }
}

/// Find the distinct 26-connected neighbor labels of every label.
///
/// Rows come out in ascending label order and each row is ascending and
/// duplicate-free, excluding background and the row's own label. A label
/// with no neighbors gets an empty row.
#[cfg_attr(feature = "trace_spans", tracing::instrument(skip_all, name = "neighbors::discover"))]
pub fn discover(grid: &VoxelGrid, voi: &VoiIndex, labels: LabelSet) -> Discovery {
  let mut label_index = LabelIndexGrid::zeroed(grid.dims(), grid.len());
  let buckets = bucket_by_row(grid, voi, &labels);

  let mut rows = Vec::with_capacity(labels.len());
  let mut max_neighbors = 0;

  for (row, (label, voxels)) in labels.iter().zip(&buckets).enumerate() {
    let mut accumulator = BTreeSet::new();
    for &index in voxels {
      label_index.rows[index] = row as u32;
      accumulate_neighbors(grid, index, &mut accumulator);
    }

    accumulator.remove(&BACKGROUND);
    accumulator.remove(&label);

    let neighbors: Vec<Label> = accumulator.into_iter().collect();
    tracing::debug!(label, neighbors = ?neighbors, "label neighbors");

    max_neighbors = max_neighbors.max(neighbors.len());
    rows.push(neighbors);
  }

  Discovery {
    table: AdjacencyTable {
      labels,
      rows,
      max_neighbors,
    },
    label_index,
  }
}

#[cfg(test)]
#[path = "neighbors_test.rs"]
mod neighbors_test;
