//! VoxelGrid - read-only labeled volume.

use glam::UVec3;
use thiserror::Error;

use crate::constants::{coord_to_index, index_to_coord};

/// Label value stored per voxel. 0 is background.
pub type Label = i32;

/// Background label. Never a region and never reported as a neighbor.
pub const BACKGROUND: Label = 0;

/// Errors raised while constructing a [`VoxelGrid`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
  #[error("grid dimensions {dims:?} overflow the addressable voxel count")]
  DimensionOverflow { dims: [u32; 3] },

  #[error("grid {dims:?} needs {expected} voxels but {actual} were provided")]
  LengthMismatch {
    dims: [u32; 3],
    expected: usize,
    actual: usize,
  },
}

/// Flat 3D label buffer addressed as `nx * ny * z + nx * y + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
  dims: UVec3,
  data: Vec<Label>,
}

impl VoxelGrid {
  /// Wrap a label buffer, validating it against `dims`.
  pub fn new(dims: UVec3, data: Vec<Label>) -> Result<Self, GridError> {
    let expected = voxel_count(dims)?;
    if data.len() != expected {
      return Err(GridError::LengthMismatch {
        dims: dims.to_array(),
        expected,
        actual: data.len(),
      });
    }
    Ok(Self { dims, data })
  }

  /// All-background grid.
  pub fn zeroed(dims: UVec3) -> Result<Self, GridError> {
    let count = voxel_count(dims)?;
    Ok(Self {
      dims,
      data: vec![BACKGROUND; count],
    })
  }

  /// Grid dimensions `(size_x, size_y, size_z)`.
  #[inline]
  pub fn dims(&self) -> UVec3 {
    self.dims
  }

  /// Total number of voxels.
  #[inline]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  /// True when any axis has zero size.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  #[inline]
  pub fn as_slice(&self) -> &[Label] {
    &self.data
  }

  /// Label at a linear index.
  #[inline(always)]
  pub fn value(&self, index: usize) -> Label {
    self.data[index]
  }

  /// Label at a 3D coordinate.
  #[inline]
  pub fn get(&self, coord: UVec3) -> Label {
    self.data[self.index_of(coord)]
  }

  /// Overwrite one voxel. Used when assembling volumes, never by the pipeline.
  #[inline]
  pub fn set(&mut self, coord: UVec3, label: Label) {
    let index = self.index_of(coord);
    self.data[index] = label;
  }

  #[inline(always)]
  pub fn index_of(&self, coord: UVec3) -> usize {
    coord_to_index(coord, self.dims)
  }

  #[inline(always)]
  pub fn coord_of(&self, index: usize) -> UVec3 {
    index_to_coord(index, self.dims)
  }

  /// Release the underlying buffer.
  pub fn into_vec(self) -> Vec<Label> {
    self.data
  }
}

/// Number of voxels in a grid of `dims`, checked against `usize` overflow.
pub fn voxel_count(dims: UVec3) -> Result<usize, GridError> {
  (dims.x as usize)
    .checked_mul(dims.y as usize)
    .and_then(|n| n.checked_mul(dims.z as usize))
    .ok_or(GridError::DimensionOverflow {
      dims: dims.to_array(),
    })
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
