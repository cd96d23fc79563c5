//! Neighborhood tables and linear indexing for labeled volumes.
//!
//! # Memory Layout
//!
//! ```text
//! Volume memory layout (x fastest, z slowest):
//!
//! Address:  0       1       ...  nx-1      nx      ...  nx*ny   ...
//! Content: [0,0,0] [1,0,0] ... [nx-1,0,0] [0,1,0] ... [0,0,1]  ...
//!          └──────────── X ────────────┘
//!
//! index = nx * ny * z + nx * y + x
//! ```
//!
//! # 26-Neighborhood
//!
//! ```text
//!   jumps  kind     count   example offset
//!   1      face     6       (+1, 0, 0)
//!   2      edge     12      (+1,+1, 0)
//!   3      corner   8       (+1,+1,+1)
//! ```
//!
//! Offsets that leave the volume are skipped, never wrapped or clamped, so
//! boundary voxels have fewer than 26 candidates.

use glam::{IVec3, UVec3};

/// Neighbors sharing a face (one non-zero axis).
pub const FACE_NEIGHBORS: usize = 6;

/// Neighbors sharing an edge (two non-zero axes).
pub const EDGE_NEIGHBORS: usize = 12;

/// Neighbors sharing a corner (three non-zero axes).
pub const CORNER_NEIGHBORS: usize = 8;

/// Size of the full 26-connected neighborhood.
pub const NEIGHBOR_COUNT: usize = FACE_NEIGHBORS + EDGE_NEIGHBORS + CORNER_NEIGHBORS;

/// All 26 offsets in `{-1, 0, 1}^3` except the center, ordered face, edge,
/// corner.
pub const NEIGHBOR_OFFSETS: [IVec3; NEIGHBOR_COUNT] = [
  // 1-jump (faces)
  IVec3::new(-1, 0, 0),
  IVec3::new(1, 0, 0),
  IVec3::new(0, -1, 0),
  IVec3::new(0, 1, 0),
  IVec3::new(0, 0, -1),
  IVec3::new(0, 0, 1),
  // 2-jump (edges)
  IVec3::new(-1, -1, 0),
  IVec3::new(-1, 1, 0),
  IVec3::new(1, -1, 0),
  IVec3::new(1, 1, 0),
  IVec3::new(0, -1, -1),
  IVec3::new(0, -1, 1),
  IVec3::new(0, 1, -1),
  IVec3::new(0, 1, 1),
  IVec3::new(-1, 0, -1),
  IVec3::new(1, 0, -1),
  IVec3::new(-1, 0, 1),
  IVec3::new(1, 0, 1),
  // 3-jump (corners)
  IVec3::new(-1, -1, -1),
  IVec3::new(-1, -1, 1),
  IVec3::new(-1, 1, -1),
  IVec3::new(1, -1, -1),
  IVec3::new(-1, 1, 1),
  IVec3::new(1, -1, 1),
  IVec3::new(1, 1, -1),
  IVec3::new(1, 1, 1),
];

/// Convert 3D coordinates to a linear index.
///
/// Caller guarantees `coord < dims` on every axis.
#[inline(always)]
pub fn coord_to_index(coord: UVec3, dims: UVec3) -> usize {
  let (nx, ny) = (dims.x as usize, dims.y as usize);
  nx * ny * coord.z as usize + nx * coord.y as usize + coord.x as usize
}

/// Convert a linear index back to 3D coordinates.
#[inline(always)]
pub fn index_to_coord(index: usize, dims: UVec3) -> UVec3 {
  let (nx, ny) = (dims.x as usize, dims.y as usize);
  let slice = nx * ny;
  let z = index / slice;
  let rem = index % slice;
  UVec3::new((rem % nx) as u32, (rem / nx) as u32, z as u32)
}

/// Step from `coord` by `offset`, or `None` if the result leaves
/// `[0, dims)` on any axis.
#[inline(always)]
pub fn offset_coord(coord: UVec3, offset: IVec3, dims: UVec3) -> Option<UVec3> {
  let x = coord.x.checked_add_signed(offset.x).filter(|&x| x < dims.x)?;
  let y = coord.y.checked_add_signed(offset.y).filter(|&y| y < dims.y)?;
  let z = coord.z.checked_add_signed(offset.z).filter(|&z| z < dims.z)?;
  Some(UVec3::new(x, y, z))
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
