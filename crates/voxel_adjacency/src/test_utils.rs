//! Grid builders shared by unit tests.

use glam::UVec3;

use crate::grid::{Label, VoxelGrid};

/// Build a grid by evaluating `f` at every coordinate.
pub fn grid_from_fn(dims: UVec3, f: impl Fn(UVec3) -> Label) -> VoxelGrid {
  let mut data = Vec::with_capacity((dims.x * dims.y * dims.z) as usize);
  for z in 0..dims.z {
    for y in 0..dims.y {
      for x in 0..dims.x {
        data.push(f(UVec3::new(x, y, z)));
      }
    }
  }
  VoxelGrid::new(dims, data).unwrap()
}

/// 1D grid of `values` along x.
pub fn line_grid(values: &[Label]) -> VoxelGrid {
  VoxelGrid::new(UVec3::new(values.len() as u32, 1, 1), values.to_vec()).unwrap()
}

/// 2x2x2 grid with label 1 at (0,0,0) and label 2 at (1,1,1).
pub fn diagonal_pair() -> VoxelGrid {
  grid_from_fn(UVec3::splat(2), |c| match c.to_array() {
    [0, 0, 0] => 1,
    [1, 1, 1] => 2,
    _ => 0,
  })
}

/// Each z-slab labelled `z + 1`.
pub fn layered_grid(dims: UVec3) -> VoxelGrid {
  grid_from_fn(dims, |c| c.z as Label + 1)
}

/// Alternating labels 1 and 2 with a background every third voxel.
pub fn checker_grid(dims: UVec3) -> VoxelGrid {
  grid_from_fn(dims, |c| {
    let i = c.x + c.y + c.z;
    if i % 3 == 0 {
      0
    } else {
      (i % 2) as Label + 1
    }
  })
}
