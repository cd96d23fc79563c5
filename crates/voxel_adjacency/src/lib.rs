//! voxel_adjacency - region adjacency for labeled voxel volumes
//!
//! Given a 3D grid where every non-zero value names a region, this crate
//! finds, for each region, the distinct labels touching it under
//! 26-connectivity (faces, edges and corners). The result is a ragged
//! adjacency table plus a dense 4D grid with one extra channel per neighbor
//! slot, suitable for writing back as a volume.
//!
//! # Features
//!
//! - **Sparse traversal**: only non-background voxels are visited
//! - **Deterministic output**: labels and neighbor rows are ascending and
//!   duplicate-free, so repeated runs are bit-identical
//! - **Boundary clipping**: neighbors outside the volume are skipped, never
//!   wrapped
//!
//! # Example
//!
//! ```
//! use glam::UVec3;
//! use voxel_adjacency::{find_neighbors, VoxelGrid};
//!
//! let grid = VoxelGrid::new(UVec3::new(3, 1, 1), vec![1, 2, 0]).unwrap();
//! let result = find_neighbors(&grid);
//!
//! assert_eq!(result.table.neighbors_of(1), Some(&[2][..]));
//! assert_eq!(result.output.channels(), 2);
//! ```

pub mod constants;
pub mod grid;
pub mod labels;
pub mod neighbors;
pub mod packer;
pub mod pipeline;
pub mod stats;
pub mod voi;

// Re-export commonly used items
pub use constants::{coord_to_index, index_to_coord, NEIGHBOR_COUNT, NEIGHBOR_OFFSETS};
pub use grid::{GridError, Label, VoxelGrid, BACKGROUND};
pub use labels::LabelSet;
pub use neighbors::{discover, AdjacencyTable, Discovery, LabelIndexGrid};
pub use packer::{pack, OutputGrid};
pub use pipeline::{find_neighbors, NeighborOutput};
pub use stats::{RunStats, StageTimings};
pub use voi::VoiIndex;

#[cfg(test)]
pub(crate) mod test_utils;
