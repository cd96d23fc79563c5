//! End-to-end neighbor pipeline.
//!
//! ```text
//! VoxelGrid ─► VoiIndex ─► LabelSet ─► discover ─┬─► AdjacencyTable ─┐
//!                                                └─► LabelIndexGrid ─┴─► pack ─► OutputGrid
//! ```
//!
//! Stages run once, in order, on the calling thread. Each intermediate
//! buffer is owned by the stage that builds it and handed by reference to
//! the next one.

use web_time::Instant;

use crate::grid::VoxelGrid;
use crate::labels::LabelSet;
use crate::neighbors::{discover, AdjacencyTable};
use crate::packer::{pack, OutputGrid};
use crate::stats::{RunStats, StageTimings};
use crate::voi::VoiIndex;

/// Everything a run produces.
#[derive(Debug)]
pub struct NeighborOutput {
  /// Packed 4D result, ready for the volume writer.
  pub output: OutputGrid,
  /// Ragged neighbor rows for programmatic consumers.
  pub table: AdjacencyTable,
  pub stats: RunStats,
}

/// Find the 26-connected neighbor labels of every label in `grid`.
///
/// Never fails: a grid without labels yields a single all-background
/// channel.
#[cfg_attr(feature = "trace_spans", tracing::instrument(skip_all, name = "pipeline::find_neighbors"))]
pub fn find_neighbors(grid: &VoxelGrid) -> NeighborOutput {
  let mut timings = StageTimings::default();

  let start = Instant::now();
  let voi = {
    #[cfg(feature = "trace_spans")]
    let _span = tracing::info_span!("voi_index").entered();
    VoiIndex::build(grid)
  };
  timings.voi_us = start.elapsed().as_micros() as u64;

  let start = Instant::now();
  let labels = {
    #[cfg(feature = "trace_spans")]
    let _span = tracing::info_span!("label_set").entered();
    LabelSet::extract(grid, &voi)
  };
  timings.labels_us = start.elapsed().as_micros() as u64;

  tracing::info!(labels = ?labels.as_slice(), "unique labels");
  tracing::info!(count = labels.len(), "number of unique labels");
  let label_count = labels.len();

  let start = Instant::now();
  let discovery = discover(grid, &voi, labels);
  timings.discover_us = start.elapsed().as_micros() as u64;

  let start = Instant::now();
  let output = pack(grid, &voi, &discovery.table, &discovery.label_index);
  timings.pack_us = start.elapsed().as_micros() as u64;

  let stats = RunStats {
    voxel_count: grid.len(),
    voi_count: voi.len(),
    label_count,
    max_neighbors: discovery.table.max_neighbors(),
    timings,
  };
  tracing::info!("{}", stats);

  NeighborOutput {
    output,
    table: discovery.table,
    stats,
  }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
