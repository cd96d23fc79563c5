//! Per-run statistics for the neighbor pipeline.
//!
//! Purely observational: nothing here feeds back into the output.

use std::fmt;

/// Wall time of each pipeline stage in microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageTimings {
  pub voi_us: u64,
  pub labels_us: u64,
  pub discover_us: u64,
  pub pack_us: u64,
}

impl StageTimings {
  /// Sum of all stages.
  pub fn total_us(&self) -> u64 {
    self.voi_us + self.labels_us + self.discover_us + self.pack_us
  }
}

/// Counts and timings recorded while running the pipeline once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
  /// Voxels in the input grid.
  pub voxel_count: usize,
  /// Non-background voxels.
  pub voi_count: usize,
  /// Distinct labels.
  pub label_count: usize,
  /// Longest neighbor row.
  pub max_neighbors: usize,
  pub timings: StageTimings,
}

impl RunStats {
  /// Fraction of voxels that are non-background, 0.0 for an empty grid.
  pub fn occupancy(&self) -> f64 {
    if self.voxel_count == 0 {
      0.0
    } else {
      self.voi_count as f64 / self.voxel_count as f64
    }
  }

  /// Trailing dimension of the packed output.
  pub fn channels(&self) -> usize {
    self.max_neighbors + 1
  }
}

impl fmt::Display for RunStats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} labels over {}/{} voxels ({:.2}%), max {} neighbors, {} channels in {}us",
      self.label_count,
      self.voi_count,
      self.voxel_count,
      self.occupancy() * 100.0,
      self.max_neighbors,
      self.channels(),
      self.timings.total_us()
    )
  }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;
