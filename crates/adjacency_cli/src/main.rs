//! Label neighbor finder.
//!
//! Reads an integer NIfTI label volume and writes a 4D volume whose first
//! channel is the input labels and whose remaining channels list, at every
//! labelled voxel, the labels touching that voxel's region under
//! 26-connectivity.
//!
//! Channel layout:
//! - 0: input label
//! - 1..=N: ascending neighbor labels, 0 past the end of the row

mod config;
mod logging;
mod nifti;
mod normalize;
mod paths;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use config::Config;
use nifti::NiftiVolume;
use voxel_adjacency::{find_neighbors, NeighborOutput};

/// Find first-order neighbors of each label in a NIfTI label volume.
#[derive(Parser, Debug)]
#[command(name = "find_neighbors", version)]
#[command(about = "Finds 26-connected neighbor labels of each label")]
struct Args {
	/// Integer NIfTI image (.nii or .nii.gz).
	#[arg(short, long)]
	input: PathBuf,

	/// Output basename (default: the input path). The tag is appended.
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Tag appended to the output file stem (overrides config).
	#[arg(short, long)]
	tag: Option<String>,
}

fn main() -> Result<()> {
	let args = Args::parse();

	let mut config = match &args.config {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	if let Some(tag) = args.tag {
		config.output_tag = tag;
		config.validate()?;
	}

	logging::setup_logging(&config.log_level)?;
	info!("find_neighbors v{}", env!("CARGO_PKG_VERSION"));

	let volume = NiftiVolume::open(&args.input)
		.with_context(|| format!("Failed to read NIfTI from: {}", args.input.display()))?;
	log_descriptives(&args.input, &volume);

	let grid = normalize::to_grid(&volume)
		.with_context(|| format!("Invalid volume: {}", args.input.display()))?;

	info!("Start finding neighbors (3-jump neighborhood)...");
	let result = find_neighbors(&grid);
	if config.log_rows {
		log_rows(&result);
	}

	let base = args.output.as_ref().unwrap_or(&args.input);
	let output_path = paths::tagged_output_path(base, &config.output_tag);
	nifti::save_int32(
		&output_path,
		&volume.header,
		result.output.dims(),
		result.output.channels(),
		result.output.as_slice(),
	)
	.with_context(|| format!("Failed to write: {}", output_path.display()))?;

	info!("Writing output as: {}", output_path.display());
	info!("Finished.");

	Ok(())
}

fn log_descriptives(path: &std::path::Path, volume: &NiftiVolume) {
	let [sx, sy, sz] = volume.header.voxel_size();
	info!("File name: {}", path.display());
	info!(
		"Image details: {} X | {} Y | {} Z | {} T",
		volume.dims.x,
		volume.dims.y,
		volume.dims.z,
		volume.header.dim[4].max(1)
	);
	info!("Voxel size = {} x {} x {}", sx, sy, sz);
	info!(
		"Datatype = {} ({:?}, {:?} endian)",
		volume.header.datatype, volume.datatype, volume.endian
	);
}

fn log_rows(result: &NeighborOutput) {
	let table = &result.table;
	for (label, row) in table.labels().iter().zip(table.rows()) {
		info!("Label {} neighbors: {:?}", label, row);
	}
}
