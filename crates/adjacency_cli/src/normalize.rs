//! Datatype normalization of raw voxel bytes to int32 labels.
//!
//! Integers are cast like a C cast (wrapping for out-of-range unsigned and
//! 64-bit values). Floats truncate toward zero, NaN becomes 0 and
//! out-of-range values saturate. `scl_slope`/`scl_inter` are not applied.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use voxel_adjacency::{GridError, Label, VoxelGrid};

use crate::nifti::{Datatype, Endian, NiftiVolume};

/// Decode `bytes` of `datatype` in `endian` order into labels.
pub fn to_labels(bytes: &[u8], datatype: Datatype, endian: Endian) -> Vec<Label> {
	match endian {
		Endian::Little => decode::<LittleEndian>(bytes, datatype),
		Endian::Big => decode::<BigEndian>(bytes, datatype),
	}
}

fn decode<B: ByteOrder>(bytes: &[u8], datatype: Datatype) -> Vec<Label> {
	let chunks = bytes.chunks_exact(datatype.size());
	match datatype {
		Datatype::Uint8 => chunks.map(|c| c[0] as Label).collect(),
		Datatype::Int8 => chunks.map(|c| c[0] as i8 as Label).collect(),
		Datatype::Int16 => chunks.map(|c| B::read_i16(c) as Label).collect(),
		Datatype::Uint16 => chunks.map(|c| B::read_u16(c) as Label).collect(),
		Datatype::Int32 => chunks.map(B::read_i32).collect(),
		Datatype::Uint32 => chunks.map(|c| B::read_u32(c) as Label).collect(),
		Datatype::Int64 => chunks.map(|c| B::read_i64(c) as Label).collect(),
		Datatype::Uint64 => chunks.map(|c| B::read_u64(c) as Label).collect(),
		Datatype::Float32 => chunks.map(|c| B::read_f32(c) as Label).collect(),
		Datatype::Float64 => chunks.map(|c| B::read_f64(c) as Label).collect(),
	}
}

/// Build the label grid for a volume.
pub fn to_grid(volume: &NiftiVolume) -> Result<VoxelGrid, GridError> {
	let labels = to_labels(&volume.data, volume.datatype, volume.endian);
	VoxelGrid::new(volume.dims, labels)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;
