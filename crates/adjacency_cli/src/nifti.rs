//! Single-file NIfTI-1 reading and writing.
//!
//! Header layout (348 bytes, then a 4-byte extension flag, then voxels):
//! - 0..40:    sizeof_hdr + unused ANALYZE fields + dim_info
//! - 40..56:   dim[8]
//! - 70..76:   datatype, bitpix, slice_start
//! - 76..108:  pixdim[8]
//! - 108..120: vox_offset, scl_slope, scl_inter
//! - 148..252: descrip, aux_file
//! - 252..344: qform/sform orientation
//! - 344..348: magic ("n+1\0")
//!
//! Endianness is detected from `sizeof_hdr`. Files ending in `.gz` are
//! transparently (de)compressed.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Cursor, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use glam::UVec3;
use thiserror::Error;

/// Size of the NIfTI-1 header in bytes.
pub const HEADER_SIZE: i32 = 348;

/// Voxel data offset for files written here (header + extension flag).
pub const DATA_OFFSET: usize = 352;

/// Single-file magic.
const MAGIC_SINGLE: [u8; 4] = *b"n+1\0";

/// Result type for NIfTI operations.
pub type NiftiResult<T> = Result<T, NiftiError>;

/// Errors that can occur while reading or writing NIfTI volumes.
#[derive(Debug, Error)]
pub enum NiftiError {
	#[error("cannot open {path}: {source}")]
	Open {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("not a NIfTI-1 header: sizeof_hdr is {0}, expected 348")]
	BadHeaderSize(i32),

	#[error("unsupported magic {0:?}, only single-file NIfTI-1 (n+1) is supported")]
	BadMagic([u8; 4]),

	#[error("unsupported datatype code {0}")]
	UnsupportedDatatype(i16),

	#[error("invalid dimensions {0:?}")]
	InvalidDims([i16; 8]),

	#[error("output shape {dims:?} x {channels} channels does not fit a NIfTI-1 header")]
	OutputTooLarge { dims: [u32; 3], channels: usize },

	#[error("voxel data truncated: expected {expected} bytes, got {got}")]
	Truncated { expected: usize, got: usize },

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}

// =============================================================================
// Datatype / Endian
// =============================================================================

/// Byte order of a volume on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
	Little,
	Big,
}

/// Voxel datatypes accepted as input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Datatype {
	Uint8,
	Int16,
	Int32,
	Float32,
	Float64,
	Int8,
	Uint16,
	Uint32,
	Int64,
	Uint64,
}

impl Datatype {
	/// Map a NIfTI datatype code.
	pub fn from_code(code: i16) -> Option<Self> {
		Some(match code {
			2 => Self::Uint8,
			4 => Self::Int16,
			8 => Self::Int32,
			16 => Self::Float32,
			64 => Self::Float64,
			256 => Self::Int8,
			512 => Self::Uint16,
			768 => Self::Uint32,
			1024 => Self::Int64,
			1280 => Self::Uint64,
			_ => return None,
		})
	}

	pub fn code(self) -> i16 {
		match self {
			Self::Uint8 => 2,
			Self::Int16 => 4,
			Self::Int32 => 8,
			Self::Float32 => 16,
			Self::Float64 => 64,
			Self::Int8 => 256,
			Self::Uint16 => 512,
			Self::Uint32 => 768,
			Self::Int64 => 1024,
			Self::Uint64 => 1280,
		}
	}

	/// Bytes per voxel.
	pub fn size(self) -> usize {
		match self {
			Self::Uint8 | Self::Int8 => 1,
			Self::Int16 | Self::Uint16 => 2,
			Self::Int32 | Self::Uint32 | Self::Float32 => 4,
			Self::Float64 | Self::Int64 | Self::Uint64 => 8,
		}
	}
}

// =============================================================================
// Header
// =============================================================================

/// Decoded NIfTI-1 header.
///
/// The ANALYZE-era fields NIfTI marks unused (`data_type`, `db_name`,
/// `extents`, `session_error`, `glmax`, `glmin`) are not kept.
#[derive(Clone, Debug, PartialEq)]
pub struct NiftiHeader {
	pub dim_info: u8,
	pub dim: [i16; 8],
	pub intent_p: [f32; 3],
	pub intent_code: i16,
	pub datatype: i16,
	pub bitpix: i16,
	pub slice_start: i16,
	pub pixdim: [f32; 8],
	pub vox_offset: f32,
	pub scl_slope: f32,
	pub scl_inter: f32,
	pub slice_end: i16,
	pub slice_code: u8,
	pub xyzt_units: u8,
	pub cal_max: f32,
	pub cal_min: f32,
	pub slice_duration: f32,
	pub toffset: f32,
	pub descrip: [u8; 80],
	pub aux_file: [u8; 24],
	pub qform_code: i16,
	pub sform_code: i16,
	pub quatern: [f32; 3],
	pub qoffset: [f32; 3],
	pub srow_x: [f32; 4],
	pub srow_y: [f32; 4],
	pub srow_z: [f32; 4],
	pub intent_name: [u8; 16],
	pub magic: [u8; 4],
}

impl Default for NiftiHeader {
	fn default() -> Self {
		Self {
			dim_info: 0,
			dim: [3, 1, 1, 1, 1, 1, 1, 1],
			intent_p: [0.0; 3],
			intent_code: 0,
			datatype: Datatype::Int32.code(),
			bitpix: 32,
			slice_start: 0,
			pixdim: [1.0; 8],
			vox_offset: DATA_OFFSET as f32,
			scl_slope: 1.0,
			scl_inter: 0.0,
			slice_end: 0,
			slice_code: 0,
			xyzt_units: 0,
			cal_max: 0.0,
			cal_min: 0.0,
			slice_duration: 0.0,
			toffset: 0.0,
			descrip: [0; 80],
			aux_file: [0; 24],
			qform_code: 0,
			sform_code: 0,
			quatern: [0.0; 3],
			qoffset: [0.0; 3],
			srow_x: [1.0, 0.0, 0.0, 0.0],
			srow_y: [0.0, 1.0, 0.0, 0.0],
			srow_z: [0.0, 0.0, 1.0, 0.0],
			intent_name: [0; 16],
			magic: MAGIC_SINGLE,
		}
	}
}

fn read_f32s<B: ByteOrder, const N: usize>(r: &mut impl Read) -> io::Result<[f32; N]> {
	let mut out = [0.0; N];
	r.read_f32_into::<B>(&mut out)?;
	Ok(out)
}

fn read_bytes<const N: usize>(r: &mut impl Read) -> io::Result<[u8; N]> {
	let mut out = [0; N];
	r.read_exact(&mut out)?;
	Ok(out)
}

impl NiftiHeader {
	/// Decode a header, detecting byte order from `sizeof_hdr`.
	pub fn read_from(reader: &mut impl Read) -> NiftiResult<(Self, Endian)> {
		let mut raw = [0u8; HEADER_SIZE as usize];
		reader.read_exact(&mut raw)?;

		let endian = if LittleEndian::read_i32(&raw) == HEADER_SIZE {
			Endian::Little
		} else if BigEndian::read_i32(&raw) == HEADER_SIZE {
			Endian::Big
		} else {
			return Err(NiftiError::BadHeaderSize(LittleEndian::read_i32(&raw)));
		};

		let header = match endian {
			Endian::Little => Self::decode::<LittleEndian>(&raw)?,
			Endian::Big => Self::decode::<BigEndian>(&raw)?,
		};
		if header.magic != MAGIC_SINGLE {
			return Err(NiftiError::BadMagic(header.magic));
		}
		Ok((header, endian))
	}

	fn decode<B: ByteOrder>(raw: &[u8]) -> io::Result<Self> {
		let mut r = Cursor::new(&raw[39..]);
		let dim_info = r.read_u8()?;
		let mut dim = [0i16; 8];
		r.read_i16_into::<B>(&mut dim)?;
		let intent_p = read_f32s::<B, 3>(&mut r)?;
		let intent_code = r.read_i16::<B>()?;
		let datatype = r.read_i16::<B>()?;
		let bitpix = r.read_i16::<B>()?;
		let slice_start = r.read_i16::<B>()?;
		let pixdim = read_f32s::<B, 8>(&mut r)?;
		let vox_offset = r.read_f32::<B>()?;
		let scl_slope = r.read_f32::<B>()?;
		let scl_inter = r.read_f32::<B>()?;
		let slice_end = r.read_i16::<B>()?;
		let slice_code = r.read_u8()?;
		let xyzt_units = r.read_u8()?;
		let cal_max = r.read_f32::<B>()?;
		let cal_min = r.read_f32::<B>()?;
		let slice_duration = r.read_f32::<B>()?;
		let toffset = r.read_f32::<B>()?;
		// glmax, glmin
		r.read_i32::<B>()?;
		r.read_i32::<B>()?;
		let descrip = read_bytes::<80>(&mut r)?;
		let aux_file = read_bytes::<24>(&mut r)?;
		let qform_code = r.read_i16::<B>()?;
		let sform_code = r.read_i16::<B>()?;
		let quatern = read_f32s::<B, 3>(&mut r)?;
		let qoffset = read_f32s::<B, 3>(&mut r)?;
		let srow_x = read_f32s::<B, 4>(&mut r)?;
		let srow_y = read_f32s::<B, 4>(&mut r)?;
		let srow_z = read_f32s::<B, 4>(&mut r)?;
		let intent_name = read_bytes::<16>(&mut r)?;
		let magic = read_bytes::<4>(&mut r)?;

		Ok(Self {
			dim_info,
			dim,
			intent_p,
			intent_code,
			datatype,
			bitpix,
			slice_start,
			pixdim,
			vox_offset,
			scl_slope,
			scl_inter,
			slice_end,
			slice_code,
			xyzt_units,
			cal_max,
			cal_min,
			slice_duration,
			toffset,
			descrip,
			aux_file,
			qform_code,
			sform_code,
			quatern,
			qoffset,
			srow_x,
			srow_y,
			srow_z,
			intent_name,
			magic,
		})
	}

	/// Encode as a little-endian header.
	pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
		type B = LittleEndian;
		w.write_i32::<B>(HEADER_SIZE)?;
		// data_type[10], db_name[18], extents, session_error
		w.write_all(&[0u8; 34])?;
		w.write_u8(b'r')?;
		w.write_u8(self.dim_info)?;
		for v in self.dim {
			w.write_i16::<B>(v)?;
		}
		for v in self.intent_p {
			w.write_f32::<B>(v)?;
		}
		w.write_i16::<B>(self.intent_code)?;
		w.write_i16::<B>(self.datatype)?;
		w.write_i16::<B>(self.bitpix)?;
		w.write_i16::<B>(self.slice_start)?;
		for v in self.pixdim {
			w.write_f32::<B>(v)?;
		}
		w.write_f32::<B>(self.vox_offset)?;
		w.write_f32::<B>(self.scl_slope)?;
		w.write_f32::<B>(self.scl_inter)?;
		w.write_i16::<B>(self.slice_end)?;
		w.write_u8(self.slice_code)?;
		w.write_u8(self.xyzt_units)?;
		w.write_f32::<B>(self.cal_max)?;
		w.write_f32::<B>(self.cal_min)?;
		w.write_f32::<B>(self.slice_duration)?;
		w.write_f32::<B>(self.toffset)?;
		w.write_i32::<B>(0)?;
		w.write_i32::<B>(0)?;
		w.write_all(&self.descrip)?;
		w.write_all(&self.aux_file)?;
		w.write_i16::<B>(self.qform_code)?;
		w.write_i16::<B>(self.sform_code)?;
		for v in self.quatern.iter().chain(&self.qoffset) {
			w.write_f32::<B>(*v)?;
		}
		for v in self.srow_x.iter().chain(&self.srow_y).chain(&self.srow_z) {
			w.write_f32::<B>(*v)?;
		}
		w.write_all(&self.intent_name)?;
		w.write_all(&self.magic)?;
		Ok(())
	}

	/// Spatial dimensions `(nx, ny, nz)`. Axes beyond `dim[0]` count as 1.
	pub fn spatial_dims(&self) -> NiftiResult<UVec3> {
		let ndim = self.dim[0];
		if !(1..=7).contains(&ndim) {
			return Err(NiftiError::InvalidDims(self.dim));
		}
		let mut dims = [1u32; 3];
		for (axis, size) in dims.iter_mut().enumerate() {
			if axis as i16 + 1 <= ndim {
				let value = self.dim[axis + 1];
				if value <= 0 {
					return Err(NiftiError::InvalidDims(self.dim));
				}
				*size = value as u32;
			}
		}
		Ok(UVec3::from_array(dims))
	}

	/// Voxel spacing from `pixdim[1..=3]`.
	pub fn voxel_size(&self) -> [f32; 3] {
		[self.pixdim[1], self.pixdim[2], self.pixdim[3]]
	}

	/// Header for a 4D int32 volume sharing this header's geometry.
	///
	/// Orientation, spacing, units and description carry over; scaling and
	/// display range are reset. Every axis must fit `dim`'s `i16` slots.
	pub fn for_int32_channels(&self, dims: UVec3, channels: usize) -> NiftiResult<Self> {
		let too_large = || NiftiError::OutputTooLarge {
			dims: dims.to_array(),
			channels,
		};
		let axis = |size: u32| i16::try_from(size).map_err(|_| too_large());
		let mut header = self.clone();
		header.dim = [
			4,
			axis(dims.x)?,
			axis(dims.y)?,
			axis(dims.z)?,
			i16::try_from(channels).map_err(|_| too_large())?,
			1,
			1,
			1,
		];
		if header.pixdim[4] == 0.0 {
			header.pixdim[4] = 1.0;
		}
		header.datatype = Datatype::Int32.code();
		header.bitpix = 32;
		header.vox_offset = DATA_OFFSET as f32;
		header.scl_slope = 1.0;
		header.scl_inter = 0.0;
		header.cal_max = 0.0;
		header.cal_min = 0.0;
		header.magic = MAGIC_SINGLE;
		Ok(header)
	}
}

// =============================================================================
// Volume
// =============================================================================

/// A decoded header plus the raw bytes of its first 3D volume.
#[derive(Clone, Debug)]
pub struct NiftiVolume {
	pub header: NiftiHeader,
	pub endian: Endian,
	pub datatype: Datatype,
	pub dims: UVec3,
	/// Raw voxel bytes in file byte order.
	pub data: Vec<u8>,
}

impl NiftiVolume {
	/// Read a volume from any reader positioned at the header.
	pub fn read_from(reader: &mut impl Read) -> NiftiResult<Self> {
		let (header, endian) = NiftiHeader::read_from(reader)?;
		let datatype = Datatype::from_code(header.datatype)
			.ok_or(NiftiError::UnsupportedDatatype(header.datatype))?;
		let dims = header.spatial_dims()?;

		// Skip the extension flag and any extensions
		let skip = (header.vox_offset.max(HEADER_SIZE as f32) as u64) - HEADER_SIZE as u64;
		io::copy(&mut reader.by_ref().take(skip), &mut io::sink())?;

		let expected = (dims.x as usize)
			.checked_mul(dims.y as usize)
			.and_then(|n| n.checked_mul(dims.z as usize))
			.and_then(|n| n.checked_mul(datatype.size()))
			.ok_or(NiftiError::InvalidDims(header.dim))?;
		// Sized by the bytes read, not by the header
		let mut data = Vec::new();
		reader.take(expected as u64).read_to_end(&mut data)?;
		if data.len() != expected {
			return Err(NiftiError::Truncated {
				expected,
				got: data.len(),
			});
		}

		Ok(Self {
			header,
			endian,
			datatype,
			dims,
			data,
		})
	}

	/// Open a `.nii` or `.nii.gz` file.
	pub fn open(path: &Path) -> NiftiResult<Self> {
		let file = File::open(path).map_err(|source| NiftiError::Open {
			path: path.to_path_buf(),
			source,
		})?;
		let mut reader = BufReader::new(file);
		if is_gzip(path) {
			Self::read_from(&mut GzDecoder::new(reader))
		} else {
			Self::read_from(&mut reader)
		}
	}
}

/// True for paths ending in `.gz`.
pub fn is_gzip(path: &Path) -> bool {
	path
		.extension()
		.is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Write a channel-major int32 volume with `header` geometry.
pub fn write_int32(
	writer: &mut impl Write,
	header: &NiftiHeader,
	dims: UVec3,
	channels: usize,
	data: &[i32],
) -> NiftiResult<()> {
	header.for_int32_channels(dims, channels)?.write_to(writer)?;
	// Extension flag: no extensions
	writer.write_all(&[0u8; 4])?;
	for &value in data {
		writer.write_i32::<LittleEndian>(value)?;
	}
	Ok(())
}

/// Save a channel-major int32 volume, gzip-compressed for `.gz` paths.
///
/// Nothing is created on disk when the shape does not fit the header.
pub fn save_int32(
	path: &Path,
	header: &NiftiHeader,
	dims: UVec3,
	channels: usize,
	data: &[i32],
) -> NiftiResult<()> {
	header.for_int32_channels(dims, channels)?;
	let mut file = BufWriter::new(File::create(path)?);
	if is_gzip(path) {
		let mut encoder = GzEncoder::new(file, Compression::default());
		write_int32(&mut encoder, header, dims, channels, data)?;
		encoder.finish()?.flush()?;
	} else {
		write_int32(&mut file, header, dims, channels, data)?;
		file.flush()?;
	}
	Ok(())
}

#[cfg(test)]
#[path = "nifti_test.rs"]
mod nifti_test;
