use std::io::Cursor;

use byteorder::{BigEndian, WriteBytesExt};
use glam::UVec3;

use super::*;

/// Little-endian single-file volume with the given datatype and payload.
fn encode_volume(dims: [i16; 3], datatype: Datatype, payload: &[u8]) -> Vec<u8> {
	let header = NiftiHeader {
		dim: [3, dims[0], dims[1], dims[2], 1, 1, 1, 1],
		datatype: datatype.code(),
		bitpix: (datatype.size() * 8) as i16,
		..Default::default()
	};
	let mut bytes = Vec::new();
	header.write_to(&mut bytes).unwrap();
	bytes.extend_from_slice(&[0; 4]);
	bytes.extend_from_slice(payload);
	bytes
}

#[test]
fn test_header_is_348_bytes() {
	let mut bytes = Vec::new();
	NiftiHeader::default().write_to(&mut bytes).unwrap();
	assert_eq!(bytes.len(), HEADER_SIZE as usize);
	assert_eq!(&bytes[344..], b"n+1\0");
	assert_eq!(bytes[38], b'r');
}

#[test]
fn test_header_roundtrip_keeps_geometry() {
	let mut header = NiftiHeader::default();
	header.dim = [3, 4, 5, 6, 1, 1, 1, 1];
	header.pixdim = [1.0, 0.8, 0.8, 1.2, 2.0, 1.0, 1.0, 1.0];
	header.qform_code = 1;
	header.sform_code = 2;
	header.srow_x = [0.8, 0.0, 0.0, -10.0];
	header.descrip[..5].copy_from_slice(b"label");
	header.xyzt_units = 10;

	let mut bytes = Vec::new();
	header.write_to(&mut bytes).unwrap();
	let (decoded, endian) = NiftiHeader::read_from(&mut Cursor::new(bytes)).unwrap();

	assert_eq!(endian, Endian::Little);
	assert_eq!(decoded, header);
	assert_eq!(decoded.voxel_size(), [0.8, 0.8, 1.2]);
}

#[test]
fn test_big_endian_header_detected() {
	let mut bytes = vec![0u8; HEADER_SIZE as usize];
	(&mut bytes[0..4]).write_i32::<BigEndian>(HEADER_SIZE).unwrap();
	let mut dim = &mut bytes[40..56];
	for v in [3i16, 2, 2, 1, 1, 1, 1, 1] {
		dim.write_i16::<BigEndian>(v).unwrap();
	}
	(&mut bytes[70..72]).write_i16::<BigEndian>(4).unwrap();
	bytes[344..348].copy_from_slice(b"n+1\0");

	let (header, endian) = NiftiHeader::read_from(&mut Cursor::new(bytes)).unwrap();
	assert_eq!(endian, Endian::Big);
	assert_eq!(header.dim[..4], [3, 2, 2, 1]);
	assert_eq!(Datatype::from_code(header.datatype), Some(Datatype::Int16));
}

#[test]
fn test_bad_header_size_rejected() {
	let bytes = vec![0u8; HEADER_SIZE as usize];
	let err = NiftiHeader::read_from(&mut Cursor::new(bytes)).unwrap_err();
	assert!(matches!(err, NiftiError::BadHeaderSize(0)));
}

#[test]
fn test_pair_magic_rejected() {
	let mut header = NiftiHeader::default();
	header.magic = *b"ni1\0";
	let mut bytes = Vec::new();
	header.write_to(&mut bytes).unwrap();
	let err = NiftiHeader::read_from(&mut Cursor::new(bytes)).unwrap_err();
	assert!(matches!(err, NiftiError::BadMagic(_)));
}

#[test]
fn test_read_volume_uint8() {
	let bytes = encode_volume([3, 1, 1], Datatype::Uint8, &[1, 0, 2]);
	let volume = NiftiVolume::read_from(&mut Cursor::new(bytes)).unwrap();
	assert_eq!(volume.dims, UVec3::new(3, 1, 1));
	assert_eq!(volume.datatype, Datatype::Uint8);
	assert_eq!(volume.data, vec![1, 0, 2]);
}

#[test]
fn test_read_volume_truncated() {
	let bytes = encode_volume([2, 2, 1], Datatype::Int16, &[0; 6]);
	let err = NiftiVolume::read_from(&mut Cursor::new(bytes)).unwrap_err();
	assert!(matches!(
		err,
		NiftiError::Truncated {
			expected: 8,
			got: 6
		}
	));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_huge_dims_with_short_payload() {
	let bytes = encode_volume([32767, 32767, 32767], Datatype::Float64, &[0; 8]);
	let err = NiftiVolume::read_from(&mut Cursor::new(bytes)).unwrap_err();
	assert!(matches!(
		err,
		NiftiError::Truncated {
			expected: 281_449_207_693_304,
			got: 8
		}
	));
}

#[test]
fn test_unsupported_datatype() {
	let mut bytes = encode_volume([1, 1, 1], Datatype::Uint8, &[0]);
	// Complex64 (32)
	bytes[70..72].copy_from_slice(&32i16.to_le_bytes());
	let err = NiftiVolume::read_from(&mut Cursor::new(bytes)).unwrap_err();
	assert!(matches!(err, NiftiError::UnsupportedDatatype(32)));
}

#[test]
fn test_only_first_volume_read() {
	let mut bytes = encode_volume([2, 1, 1], Datatype::Uint8, &[5, 6, 7, 8]);
	// dim[0] = 4, dim[4] = 2
	bytes[40..42].copy_from_slice(&4i16.to_le_bytes());
	bytes[48..50].copy_from_slice(&2i16.to_le_bytes());
	let volume = NiftiVolume::read_from(&mut Cursor::new(bytes)).unwrap();
	assert_eq!(volume.data, vec![5, 6]);
}

#[test]
fn test_spatial_dims_defaults_missing_axes() {
	let mut header = NiftiHeader::default();
	header.dim = [2, 7, 3, 99, 1, 1, 1, 1];
	assert_eq!(header.spatial_dims().unwrap(), UVec3::new(7, 3, 1));

	header.dim = [3, 7, 0, 2, 1, 1, 1, 1];
	assert!(matches!(
		header.spatial_dims(),
		Err(NiftiError::InvalidDims(_))
	));
}

#[test]
fn test_int32_output_header() {
	let mut input = NiftiHeader::default();
	input.datatype = Datatype::Uint8.code();
	input.bitpix = 8;
	input.scl_slope = 2.0;
	input.cal_max = 50.0;
	input.pixdim[1] = 0.5;

	let out = input.for_int32_channels(UVec3::new(4, 5, 6), 3).unwrap();
	assert_eq!(out.dim, [4, 4, 5, 6, 3, 1, 1, 1]);
	assert_eq!(out.datatype, 8);
	assert_eq!(out.bitpix, 32);
	assert_eq!(out.vox_offset, 352.0);
	assert_eq!(out.scl_slope, 1.0);
	assert_eq!(out.cal_max, 0.0);
	assert_eq!(out.pixdim[1], 0.5);
}

#[test]
fn test_channel_count_beyond_i16_rejected() {
	let err = NiftiHeader::default()
		.for_int32_channels(UVec3::new(2, 1, 1), 40_000)
		.unwrap_err();
	assert!(matches!(
		err,
		NiftiError::OutputTooLarge {
			channels: 40_000,
			..
		}
	));
}

#[test]
fn test_save_rejects_oversized_shape_without_creating_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("wide.nii");
	let err = save_int32(
		&path,
		&NiftiHeader::default(),
		UVec3::new(40_000, 1, 1),
		1,
		&[0; 40_000],
	)
	.unwrap_err();
	assert!(matches!(err, NiftiError::OutputTooLarge { .. }));
	assert!(!path.exists());
}

#[test]
fn test_write_int32_layout() {
	let mut bytes = Vec::new();
	write_int32(
		&mut bytes,
		&NiftiHeader::default(),
		UVec3::new(2, 1, 1),
		2,
		&[1, -2, 3, 4],
	)
	.unwrap();
	assert_eq!(bytes.len(), DATA_OFFSET + 16);
	assert_eq!(&bytes[DATA_OFFSET..DATA_OFFSET + 4], &1i32.to_le_bytes());
	assert_eq!(&bytes[DATA_OFFSET + 4..DATA_OFFSET + 8], &(-2i32).to_le_bytes());
}

#[test]
fn test_gzip_file_roundtrip() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("labels.nii.gz");
	save_int32(
		&path,
		&NiftiHeader::default(),
		UVec3::new(3, 1, 1),
		1,
		&[1, 0, 2],
	)
	.unwrap();

	let volume = NiftiVolume::open(&path).unwrap();
	assert_eq!(volume.dims, UVec3::new(3, 1, 1));
	assert_eq!(volume.datatype, Datatype::Int32);
	let values: Vec<i32> = volume
		.data
		.chunks_exact(4)
		.map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
		.collect();
	assert_eq!(values, vec![1, 0, 2]);
}

#[test]
fn test_open_missing_file() {
	let err = NiftiVolume::open(Path::new("/nonexistent/volume.nii")).unwrap_err();
	assert!(matches!(err, NiftiError::Open { .. }));
}

#[test]
fn test_is_gzip() {
	assert!(is_gzip(Path::new("a/b.nii.gz")));
	assert!(is_gzip(Path::new("b.NII.GZ")));
	assert!(!is_gzip(Path::new("b.nii")));
}
