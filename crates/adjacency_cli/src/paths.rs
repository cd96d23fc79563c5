//! Output file naming.

use std::path::{Path, PathBuf};

/// `<dir>/<stem>_<tag><ext>` where the stem ends at the first `.` of the
/// file name and the extension is everything after it.
///
/// `data/brain.nii.gz` with tag `neighbors` becomes
/// `data/brain_neighbors.nii.gz`.
pub fn tagged_output_path(base: &Path, tag: &str) -> PathBuf {
	let file_name = base
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default();
	let (stem, ext) = match file_name.find('.') {
		Some(pos) => file_name.split_at(pos),
		None => (file_name.as_str(), ""),
	};
	base.with_file_name(format!("{stem}_{tag}{ext}"))
}

#[cfg(test)]
#[path = "paths_test.rs"]
mod paths_test;
