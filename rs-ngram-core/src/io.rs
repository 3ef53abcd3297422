use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use crate::error::{NgramError, Result};

/// Reads every file and joins their text with a single space, in order.
///
/// Bytes that are not valid UTF-8 are dropped, never reported.
///
/// # Errors
/// Returns `Io` for the first file that cannot be read.
pub fn read_corpus<P: AsRef<Path>>(paths: &[P]) -> Result<String> {
	let mut documents = Vec::with_capacity(paths.len());
	for path in paths {
		let path = path.as_ref();
		let bytes = fs::read(path).map_err(|source| NgramError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		log::debug!("Read {} byte(s) from {}", bytes.len(), path.display());
		documents.push(decode_utf8_ignoring_errors(&bytes));
	}
	Ok(documents.join(" "))
}

/// Decodes UTF-8, skipping every invalid byte sequence.
pub fn decode_utf8_ignoring_errors(mut bytes: &[u8]) -> String {
	let mut text = String::with_capacity(bytes.len());
	loop {
		match std::str::from_utf8(bytes) {
			Ok(valid) => {
				text.push_str(valid);
				return text;
			}
			Err(e) => {
				let (valid, rest) = bytes.split_at(e.valid_up_to());
				// `valid_up_to` bounds a valid prefix
				text.push_str(std::str::from_utf8(valid).unwrap_or_default());
				match e.error_len() {
					Some(len) => bytes = &rest[len..],
					// Truncated sequence at end of input
					None => return text,
				}
			}
		}
	}
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/oceans.txt"` → `"oceans"`
/// - `"oceans.txt"` → `"oceans"`
///
/// # Errors
/// Returns `InvalidParameter` if the path has no filename.
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> Result<String> {
	let path = input_path.as_ref();
	let stem = path.file_stem().ok_or_else(|| {
		crate::error::invalid_parameter("path", &path.display(), &"path has no filename")
	})?;

	Ok(stem.to_string_lossy().to_string())
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
///
/// # Errors
/// Returns `Io` if the directory cannot be read.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<String>> {
	let dir = dir.as_ref();
	let io_error = |source| NgramError::Io {
		path: dir.to_path_buf(),
		source,
	};

	let mut files = Vec::new();
	for entry in fs::read_dir(dir).map_err(io_error)? {
		let path = entry.map_err(io_error)?.path();

		if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_bytes_are_skipped() {
		assert_eq!(decode_utf8_ignoring_errors(b"ab\xffcd"), "abcd");
		assert_eq!(decode_utf8_ignoring_errors(b"caf\xc3\xa9"), "café");
		assert_eq!(decode_utf8_ignoring_errors(b"end\xe2\x82"), "end");
		assert_eq!(decode_utf8_ignoring_errors(b""), "");
	}

	#[test]
	fn filename_without_extension() {
		assert_eq!(get_filename("./data/oceans.txt").unwrap(), "oceans");
		assert_eq!(get_filename("oceans.txt").unwrap(), "oceans");
		assert!(get_filename("").is_err());
	}
}
