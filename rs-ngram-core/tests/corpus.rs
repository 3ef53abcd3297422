//! Corpus loading from disk

use std::fs;

use rs_ngram_core::io::{list_files, read_corpus};
use rs_ngram_core::{NGramModel, NgramError};
use tempfile::TempDir;

#[test]
fn files_are_joined_in_order() {
	let dir = TempDir::new().unwrap();
	let first = dir.path().join("first.txt");
	let second = dir.path().join("second.txt");
	fs::write(&first, "Cats purr").unwrap();
	fs::write(&second, "loudly. Dogs bark.").unwrap();

	let text = read_corpus(&[&first, &second]).unwrap();
	assert_eq!(text, "Cats purr loudly. Dogs bark.");

	let model = NGramModel::from_text(&text, 2).unwrap();
	assert_eq!(model.sentence_count(), 2);
}

#[test]
fn invalid_utf8_is_ignored() {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("broken.txt");
	fs::write(&path, b"Sea\xff water.").unwrap();

	assert_eq!(read_corpus(&[&path]).unwrap(), "Sea water.");
}

#[test]
fn missing_file_reports_its_path() {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("missing.txt");

	match read_corpus(&[&path]) {
		Err(NgramError::Io { path: reported, .. }) => assert_eq!(reported, path),
		other => panic!("Expected Io error, got {other:?}"),
	}
}

#[test]
fn lists_only_matching_files_sorted() {
	let dir = TempDir::new().unwrap();
	fs::write(dir.path().join("b.txt"), "").unwrap();
	fs::write(dir.path().join("a.txt"), "").unwrap();
	fs::write(dir.path().join("notes.md"), "").unwrap();
	fs::create_dir(dir.path().join("sub.txt")).unwrap();

	assert_eq!(list_files(dir.path(), "txt").unwrap(), vec!["a.txt", "b.txt"]);
}
