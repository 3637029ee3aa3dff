//! Integration tests for the processor module
//!
//! Exercises the batch pipeline and live sessions end to end using sample
//! logger dumps and in-memory line sources.

pub mod error_handling;

use crate::source::ReaderLineSource;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub use crate::parser::tests::{block, create_test_dump};

/// Write a dump to `dir/name` and return its path
pub fn write_dump(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// A dump whose temperature unit line carries a Latin-1 degree sign
pub fn create_latin1_dump() -> Vec<u8> {
    let mut bytes = b"Logger start \xb0C\n".to_vec();
    bytes.extend_from_slice(block("70.00", "4.00", "40.00", "20.00", "800.00").as_bytes());
    bytes
}

/// In-memory line source over `lines`
pub fn line_source(lines: &[&str]) -> ReaderLineSource<Cursor<Vec<u8>>> {
    let mut text = lines.join("\n");
    text.push('\n');
    ReaderLineSource::new(Cursor::new(text.into_bytes()), "test-lines")
}
