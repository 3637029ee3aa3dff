//! Error handling integration tests

use super::write_dump;
use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::processor::{BatchProcessor, InputDiscovery, LiveSession, TickOutcome};
use crate::source::LineSource;
use chrono::Utc;
use tempfile::TempDir;

/// Source that fails on the first read, like an unplugged board
struct UnpluggedSource;

impl LineSource for UnpluggedSource {
    fn has_data(&mut self) -> crate::error::Result<bool> {
        Ok(true)
    }

    fn read_line(&mut self) -> crate::error::Result<Option<String>> {
        Err(MonitorError::source("unplugged", "device disconnected"))
    }

    fn name(&self) -> &str {
        "unplugged"
    }
}

/// Source that never has anything waiting
struct SilentSource;

impl LineSource for SilentSource {
    fn has_data(&mut self) -> crate::error::Result<bool> {
        Ok(false)
    }

    fn read_line(&mut self) -> crate::error::Result<Option<String>> {
        panic!("read_line must not be called without data");
    }

    fn name(&self) -> &str {
        "silent"
    }
}

#[tokio::test]
async fn test_missing_file_aborts_batch() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("gone.txt");
    let processor = BatchProcessor::new(MonitorConfig::default()).unwrap();

    let result = processor.process_files(&[missing.clone()], Utc::now()).await;

    assert!(result.is_err());
    match result.unwrap_err() {
        MonitorError::InputNotFound { path } => assert_eq!(path, missing),
        _ => panic!("Expected InputNotFound error"),
    }
}

#[test]
fn test_directory_without_logs() {
    let temp_dir = TempDir::new().unwrap();
    write_dump(temp_dir.path(), "readme.md", b"not a log");

    let result = InputDiscovery::new([temp_dir.path().to_string_lossy().to_string()]).discover();

    assert!(matches!(result, Err(MonitorError::InputNotFound { .. })));
}

#[test]
fn test_invalid_glob_pattern() {
    let result = InputDiscovery::new(["logs/[*.txt"]).discover();

    match result {
        Err(MonitorError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "logs/[*.txt"),
        other => panic!("Expected InvalidPattern error, got {:?}", other),
    }
}

#[test]
fn test_empty_encoding_chain_is_rejected() {
    let processor = BatchProcessor::new(MonitorConfig::default()).unwrap();

    assert!(matches!(
        processor.with_encodings(Vec::new()),
        Err(MonitorError::Configuration { .. })
    ));
}

#[test]
fn test_source_failure_ends_tick() {
    let mut session = LiveSession::new(UnpluggedSource, &MonitorConfig::default()).unwrap();

    match session.tick(Utc::now()) {
        Err(MonitorError::Source { source_name, reason }) => {
            assert_eq!(source_name, "unplugged");
            assert!(reason.contains("disconnected"));
        }
        _ => panic!("Expected Source error"),
    }
}

#[test]
fn test_idle_source_does_not_block() {
    let mut session = LiveSession::new(SilentSource, &MonitorConfig::default()).unwrap();

    for _ in 0..10 {
        assert_eq!(session.tick(Utc::now()).unwrap(), TickOutcome::Idle);
    }
    assert!(session.window().is_empty());
    assert!(!session.is_finished());
}
