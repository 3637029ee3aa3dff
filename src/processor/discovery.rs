//! Input discovery for batch processing
//!
//! Expands the inputs given on the command line into an ordered list of
//! log files. Each input may be a file, a directory (walked recursively
//! for log extensions) or a glob pattern.

use crate::constants::LOG_FILE_EXTENSIONS;
use crate::error::{MonitorError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File discovery component for sensor log inputs
#[derive(Debug)]
pub struct InputDiscovery {
    inputs: Vec<String>,
}

impl InputDiscovery {
    /// Create a new discovery over the raw inputs
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve every input into log files, in input order without duplicates
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut seen = HashSet::new();

        for input in &self.inputs {
            let found = self.resolve_input(input)?;
            debug!("Input '{}' resolved to {} files", input, found.len());
            for file in found {
                if seen.insert(file.clone()) {
                    files.push(file);
                }
            }
        }

        if files.is_empty() {
            let path = self.inputs.first().cloned().unwrap_or_default();
            return Err(MonitorError::InputNotFound {
                path: PathBuf::from(path),
            });
        }

        Ok(files)
    }

    fn resolve_input(&self, input: &str) -> Result<Vec<PathBuf>> {
        let path = Path::new(input);

        if path.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }

        if path.is_dir() {
            return discover_directory(path);
        }

        if is_glob_pattern(input) {
            return discover_glob(input);
        }

        Err(MonitorError::InputNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Walk a directory for log files, sorted by path
fn discover_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| MonitorError::Io(e.into()))?;
        if entry.file_type().is_file() && is_log_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        warn!("No log files found in {}", dir.display());
    }

    files.sort();
    Ok(files)
}

fn discover_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| MonitorError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable match for '{}': {}", pattern, e),
        }
    }

    if files.is_empty() {
        warn!("Pattern '{}' matched no files", pattern);
    }

    Ok(files)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Check if a path has one of the log file extensions
fn is_log_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            LOG_FILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
