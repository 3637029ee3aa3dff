//! Error handling for sensor ingestion operations.
//!
//! Provides error types with context for decoding, live source failures,
//! statistics over insufficient history and record export.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Failed to decode input '{name}': no supported encoding ({tried}) matched")]
    Decode { name: String, tried: String },

    #[error("Source '{source_name}' failed: {reason}")]
    Source { source_name: String, reason: String },

    #[error("Not enough records: {required} required, {available} available")]
    EmptyInput { required: usize, available: usize },

    #[error("Input not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Invalid input pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Export to {path} failed: {reason}")]
    Export { path: PathBuf, reason: String },
}

impl MonitorError {
    /// Create a source failure for the named line source
    pub fn source(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an insufficient-history error
    pub fn empty_input(required: usize, available: usize) -> Self {
        Self::EmptyInput {
            required,
            available,
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
