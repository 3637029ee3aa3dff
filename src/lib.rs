//! Environmental Sensor Monitor Library
//!
//! Ingests indoor/outdoor temperature, humidity and CO2 readings from a
//! microcontroller sensor board and turns them into timestamped records with
//! rolling statistics.
//!
//! This library provides tools for:
//! - Parsing live single-reading lines and batch five-field dump blocks
//! - Decoding log dumps with a UTF-8 / Latin-1 / Windows-1252 fallback chain
//! - Fusing partial readings into complete records per stream
//! - Keeping a bounded rolling window of recent records
//! - Computing min/mean/max, deltas and the CO2 alert condition
//! - Polling a serial port (or a replayed capture) on a fixed cadence
//! - Exporting records to CSV or Parquet

pub mod assembler;
pub mod cli;
pub mod config;
pub mod constants;
pub mod decode;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;
pub mod report;
pub mod source;
pub mod statistics;
pub mod window;

// Re-export commonly used types
pub use assembler::RecordAssembler;
pub use config::{EmissionMode, MonitorConfig};
pub use error::{MonitorError, Result};
pub use models::{PartialReading, Quantity, Record, Zone};
pub use parser::{BlockParser, LineParser, ParseError, ParseStats};
pub use processor::{BatchProcessor, LiveSession, run_live};
pub use source::LineSource;
pub use statistics::{DashboardSummary, Summary};
pub use window::RollingWindow;
