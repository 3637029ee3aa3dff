//! Ingestion pipelines.
//!
//! Wires the parsers, assembler, rolling window and statistics engine into
//! the two ways data reaches the monitor:
//! - [`batch`] - decode whole log dumps and return every complete record
//! - [`live`] - poll a line source, assembling records into a rolling window
//! - [`discovery`] - expand files, directories and glob patterns into inputs
//! - [`export`] - write finished records as CSV or Parquet

pub mod batch;
pub mod discovery;
pub mod export;
pub mod live;

#[cfg(test)]
pub mod tests;

pub use batch::{BatchProcessor, BatchResult, BatchStats};
pub use discovery::InputDiscovery;
pub use export::{ExportFormat, export_records, records_to_frame};
pub use live::{LiveSession, StopReason, TickOutcome, run_live};
