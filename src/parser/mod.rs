//! Sensor log parsers
//!
//! Two parsers share this module:
//! - [`line`] - live line protocol, one measurement category per line
//! - [`block`] - batch dumps where five values appear together in fixed order
//! - [`stats`] - counters for accepted and rejected input
//!
//! ## Usage
//!
//! ```rust
//! use envmon::parser::LineParser;
//! use envmon::models::{PartialReading, Zone};
//!
//! let reading = LineParser::new().parse("Humidity IN: 41.5% : 21.3*C").unwrap();
//! assert_eq!(
//!     reading,
//!     PartialReading::Environment { zone: Zone::In, humidity: 41.5, temperature: 21.3 }
//! );
//! ```

pub mod block;
pub mod line;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use block::{BlockParser, BlockScan, BlockValues};
pub use line::{LineParser, ParseError};
pub use stats::ParseStats;
