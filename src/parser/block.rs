//! Batch block parser
//!
//! Pre-formatted dumps repeat a five-line block:
//!
//! ```text
//! Humidity out: 78.00 %
//! Temperature out: 6.20 *C
//! Humidity IN: 41.50 %
//! Temperature IN: 21.30 *C
//! CO2: 612.00 ppm
//! ```
//!
//! A block is captured only when all five fields appear in exactly this
//! order. Blocks with a missing or reordered field produce nothing.

use crate::error::{MonitorError, Result};
use crate::models::Record;
use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::debug;

const NUMBER: &str = r"(-?\d+(?:\.\d+)?)";

/// Marker opening every block, used to count blocks that failed to match
const BLOCK_OPENER: &str = "Humidity out:";

/// The five values of one complete block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockValues {
    pub humidity_out: f64,
    pub temperature_out: f64,
    pub humidity_in: f64,
    pub temperature_in: f64,
    pub co2: f64,
}

impl BlockValues {
    /// Stamp the values into a record
    pub fn into_record(self, timestamp: DateTime<Utc>) -> Record {
        Record::new(
            timestamp,
            self.humidity_in,
            self.temperature_in,
            self.humidity_out,
            self.temperature_out,
            self.co2,
        )
    }
}

/// Result of scanning a text for blocks
#[derive(Debug, Clone, Default)]
pub struct BlockScan {
    /// Complete blocks in input order
    pub blocks: Vec<BlockValues>,
    /// Blocks that started but did not match the full pattern
    pub incomplete: usize,
}

/// Whole-block pattern matcher for batch dumps
#[derive(Debug, Clone)]
pub struct BlockParser {
    pattern: Regex,
}

impl BlockParser {
    /// Compile the block pattern
    pub fn new() -> Result<Self> {
        let source = format!(
            r"Humidity out:\s*{n}\s*%\s*Temperature out:\s*{n}\s*\*C\s*Humidity IN:\s*{n}\s*%\s*Temperature IN:\s*{n}\s*\*C\s*CO2:\s*{n}\s*ppm",
            n = NUMBER
        );
        let pattern = Regex::new(&source).map_err(|e| MonitorError::InvalidPattern {
            pattern: source.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self { pattern })
    }

    /// Extract every complete block from `text`
    pub fn scan(&self, text: &str) -> BlockScan {
        let blocks: Vec<BlockValues> = self
            .pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let value = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<f64>().ok());
                Some(BlockValues {
                    humidity_out: value(1)?,
                    temperature_out: value(2)?,
                    humidity_in: value(3)?,
                    temperature_in: value(4)?,
                    co2: value(5)?,
                })
            })
            .collect();

        let openers = text.matches(BLOCK_OPENER).count();
        let incomplete = openers.saturating_sub(blocks.len());
        if incomplete > 0 {
            debug!(
                "{} of {} blocks were incomplete and skipped",
                incomplete, openers
            );
        }

        BlockScan { blocks, incomplete }
    }
}
