//! Batch processing of sensor log dumps
//!
//! Decodes each file with the encoding fallback chain, extracts every
//! complete five-value block and stamps the resulting records at a fixed
//! interval ending at a reference time. The logs carry no timestamps of
//! their own, so the interval is the only time axis available.

use crate::config::MonitorConfig;
use crate::decode::{DEFAULT_ENCODINGS, TextEncoding, decode_with};
use crate::error::{MonitorError, Result};
use crate::models::Record;
use crate::parser::{BlockParser, BlockValues};

use chrono::{DateTime, Duration, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Statistics for a batch run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchStats {
    pub files_processed: usize,
    pub bytes_read: usize,
    pub blocks_parsed: usize,
    /// Blocks that started but were missing or reordering a field
    pub blocks_incomplete: usize,
    /// Encoding that succeeded for each input, in processing order
    pub encodings: Vec<(String, TextEncoding)>,
}

impl BatchStats {
    /// Share of started blocks that were complete, as a percentage
    pub fn completeness(&self) -> f64 {
        let started = self.blocks_parsed + self.blocks_incomplete;
        if started == 0 {
            0.0
        } else {
            (self.blocks_parsed as f64 / started as f64) * 100.0
        }
    }
}

/// Records in input order with the statistics of the run
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub records: Vec<Record>,
    pub stats: BatchStats,
}

/// One-pass processor for whole log dumps
#[derive(Debug)]
pub struct BatchProcessor {
    parser: BlockParser,
    config: MonitorConfig,
    encodings: Vec<TextEncoding>,
}

impl BatchProcessor {
    /// Create a new processor with the default encoding chain
    pub fn new(config: MonitorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            parser: BlockParser::new()?,
            config,
            encodings: DEFAULT_ENCODINGS.to_vec(),
        })
    }

    /// Override the encoding fallback chain
    pub fn with_encodings(mut self, encodings: Vec<TextEncoding>) -> Result<Self> {
        if encodings.is_empty() {
            return Err(MonitorError::configuration(
                "at least one text encoding is required",
            ));
        }
        self.encodings = encodings;
        Ok(self)
    }

    /// Process an in-memory dump, stamping records so the last one lands
    /// one interval before `end`
    pub fn process_bytes(
        &self,
        bytes: &[u8],
        name: &str,
        end: DateTime<Utc>,
    ) -> Result<BatchResult> {
        let mut stats = BatchStats::default();
        let blocks = self.scan_into(bytes, name, &mut stats)?;
        let records = stamp_blocks(&blocks, end, self.config.batch_interval()?)?;

        Ok(BatchResult { records, stats })
    }

    /// Process files in order and return their records as one sequence
    ///
    /// A file that cannot be read or decoded aborts the whole run.
    pub async fn process_files(
        &self,
        files: &[PathBuf],
        end: DateTime<Utc>,
    ) -> Result<BatchResult> {
        info!("Processing {} log files", files.len());

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut stats = BatchStats::default();
        let mut blocks = Vec::new();

        for file_path in files {
            if let Some(file_name) = file_path.file_name() {
                pb.set_message(format!("Parsing: {}", file_name.to_string_lossy()));
            }

            let result = self.process_single_file(file_path, &mut stats).await;
            pb.inc(1);

            match result {
                Ok(file_blocks) => blocks.extend(file_blocks),
                Err(e) => {
                    pb.abandon_with_message(format!("Failed: {}", file_path.display()));
                    return Err(e);
                }
            }
        }

        pb.finish_and_clear();

        if stats.blocks_incomplete > 0 {
            warn!(
                "Skipped {} incomplete blocks ({:.1}% complete)",
                stats.blocks_incomplete,
                stats.completeness()
            );
        }
        info!(
            "Parsed {} records from {} files",
            blocks.len(),
            stats.files_processed
        );

        let records = stamp_blocks(&blocks, end, self.config.batch_interval()?)?;
        Ok(BatchResult { records, stats })
    }

    async fn process_single_file(
        &self,
        file_path: &Path,
        stats: &mut BatchStats,
    ) -> Result<Vec<BlockValues>> {
        if !file_path.exists() {
            return Err(MonitorError::InputNotFound {
                path: file_path.to_path_buf(),
            });
        }

        let bytes = fs::read(file_path).await?;
        let blocks = self.scan_into(&bytes, &file_path.display().to_string(), stats)?;
        stats.files_processed += 1;

        debug!(
            "{}: {} complete blocks",
            file_path.display(),
            blocks.len()
        );
        Ok(blocks)
    }

    fn scan_into(&self, bytes: &[u8], name: &str, stats: &mut BatchStats) -> Result<Vec<BlockValues>> {
        let (text, encoding) = decode_with(bytes, name, &self.encodings)?;
        let scan = self.parser.scan(&text);

        stats.bytes_read += bytes.len();
        stats.blocks_parsed += scan.blocks.len();
        stats.blocks_incomplete += scan.incomplete;
        stats.encodings.push((name.to_string(), encoding));

        Ok(scan.blocks)
    }
}

/// Stamp blocks at `interval` spacing so that block `i` of `n` falls at
/// `end - n * interval + i * interval`
///
/// Fails with a configuration error when the span does not fit the
/// representable time range.
pub fn stamp_blocks(
    blocks: &[BlockValues],
    end: DateTime<Utc>,
    interval: Duration,
) -> Result<Vec<Record>> {
    let out_of_range = || {
        MonitorError::configuration(format!(
            "{} records at {}s spacing do not fit before {}",
            blocks.len(),
            interval.num_seconds(),
            end
        ))
    };

    let span = i32::try_from(blocks.len())
        .ok()
        .and_then(|n| interval.checked_mul(n))
        .ok_or_else(out_of_range)?;
    let base = end.checked_sub_signed(span).ok_or_else(out_of_range)?;

    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            // i < n, so the offset is no larger than the span checked above
            let offset = interval.checked_mul(i as i32).ok_or_else(out_of_range)?;
            let timestamp = base.checked_add_signed(offset).ok_or_else(out_of_range)?;
            Ok(block.into_record(timestamp))
        })
        .collect()
}
