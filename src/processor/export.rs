//! Record export to CSV and Parquet
//!
//! Converts records into a Polars frame with one column per quantity and a
//! millisecond UTC timestamp, then writes it in the requested format.

use crate::error::{MonitorError, Result};
use crate::models::{Quantity, Record};

use polars::prelude::{
    Column, CsvWriter, DataFrame, DataType, NamedFrom, ParquetCompression, ParquetWriter,
    SerWriter, Series, TimeUnit,
};
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

/// Column order of exported frames, after the timestamp
const EXPORT_COLUMNS: [Quantity; 5] = [
    Quantity::HumidityOut,
    Quantity::TemperatureOut,
    Quantity::HumidityIn,
    Quantity::TemperatureIn,
    Quantity::Co2,
];

/// Output file formats for exported records
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Parquet,
}

impl ExportFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if ext.eq_ignore_ascii_case("parquet") {
            Some(Self::Parquet)
        } else {
            None
        }
    }
}

/// Build a frame from records, keeping their order
pub fn records_to_frame(records: &[Record]) -> Result<DataFrame> {
    let timestamps: Vec<i64> = records
        .iter()
        .map(|r| r.timestamp.timestamp_millis())
        .collect();
    let timestamp = Series::new("timestamp".into(), timestamps)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

    let mut columns: Vec<Column> = Vec::with_capacity(EXPORT_COLUMNS.len() + 1);
    columns.push(timestamp.into());
    for quantity in EXPORT_COLUMNS {
        let values: Vec<f64> = records.iter().map(|r| r.value(quantity)).collect();
        columns.push(Series::new(quantity.column_name().into(), values).into());
    }

    Ok(DataFrame::new(columns)?)
}

/// Write `records` to `path`, creating parent directories as needed
///
/// Returns the number of rows written.
pub fn export_records(records: &[Record], path: &Path, format: ExportFormat) -> Result<usize> {
    let mut df = records_to_frame(records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let export_error = |reason: String| MonitorError::Export {
        path: path.to_path_buf(),
        reason,
    };

    let mut file = File::create(path).map_err(|e| export_error(e.to_string()))?;
    match format {
        ExportFormat::Csv => CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| export_error(format!("Failed to write CSV: {}", e)))?,
        ExportFormat::Parquet => {
            ParquetWriter::new(&mut file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(|e| export_error(format!("Failed to write parquet: {}", e)))?;
        }
    }

    debug!("Export frame shape: {:?}", df.shape());
    info!(
        "Exported {} records to {} ({:?})",
        df.height(),
        path.display(),
        format
    );
    Ok(df.height())
}
