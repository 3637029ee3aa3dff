//! Command-line interface components.

pub mod commands;

use crate::config::MonitorConfig;
use crate::constants::{
    CO2_ALERT_THRESHOLD_PPM, DEFAULT_BATCH_INTERVAL_SECS, DEFAULT_BAUD_RATE,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_READ_TIMEOUT_MS, DEFAULT_WINDOW_CAPACITY,
};
use crate::decode::TextEncoding;
use crate::processor::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "envmon")]
#[command(about = "Monitor indoor/outdoor climate and CO2 from sensor logs or a live serial link")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse logger dumps and print the dashboard for all complete blocks
    Batch(BatchArgs),
    /// Read a serial port (or replay a captured log) into a rolling window
    Live(LiveArgs),
    /// List serial ports on this machine
    Ports,
}

#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Log files, directories or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Write parsed records to this file
    #[arg(short, long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Export format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Seconds between synthesised record timestamps
    #[arg(long, default_value_t = DEFAULT_BATCH_INTERVAL_SECS)]
    pub interval_secs: u64,

    /// Encodings to try, in order
    #[arg(long, value_enum, value_delimiter = ',')]
    pub encodings: Vec<TextEncoding>,

    /// Print every parsed record
    #[arg(long)]
    pub show_records: bool,

    /// CO2 alert threshold in ppm
    #[arg(long, default_value_t = CO2_ALERT_THRESHOLD_PPM)]
    pub co2_alert: f64,
}

impl BatchArgs {
    pub fn to_config(&self) -> MonitorConfig {
        MonitorConfig::default()
            .with_batch_interval_secs(self.interval_secs)
            .with_co2_alert_ppm(self.co2_alert)
    }

    /// Export format from the flag, else from the export path
    pub fn export_format(&self) -> anyhow::Result<Option<(PathBuf, ExportFormat)>> {
        let Some(path) = &self.export else {
            return Ok(None);
        };
        let format = match self.format.or_else(|| ExportFormat::from_path(path)) {
            Some(format) => format,
            None => anyhow::bail!(
                "Cannot infer export format from {}; use --format csv|parquet",
                path.display()
            ),
        };
        Ok(Some((path.clone(), format)))
    }
}

#[derive(Parser, Debug)]
pub struct LiveArgs {
    /// Serial port; the first USB port is used when omitted
    #[arg(short, long)]
    pub port: Option<String>,

    /// Serial baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud: u32,

    /// Records kept in the rolling window
    #[arg(long, default_value_t = DEFAULT_WINDOW_CAPACITY)]
    pub capacity: usize,

    /// Milliseconds between polling ticks
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_ms: u64,

    /// Serial read timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_READ_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Emit records only once every quantity has been observed
    #[arg(long)]
    pub complete_only: bool,

    /// Stop after this many records
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Replay a captured line log instead of opening a serial port
    #[arg(long, value_name = "FILE", conflicts_with = "port")]
    pub replay: Option<PathBuf>,

    /// CO2 alert threshold in ppm
    #[arg(long, default_value_t = CO2_ALERT_THRESHOLD_PPM)]
    pub co2_alert: f64,
}

impl LiveArgs {
    pub fn to_config(&self) -> MonitorConfig {
        let mut config = MonitorConfig::default()
            .with_baud_rate(self.baud)
            .with_window_capacity(self.capacity)
            .with_poll_interval_ms(self.poll_ms)
            .with_read_timeout_ms(self.timeout_ms)
            .with_co2_alert_ppm(self.co2_alert);
        if let Some(port) = &self.port {
            config = config.with_port(port);
        }
        if self.complete_only {
            config = config.with_complete_only();
        }
        config
    }
}

impl Args {
    /// Log level from the verbosity flags
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
