//! Configuration management and validation.
//!
//! Provides the configuration for live sessions (serial link, window size,
//! polling cadence, emission mode) and batch processing (timestamp spacing),
//! plus the shared CO2 alert threshold.

use crate::constants::{
    CO2_ALERT_THRESHOLD_PPM, DEFAULT_BATCH_INTERVAL_SECS, DEFAULT_BAUD_RATE,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_READ_TIMEOUT_MS, DEFAULT_WINDOW_CAPACITY,
};
use crate::error::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// When the assembler is allowed to emit records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmissionMode {
    /// Emit a composite record on every accepted reading
    #[default]
    BestEffort,
    /// Hold back records until every quantity has been observed once
    CompleteOnly,
}

/// Global configuration for the sensor monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Serial port name; auto-detected when absent
    pub port: Option<String>,

    /// Serial link speed
    pub baud_rate: u32,

    /// Records kept by the live rolling window
    pub window_capacity: usize,

    /// Yield interval between polling ticks in milliseconds
    pub poll_interval_ms: u64,

    /// Serial read timeout in milliseconds
    pub read_timeout_ms: u64,

    /// CO2 alert threshold in ppm
    pub co2_alert_ppm: f64,

    /// Assembler emission mode
    pub emission: EmissionMode,

    /// Spacing between synthesised batch timestamps in seconds
    pub batch_interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            co2_alert_ppm: CO2_ALERT_THRESHOLD_PPM,
            emission: EmissionMode::BestEffort,
            batch_interval_secs: DEFAULT_BATCH_INTERVAL_SECS,
        }
    }
}

impl MonitorConfig {
    /// Use a specific serial port
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Set the serial link speed
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the rolling window capacity
    pub fn with_window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = capacity;
        self
    }

    /// Set the polling interval
    pub fn with_poll_interval_ms(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    /// Set the serial read timeout
    pub fn with_read_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.read_timeout_ms = timeout_ms;
        self
    }

    /// Set the CO2 alert threshold
    pub fn with_co2_alert_ppm(mut self, threshold: f64) -> Self {
        self.co2_alert_ppm = threshold;
        self
    }

    /// Only emit records once every quantity has been observed
    pub fn with_complete_only(mut self) -> Self {
        self.emission = EmissionMode::CompleteOnly;
        self
    }

    /// Set the batch timestamp spacing
    pub fn with_batch_interval_secs(mut self, secs: u64) -> Self {
        self.batch_interval_secs = secs;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Batch timestamp spacing, or a configuration error when it does not
    /// fit a chrono duration
    pub fn batch_interval(&self) -> Result<chrono::Duration> {
        i64::try_from(self.batch_interval_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| {
                MonitorError::configuration(format!(
                    "batch interval of {} seconds is too large",
                    self.batch_interval_secs
                ))
            })
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.window_capacity == 0 {
            return Err(MonitorError::configuration(
                "window capacity must be at least 1",
            ));
        }
        if self.baud_rate == 0 {
            return Err(MonitorError::configuration("baud rate must be positive"));
        }
        if self.poll_interval_ms == 0 {
            return Err(MonitorError::configuration(
                "poll interval must be at least 1 ms",
            ));
        }
        if !self.co2_alert_ppm.is_finite() {
            return Err(MonitorError::configuration(
                "CO2 alert threshold must be a finite number",
            ));
        }
        self.batch_interval()?;

        debug!(
            "Configuration valid: capacity={}, baud={}, poll={}ms, emission={:?}",
            self.window_capacity, self.baud_rate, self.poll_interval_ms, self.emission
        );
        Ok(())
    }
}
