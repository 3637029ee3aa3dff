//! Application constants for the sensor monitor
//!
//! Default values, protocol markers and thresholds used throughout
//! the parsers, the live session and the terminal renderer.

// =============================================================================
// Line Protocol Markers
// =============================================================================

/// Keyword identifying a humidity/temperature line
pub const HUMIDITY_KEYWORD: &str = "Humidity";

/// Keyword identifying a CO2 line
pub const CO2_KEYWORD: &str = "CO2";

/// Separator between label and value fields
pub const FIELD_SEPARATOR: char = ':';

/// Marker terminating a humidity percentage
pub const PERCENT_MARKER: char = '%';

/// Degree markers terminating a temperature value
pub const DEGREE_MARKERS: &[char] = &['*', '°'];

/// Unit marker terminating a CO2 value
pub const PPM_MARKER: &str = "ppm";

// =============================================================================
// Live Session Defaults
// =============================================================================

/// Number of records retained by the rolling window
pub const DEFAULT_WINDOW_CAPACITY: usize = 100;

/// Serial link speed used by the sensor firmware
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Yield interval between polling ticks
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Read timeout handed to the serial driver
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Value reported by an assembler slot before its quantity is observed
pub const SLOT_SENTINEL: f64 = 0.0;

/// Maximum parse error messages retained in [`crate::parser::ParseStats`]
pub const MAX_RECORDED_ERRORS: usize = 50;

// =============================================================================
// Batch Defaults
// =============================================================================

/// Spacing between synthesised batch timestamps (one hour)
pub const DEFAULT_BATCH_INTERVAL_SECS: u64 = 3600;

/// File extensions picked up when a directory is given as batch input
pub const LOG_FILE_EXTENSIONS: &[&str] = &["txt", "log"];

// =============================================================================
// Display Thresholds
// =============================================================================

/// CO2 concentration above which the dashboard raises an alert
pub const CO2_ALERT_THRESHOLD_PPM: f64 = 1000.0;
