//! Test helpers for the sensor log parsers
//!
//! Provides sample batch dumps and live line sequences shared by the
//! parser test modules.

mod line_tests;

/// One complete batch block with the given values
pub fn block(hum_out: &str, temp_out: &str, hum_in: &str, temp_in: &str, co2: &str) -> String {
    format!(
        "Humidity out: {} %\nTemperature out: {} *C\nHumidity IN: {} %\nTemperature IN: {} *C\nCO2: {} ppm\n",
        hum_out, temp_out, hum_in, temp_in, co2
    )
}

/// Three complete blocks as written by the logger
pub fn create_test_dump() -> String {
    let mut text = String::new();
    text.push_str(&block("78.00", "6.20", "41.50", "21.30", "612.00"));
    text.push('\n');
    text.push_str(&block("79.10", "5.90", "42.00", "21.10", "655.00"));
    text.push('\n');
    text.push_str(&block("80.40", "5.40", "43.20", "20.80", "1020.00"));
    text
}

/// Live lines in arrival order, including noise
pub fn create_live_lines() -> Vec<&'static str> {
    vec![
        "Sensor boot v1.2",
        "CO2: 612.00 ppm",
        "Humidity IN: 41.50% : 21.30*C",
        "Humidity out: 78.00% : 6.20*C",
        "Humidity IN: abc% : 21.30*C",
        "CO2: 655.00 ppm",
    ]
}
