//! Live line protocol parser
//!
//! Lines arrive one measurement category at a time:
//!
//! ```text
//! Humidity IN: 41.50% : 21.30*C
//! Humidity out: 78.00% : 6.20*C
//! CO2: 612.00 ppm
//! ```
//!
//! Fields are split on fixed delimiters and trimmed before float conversion.

use crate::constants::{
    CO2_KEYWORD, DEGREE_MARKERS, FIELD_SEPARATOR, HUMIDITY_KEYWORD, PERCENT_MARKER, PPM_MARKER,
};
use crate::models::{PartialReading, Zone};
use thiserror::Error;

/// Why a line did not produce a reading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A known keyword was present but its fields were missing or not numeric
    #[error("Malformed line '{line}': {reason}")]
    Malformed { line: String, reason: String },

    /// The line matched no known shape
    #[error("Unrecognized line '{line}'")]
    Unrecognized { line: String },
}

impl ParseError {
    fn malformed(line: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line: line.trim().to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseError::Malformed { .. })
    }
}

/// Stateless parser for the live line protocol
#[derive(Debug, Clone, Copy, Default)]
pub struct LineParser;

impl LineParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one raw line into a partial reading
    ///
    /// The same input always yields the same result.
    pub fn parse(&self, line: &str) -> Result<PartialReading, ParseError> {
        if line.contains(HUMIDITY_KEYWORD) {
            parse_environment(line)
        } else if line.contains(CO2_KEYWORD) {
            parse_co2(line)
        } else {
            Err(ParseError::Unrecognized {
                line: line.trim().to_string(),
            })
        }
    }
}

/// `<label> : <humidity>% : <temperature>*C`
fn parse_environment(line: &str) -> Result<PartialReading, ParseError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < 3 {
        return Err(ParseError::malformed(
            line,
            format!(
                "expected label, humidity and temperature fields, found {}",
                fields.len()
            ),
        ));
    }

    let zone = Zone::from_label(fields[0]);

    let (humidity_field, _) = fields[1]
        .split_once(PERCENT_MARKER)
        .ok_or_else(|| ParseError::malformed(line, "missing '%' after humidity"))?;
    let humidity = parse_value(line, humidity_field, "humidity")?;

    let (temperature_field, _) = fields[2]
        .split_once(DEGREE_MARKERS)
        .ok_or_else(|| ParseError::malformed(line, "missing degree marker after temperature"))?;
    let temperature = parse_value(line, temperature_field, "temperature")?;

    Ok(PartialReading::Environment {
        zone,
        humidity,
        temperature,
    })
}

/// `<label> : <value> ppm`
fn parse_co2(line: &str) -> Result<PartialReading, ParseError> {
    let (_, rest) = line
        .split_once(FIELD_SEPARATOR)
        .ok_or_else(|| ParseError::malformed(line, "missing ':' after CO2 label"))?;

    // Only the first value field counts, as with the environment lines
    let value_field = rest.split(FIELD_SEPARATOR).next().unwrap_or(rest);
    let (value_field, _) = value_field
        .split_once(PPM_MARKER)
        .ok_or_else(|| ParseError::malformed(line, "missing 'ppm' unit"))?;
    let value = parse_value(line, value_field, "CO2")?;

    Ok(PartialReading::Co2 { value })
}

fn parse_value(line: &str, field: &str, name: &str) -> Result<f64, ParseError> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Err(ParseError::malformed(line, format!("empty {} value", name)));
    }

    let value = trimmed.parse::<f64>().map_err(|e| {
        ParseError::malformed(line, format!("invalid {} value '{}' ({})", name, trimmed, e))
    })?;

    if !value.is_finite() {
        return Err(ParseError::malformed(
            line,
            format!("non-finite {} value '{}'", name, trimmed),
        ));
    }

    Ok(value)
}
