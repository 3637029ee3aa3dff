//! Core data structures for sensor ingestion.
//!
//! Defines partial readings produced by the parsers, the fused [`Record`]
//! emitted by the assembler and the [`Quantity`] selector used by the
//! statistics engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sensor placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    In,
    Out,
}

impl Zone {
    /// Infer the zone from a line label; anything not marked "IN" is outdoor
    pub fn from_label(label: &str) -> Self {
        if label.contains("IN") {
            Zone::In
        } else {
            Zone::Out
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::In => write!(f, "IN"),
            Zone::Out => write!(f, "OUT"),
        }
    }
}

/// A single-category observation before fusion into a [`Record`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PartialReading {
    /// Humidity and temperature reported together by one zone's sensor
    Environment {
        zone: Zone,
        humidity: f64,
        temperature: f64,
    },
    /// CO2 concentration in ppm
    Co2 { value: f64 },
}

/// One fused, timestamped snapshot of all five tracked quantities
///
/// Records are plain values; nothing mutates a record after it is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub humidity_in: f64,
    pub temperature_in: f64,
    pub humidity_out: f64,
    pub temperature_out: f64,
    pub co2: f64,
}

impl Record {
    pub fn new(
        timestamp: DateTime<Utc>,
        humidity_in: f64,
        temperature_in: f64,
        humidity_out: f64,
        temperature_out: f64,
        co2: f64,
    ) -> Self {
        Self {
            timestamp,
            humidity_in,
            temperature_in,
            humidity_out,
            temperature_out,
            co2,
        }
    }

    /// Read the value of one quantity
    pub fn value(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::HumidityIn => self.humidity_in,
            Quantity::TemperatureIn => self.temperature_in,
            Quantity::HumidityOut => self.humidity_out,
            Quantity::TemperatureOut => self.temperature_out,
            Quantity::Co2 => self.co2,
        }
    }
}

/// Field selector over the measured quantities of a [`Record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    HumidityIn,
    TemperatureIn,
    HumidityOut,
    TemperatureOut,
    Co2,
}

impl Quantity {
    /// All quantities in display order
    pub const ALL: [Quantity; 5] = [
        Quantity::TemperatureIn,
        Quantity::HumidityIn,
        Quantity::TemperatureOut,
        Quantity::HumidityOut,
        Quantity::Co2,
    ];

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::HumidityIn => "Indoor Humidity",
            Quantity::TemperatureIn => "Indoor Temperature",
            Quantity::HumidityOut => "Outdoor Humidity",
            Quantity::TemperatureOut => "Outdoor Temperature",
            Quantity::Co2 => "CO2 Level",
        }
    }

    /// Display unit
    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::HumidityIn | Quantity::HumidityOut => "%",
            Quantity::TemperatureIn | Quantity::TemperatureOut => "°C",
            Quantity::Co2 => "ppm",
        }
    }

    /// Column name used when exporting records
    pub fn column_name(&self) -> &'static str {
        match self {
            Quantity::HumidityIn => "humidity_in",
            Quantity::TemperatureIn => "temperature_in",
            Quantity::HumidityOut => "humidity_out",
            Quantity::TemperatureOut => "temperature_out",
            Quantity::Co2 => "co2",
        }
    }
}
