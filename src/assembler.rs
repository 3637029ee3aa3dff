//! Record assembly for the live stream
//!
//! The sensor firmware writes one measurement category per line, and the
//! indoor, outdoor and CO2 lines arrive independently. The assembler keeps
//! the latest value of each quantity in a slot and fuses the slots into a
//! [`Record`] stamped with the arrival time of the line that triggered it.

use crate::config::EmissionMode;
use crate::constants::SLOT_SENTINEL;
use crate::models::{PartialReading, Quantity, Record, Zone};
use chrono::{DateTime, Utc};
use tracing::{debug, trace};

/// Latest known value per quantity
#[derive(Debug, Clone, Copy, PartialEq)]
struct Slots {
    co2: f64,
    temperature_in: f64,
    temperature_out: f64,
    humidity_in: f64,
    humidity_out: f64,
}

impl Default for Slots {
    fn default() -> Self {
        Self {
            co2: SLOT_SENTINEL,
            temperature_in: SLOT_SENTINEL,
            temperature_out: SLOT_SENTINEL,
            humidity_in: SLOT_SENTINEL,
            humidity_out: SLOT_SENTINEL,
        }
    }
}

/// Which slots have received at least one real reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Observed {
    co2: bool,
    indoor: bool,
    outdoor: bool,
}

/// Fuses partial readings into complete records, one instance per stream
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    slots: Slots,
    observed: Observed,
    mode: EmissionMode,
}

impl RecordAssembler {
    pub fn new(mode: EmissionMode) -> Self {
        Self {
            slots: Slots::default(),
            observed: Observed::default(),
            mode,
        }
    }

    pub fn mode(&self) -> EmissionMode {
        self.mode
    }

    /// Update the slots from `partial` and emit a composite record
    ///
    /// In [`EmissionMode::BestEffort`] every call emits; quantities not yet
    /// observed report the sentinel. In [`EmissionMode::CompleteOnly`] nothing
    /// is emitted until every quantity has been observed once.
    pub fn ingest(
        &mut self,
        partial: PartialReading,
        arrival_time: DateTime<Utc>,
    ) -> Option<Record> {
        match partial {
            PartialReading::Environment {
                zone: Zone::In,
                humidity,
                temperature,
            } => {
                self.slots.humidity_in = humidity;
                self.slots.temperature_in = temperature;
                self.observed.indoor = true;
            }
            PartialReading::Environment {
                zone: Zone::Out,
                humidity,
                temperature,
            } => {
                self.slots.humidity_out = humidity;
                self.slots.temperature_out = temperature;
                self.observed.outdoor = true;
            }
            PartialReading::Co2 { value } => {
                self.slots.co2 = value;
                self.observed.co2 = true;
            }
        }
        trace!("Assembler slots after {:?}: {:?}", partial, self.slots);

        if self.mode == EmissionMode::CompleteOnly && !self.is_primed() {
            debug!("Holding record until all quantities are observed");
            return None;
        }

        Some(self.snapshot(arrival_time))
    }

    /// Current slot values as a record, without ingesting anything
    pub fn snapshot(&self, timestamp: DateTime<Utc>) -> Record {
        Record::new(
            timestamp,
            self.slots.humidity_in,
            self.slots.temperature_in,
            self.slots.humidity_out,
            self.slots.temperature_out,
            self.slots.co2,
        )
    }

    /// Whether `quantity` has received a real reading
    pub fn observed(&self, quantity: Quantity) -> bool {
        match quantity {
            Quantity::Co2 => self.observed.co2,
            Quantity::HumidityIn | Quantity::TemperatureIn => self.observed.indoor,
            Quantity::HumidityOut | Quantity::TemperatureOut => self.observed.outdoor,
        }
    }

    /// True once every quantity has been observed
    pub fn is_primed(&self) -> bool {
        self.observed.co2 && self.observed.indoor && self.observed.outdoor
    }

    /// Return every slot to the sentinel
    pub fn reset(&mut self) {
        self.slots = Slots::default();
        self.observed = Observed::default();
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(EmissionMode::BestEffort)
    }
}
