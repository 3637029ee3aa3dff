//! Summary statistics over record sequences
//!
//! Computes min/mean/max per quantity, latest-vs-previous deltas and the
//! CO2 alert condition shown by the dashboard. Everything here is derived
//! on demand and never stored.

use crate::error::{MonitorError, Result};
use crate::models::{Quantity, Record};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Min, mean and max of one quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    pub count: usize,
}

/// Summarize `quantity` over a non-empty record sequence
pub fn summarize<'a, I>(records: I, quantity: Quantity) -> Result<Summary>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for record in records {
        let value = record.value(quantity);
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    if count == 0 {
        return Err(MonitorError::empty_input(1, 0));
    }

    Ok(Summary {
        min,
        mean: sum / count as f64,
        max,
        count,
    })
}

/// Difference between the last and second-to-last value of `quantity`
pub fn delta<'a, I>(records: I, quantity: Quantity) -> Result<f64>
where
    I: IntoIterator<Item = &'a Record>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut newest_first = records.into_iter().rev();
    match (newest_first.next(), newest_first.next()) {
        (Some(last), Some(previous)) => Ok(last.value(quantity) - previous.value(quantity)),
        (Some(_), None) => Err(MonitorError::empty_input(2, 1)),
        _ => Err(MonitorError::empty_input(2, 0)),
    }
}

/// True when the record's CO2 concentration exceeds `threshold_ppm`
pub fn co2_alert(record: &Record, threshold_ppm: f64) -> bool {
    record.co2 > threshold_ppm
}

/// Latest value, delta and summary for one quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantitySummary {
    pub quantity: Quantity,
    pub latest: f64,
    /// Present only when at least two records exist
    pub delta: Option<f64>,
    pub summary: Summary,
}

/// Everything the dashboard shows for a record sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub record_count: usize,
    pub first_timestamp: DateTime<Utc>,
    pub last_timestamp: DateTime<Utc>,
    pub quantities: Vec<QuantitySummary>,
    pub latest_co2: f64,
    pub co2_alert: bool,
    pub co2_threshold_ppm: f64,
}

impl DashboardSummary {
    /// Build the dashboard view of `records`, which must not be empty
    pub fn from_records(records: &[Record], co2_threshold_ppm: f64) -> Result<Self> {
        Self::from_observed(records, co2_threshold_ppm, |_| Some(0))
    }

    /// Build the dashboard view when early records may hold sentinel slots
    ///
    /// `first_observed` gives, per quantity, the index of the first record in
    /// `records` that carries a real reading, or `None` if none does. Earlier
    /// records are left out of that quantity's summary and delta, and
    /// quantities never observed are omitted.
    pub fn from_observed<F>(
        records: &[Record],
        co2_threshold_ppm: f64,
        first_observed: F,
    ) -> Result<Self>
    where
        F: Fn(Quantity) -> Option<usize>,
    {
        let (first, last) = match (records.first(), records.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(MonitorError::empty_input(1, 0)),
        };

        let quantities = Quantity::ALL
            .iter()
            .filter_map(|&quantity| {
                let start = first_observed(quantity)?;
                let observed = records.get(start..).filter(|r| !r.is_empty())?;
                Some(
                    summarize(observed, quantity).map(|summary| QuantitySummary {
                        quantity,
                        latest: last.value(quantity),
                        delta: delta(observed, quantity).ok(),
                        summary,
                    }),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let co2_seen = first_observed(Quantity::Co2).is_some_and(|start| start < records.len());

        Ok(Self {
            record_count: records.len(),
            first_timestamp: first.timestamp,
            last_timestamp: last.timestamp,
            quantities,
            latest_co2: last.co2,
            co2_alert: co2_seen && co2_alert(last, co2_threshold_ppm),
            co2_threshold_ppm,
        })
    }

    /// Look up the entry for one quantity
    pub fn get(&self, quantity: Quantity) -> Option<&QuantitySummary> {
        self.quantities.iter().find(|q| q.quantity == quantity)
    }
}
