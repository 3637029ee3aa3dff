//! Fixed-capacity rolling history of records
//!
//! Keeps the most recent records in arrival order and evicts the oldest
//! once capacity is exceeded.

use crate::error::{MonitorError, Result};
use crate::models::Record;
use std::collections::VecDeque;

/// FIFO buffer of the most recent records
#[derive(Debug, Clone)]
pub struct RollingWindow {
    records: VecDeque<Record>,
    capacity: usize,
}

impl RollingWindow {
    /// Create a window holding at most `capacity` records
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MonitorError::configuration(
                "rolling window capacity must be at least 1",
            ));
        }

        Ok(Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append a record, evicting the oldest one when full
    ///
    /// Returns the evicted record, if any.
    pub fn push(&mut self, record: Record) -> Option<Record> {
        let evicted = if self.records.len() == self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Copy of the window contents in arrival order
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.iter().copied().collect()
    }

    /// Iterate over the window in arrival order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Record> + ExactSizeIterator {
        self.records.iter()
    }

    /// Most recent record
    pub fn latest(&self) -> Option<Record> {
        self.records.back().copied()
    }

    /// Second most recent record
    pub fn previous(&self) -> Option<Record> {
        self.records.iter().rev().nth(1).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.records.len() == self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn record(i: i64) -> Record {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(i);
        Record::new(timestamp, 40.0, 20.0, 80.0, 5.0, 600.0 + i as f64)
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            RollingWindow::new(0),
            Err(MonitorError::Configuration { .. })
        ));
    }

    #[test]
    fn test_push_within_capacity() {
        let mut window = RollingWindow::new(5).unwrap();

        for i in 0..3 {
            assert!(window.push(record(i)).is_none());
        }

        assert_eq!(window.len(), 3);
        assert!(!window.is_full());
        assert_eq!(window.snapshot(), vec![record(0), record(1), record(2)]);
    }

    #[test]
    fn test_eviction_keeps_last_n_in_order() {
        let capacity = 4;
        let extra = 3;
        let mut window = RollingWindow::new(capacity).unwrap();

        for i in 0..(capacity + extra) as i64 {
            window.push(record(i));
        }

        let snapshot = window.snapshot();
        assert_eq!(snapshot.len(), capacity);
        let expected: Vec<Record> = (extra as i64..(capacity + extra) as i64).map(record).collect();
        assert_eq!(snapshot, expected);
    }

    #[test]
    fn test_push_evicts_at_most_one() {
        let mut window = RollingWindow::new(2).unwrap();
        window.push(record(0));
        window.push(record(1));

        let evicted = window.push(record(2));

        assert_eq!(evicted, Some(record(0)));
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn test_latest_and_previous() {
        let mut window = RollingWindow::new(10).unwrap();
        assert!(window.latest().is_none());
        assert!(window.previous().is_none());

        window.push(record(0));
        assert_eq!(window.latest(), Some(record(0)));
        assert!(window.previous().is_none());

        window.push(record(1));
        assert_eq!(window.latest(), Some(record(1)));
        assert_eq!(window.previous(), Some(record(0)));
    }

    #[test]
    fn test_clear() {
        let mut window = RollingWindow::new(3).unwrap();
        window.push(record(0));

        window.clear();

        assert!(window.is_empty());
        assert_eq!(window.capacity(), 3);
    }
}
