//! Rolling telemetry history
//!
//! A bounded, time-ordered FIFO of sensor readings. One session owns one
//! buffer and is its only writer; eviction happens inside `push`, so a
//! caller never observes a transiently over-capacity buffer.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::defaults;
use crate::synthesizer::ReadingSynthesizer;
use crate::types::sensor::SensorReading;

/// Bounded rolling history of readings, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryHistory {
    readings: VecDeque<SensorReading>,
    capacity: usize,
}

impl TelemetryHistory {
    /// Empty history with the default capacity (1000 readings).
    pub fn new() -> Self {
        Self::with_capacity(defaults::HISTORY_CAPACITY)
    }

    /// Empty history with an explicit capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            readings: VecDeque::with_capacity(capacity.min(defaults::HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Default-capacity history pre-filled with `n` synthetic readings
    /// whose timestamps step toward `end`, so live appends continue the
    /// trace without a gap.
    pub fn seeded(n: usize, seed: u64, end: DateTime<Utc>, step: Duration) -> Self {
        let span = n.saturating_sub(1) as i32;
        let start = end - step * span;
        let mut history = Self::new();
        for reading in ReadingSynthesizer::synthesize_series(n, seed, start, step) {
            history.push(reading);
        }
        history
    }

    /// Append one reading, evicting from the front to hold the capacity
    /// invariant. Atomic from the caller's view.
    pub fn push(&mut self, reading: SensorReading) {
        self.readings.push_back(reading);
        while self.readings.len() > self.capacity {
            self.readings.pop_front();
        }
    }

    /// Most recent reading, if any.
    pub fn latest(&self) -> Option<&SensorReading> {
        self.readings.back()
    }

    /// The most recent `k` readings, oldest first. The full history when
    /// `k` exceeds the current length; empty when the history is empty.
    pub fn tail(&self, k: usize) -> Vec<SensorReading> {
        let skip = self.readings.len().saturating_sub(k);
        self.readings.iter().skip(skip).cloned().collect()
    }

    /// All readings, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SensorReading> {
        self.readings.iter()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TelemetryHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(secs: i64) -> SensorReading {
        let timestamp = DateTime::from_timestamp(secs, 0).unwrap();
        SensorReading::from_fn(timestamp, |kind| kind.range().0)
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut history = TelemetryHistory::with_capacity(10);
        for secs in 0..5 {
            history.push(reading(secs));
        }
        let timestamps: Vec<i64> = history.iter().map(|r| r.timestamp.timestamp()).collect();
        assert_eq!(timestamps, vec![0, 1, 2, 3, 4]);
        assert_eq!(history.latest().unwrap().timestamp.timestamp(), 4);
    }

    #[test]
    fn overflow_evicts_exactly_the_oldest() {
        let mut history = TelemetryHistory::with_capacity(1000);
        for secs in 0..1001 {
            history.push(reading(secs));
        }
        assert_eq!(history.len(), 1000);
        assert_eq!(history.iter().next().unwrap().timestamp.timestamp(), 1);
        assert_eq!(history.latest().unwrap().timestamp.timestamp(), 1000);
    }

    #[test]
    fn tail_returns_most_recent_oldest_first() {
        let mut history = TelemetryHistory::with_capacity(10);
        for secs in 0..10 {
            history.push(reading(secs));
        }
        let tail: Vec<i64> = history
            .tail(3)
            .iter()
            .map(|r| r.timestamp.timestamp())
            .collect();
        assert_eq!(tail, vec![7, 8, 9]);
    }

    #[test]
    fn tail_larger_than_history_returns_everything() {
        let mut history = TelemetryHistory::with_capacity(10);
        history.push(reading(0));
        assert_eq!(history.tail(100).len(), 1);
        assert!(TelemetryHistory::new().tail(5).is_empty());
    }

    #[test]
    fn seeded_history_ends_at_the_requested_instant() {
        let end = DateTime::from_timestamp(1_000_000, 0).unwrap();
        let step = Duration::seconds(10);
        let history = TelemetryHistory::seeded(100, 42, end, step);
        assert_eq!(history.len(), 100);
        assert_eq!(history.latest().unwrap().timestamp, end);
        assert_eq!(
            history.iter().next().unwrap().timestamp,
            end - step * 99
        );
    }

    #[test]
    fn seeded_history_is_reproducible() {
        let end = DateTime::from_timestamp(1_000_000, 0).unwrap();
        let step = Duration::seconds(10);
        let a = TelemetryHistory::seeded(200, 42, end, step);
        let b = TelemetryHistory::seeded(200, 42, end, step);
        let equal = a.iter().zip(b.iter()).all(|(x, y)| x == y);
        assert!(equal && a.len() == b.len());
    }

    #[test]
    fn latest_on_empty_history_is_none() {
        let history = TelemetryHistory::new();
        assert!(history.latest().is_none());
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 1000);
    }
}
