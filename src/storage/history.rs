//! Ring buffers for per-minute samples and finalized daily summaries.

use log::{debug, info, warn};

extern crate alloc;
use alloc::collections::VecDeque;

use super::{
    BufferStatus, HistoryStats, MAX_DAY_CAPACITY, MAX_MINUTE_CAPACITY, StorageError,
};
use crate::sample::{DailySummary, MinuteSample};
use crate::time::{Date, Timestamp};

/// Fixed-capacity store for the device's sensor history.
///
/// Two ring buffers allocated once at construction:
///
/// - minute ring: every sample the sensor task produced, newest last,
///   oldest overwritten at capacity
/// - daily ring: finalized [`DailySummary`] records, ascending by date
///
/// The in-progress day lives in the [`Aggregator`](super::Aggregator), not
/// here; everything in the daily ring is frozen.
pub struct HistoryStore {
    minutes: VecDeque<MinuteSample>,
    days: VecDeque<DailySummary>,
    minute_capacity: usize,
    day_capacity: usize,
}

impl HistoryStore {
    /// Allocates both rings. Capacities are fixed for the life of the store;
    /// zero or anything past the RAM ceiling is rejected.
    pub fn new(minute_capacity: usize, day_capacity: usize) -> Result<Self, StorageError> {
        if minute_capacity == 0 || minute_capacity > MAX_MINUTE_CAPACITY {
            return Err(StorageError::MinuteCapacity {
                requested: minute_capacity,
                max: MAX_MINUTE_CAPACITY,
            });
        }
        if day_capacity == 0 || day_capacity > MAX_DAY_CAPACITY {
            return Err(StorageError::DayCapacity {
                requested: day_capacity,
                max: MAX_DAY_CAPACITY,
            });
        }

        info!(
            "history store: {} minute slots, {} day slots",
            minute_capacity, day_capacity
        );

        Ok(Self {
            minutes: VecDeque::with_capacity(minute_capacity),
            days: VecDeque::with_capacity(day_capacity),
            minute_capacity,
            day_capacity,
        })
    }

    /// Appends a minute sample, overwriting the oldest slot at capacity.
    pub fn record_minute(&mut self, sample: MinuteSample) {
        if self.minutes.len() >= self.minute_capacity {
            self.minutes.pop_front();
        }
        self.minutes.push_back(sample);
        debug!("recorded minute sample {}", sample);
    }

    /// Appends a finalized daily summary, overwriting the oldest at capacity.
    pub fn push_day(&mut self, summary: DailySummary) {
        if self.days.len() >= self.day_capacity {
            self.days.pop_front();
        }
        self.days.push_back(summary);
        debug!("finalized day {}", summary);
    }

    /// The most recently recorded sample, if any exist.
    pub fn latest_minute(&self) -> Option<&MinuteSample> {
        self.minutes.back()
    }

    /// Point lookup of the sample whose timestamp matches `ts` to the
    /// minute. The most recent match wins.
    pub fn minute_at(&self, ts: &Timestamp) -> Option<&MinuteSample> {
        self.minutes
            .iter()
            .rev()
            .find(|sample| sample.timestamp.same_minute(ts))
    }

    /// The newest `n` samples, oldest first. Shorter when the ring holds
    /// fewer.
    pub fn recent_minutes(&self, n: usize) -> impl Iterator<Item = &MinuteSample> {
        let skip = self.minutes.len().saturating_sub(n);
        self.minutes.iter().skip(skip)
    }

    /// Up to `n` most recent finalized summaries, oldest-of-window first
    /// (most recent last). Never errors when fewer days exist.
    pub fn recent_days(&self, n: usize) -> impl Iterator<Item = &DailySummary> {
        let skip = self.days.len().saturating_sub(n);
        self.days.iter().skip(skip)
    }

    /// The most recent finalized summary.
    pub fn latest_day(&self) -> Option<&DailySummary> {
        self.days.back()
    }

    /// The finalized summary for a specific date, if still retained.
    pub fn day_summary(&self, date: &Date) -> Option<&DailySummary> {
        self.days.iter().rev().find(|day| day.date == *date)
    }

    pub fn minute_count(&self) -> usize {
        self.minutes.len()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn minute_capacity(&self) -> usize {
        self.minute_capacity
    }

    pub fn day_capacity(&self) -> usize {
        self.day_capacity
    }

    /// Occupancy of the minute ring for the client's buffer-status query.
    pub fn occupancy(&self) -> BufferStatus {
        BufferStatus {
            count: self.minutes.len() as u16,
            capacity: self.minute_capacity as u16,
            empty: self.minutes.is_empty(),
            full: self.minutes.len() >= self.minute_capacity,
        }
    }

    /// Time range and occupancy over both rings.
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            minute_count: self.minutes.len() as u16,
            day_count: self.days.len() as u16,
            oldest_minute: self.minutes.front().map(|s| s.timestamp),
            newest_minute: self.minutes.back().map(|s| s.timestamp),
            oldest_day: self.days.front().map(|d| d.date),
            newest_day: self.days.back().map(|d| d.date),
        }
    }

    /// Drops all recorded history. Capacities are unchanged.
    pub fn clear_all(&mut self) {
        self.minutes.clear();
        self.days.clear();
        info!("history cleared");
    }

    /// Periodic compaction hook driven by the maintenance schedule.
    ///
    /// Ring eviction already bounds memory, so for this backing store the
    /// hook only reports; it stays in the interface for a backing store
    /// with unbounded retention.
    pub fn cleanup_old(&mut self, retention_days: u16) {
        debug!(
            "cleanup pass (retention {} days): ring eviction already bounds history, nothing to do",
            retention_days
        );
    }

    /// Logs the buffer occupancy and time ranges.
    pub fn log_status(&self) {
        let stats = self.stats();
        info!("=== history status ===");
        info!(
            "minute ring: {}/{} entries",
            stats.minute_count, self.minute_capacity
        );
        info!("daily ring: {}/{} entries", stats.day_count, self.day_capacity);
        match (stats.oldest_minute, stats.newest_minute) {
            (Some(oldest), Some(newest)) => info!("minute range: {} to {}", oldest, newest),
            _ => warn!("no minute data recorded yet"),
        }
        if let (Some(oldest), Some(newest)) = (stats.oldest_day, stats.newest_day) {
            info!("daily range: {} to {}", oldest, newest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timestamp;

    fn sample_at(minute: u8, soil: f32) -> MinuteSample {
        MinuteSample {
            timestamp: Timestamp::new(2025, 7, 1, 10, minute, 0),
            temperature_c: 22.0,
            humidity_pct: 50.0,
            illuminance_lux: 300.0,
            soil_moisture_mv: soil,
            sensor_error: false,
        }
    }

    fn day_on(day: u8) -> DailySummary {
        DailySummary {
            date: Date {
                year: 2025,
                month: 7,
                day,
            },
            valid_samples: 1,
            ..DailySummary::default()
        }
    }

    #[test]
    fn rejects_bad_capacities() {
        let err = HistoryStore::new(0, 30).err().unwrap();
        assert_eq!(
            err,
            StorageError::MinuteCapacity {
                requested: 0,
                max: MAX_MINUTE_CAPACITY
            }
        );
        assert!(HistoryStore::new(MAX_MINUTE_CAPACITY + 1, 30).is_err());
        assert!(HistoryStore::new(1440, 0).is_err());
        assert!(HistoryStore::new(1440, MAX_DAY_CAPACITY + 1).is_err());
        assert!(HistoryStore::new(1440, 30).is_ok());
    }

    #[test]
    fn overwrites_oldest_at_capacity() {
        // Capacity 3; minutes 1..=4 go in, minute 1 must be gone.
        let mut store = HistoryStore::new(3, 30).unwrap();
        for minute in 1..=4 {
            store.record_minute(sample_at(minute, 1500.0));
        }

        assert_eq!(store.minute_count(), 3);
        assert_eq!(store.latest_minute().unwrap().timestamp.minute, 4);
        let gone = Timestamp::new(2025, 7, 1, 10, 1, 0);
        assert!(store.minute_at(&gone).is_none());
        let kept = Timestamp::new(2025, 7, 1, 10, 2, 0);
        assert!(store.minute_at(&kept).is_some());
    }

    #[test]
    fn latest_minute_always_newest_insert() {
        let mut store = HistoryStore::new(2, 30).unwrap();
        assert!(store.latest_minute().is_none());
        for minute in 0..30 {
            store.record_minute(sample_at(minute, 1500.0));
            assert_eq!(store.latest_minute().unwrap().timestamp.minute, minute);
            assert!(store.minute_count() <= 2);
        }
    }

    #[test]
    fn point_lookup_matches_to_the_minute() {
        let mut store = HistoryStore::new(10, 30).unwrap();
        store.record_minute(sample_at(5, 1500.0));

        // Seconds differ, still the same minute.
        let probe = Timestamp::new(2025, 7, 1, 10, 5, 42);
        assert_eq!(store.minute_at(&probe).unwrap().soil_moisture_mv, 1500.0);

        let miss = Timestamp::new(2025, 7, 1, 10, 6, 0);
        assert!(store.minute_at(&miss).is_none());
    }

    #[test]
    fn recent_days_is_oldest_of_window_first() {
        let mut store = HistoryStore::new(10, 30).unwrap();
        for day in 1..=5 {
            store.push_day(day_on(day));
        }

        let window: alloc::vec::Vec<u8> = store.recent_days(3).map(|d| d.date.day).collect();
        assert_eq!(window, [3, 4, 5]);

        // Asking for more than exists returns everything, no error.
        let all: alloc::vec::Vec<u8> = store.recent_days(10).map(|d| d.date.day).collect();
        assert_eq!(all, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn day_ring_evicts_oldest() {
        let mut store = HistoryStore::new(10, 3).unwrap();
        for day in 1..=5 {
            store.push_day(day_on(day));
        }
        assert_eq!(store.day_count(), 3);
        assert_eq!(store.latest_day().unwrap().date.day, 5);
        assert!(
            store
                .day_summary(&Date {
                    year: 2025,
                    month: 7,
                    day: 1
                })
                .is_none()
        );
    }

    #[test]
    fn occupancy_flags() {
        let mut store = HistoryStore::new(2, 30).unwrap();
        let status = store.occupancy();
        assert!(status.empty && !status.full);
        assert_eq!(status.count, 0);
        assert_eq!(status.capacity, 2);

        store.record_minute(sample_at(1, 1500.0));
        let status = store.occupancy();
        assert!(!status.empty && !status.full);

        store.record_minute(sample_at(2, 1500.0));
        store.record_minute(sample_at(3, 1500.0));
        let status = store.occupancy();
        assert!(status.full);
        assert_eq!(status.count, 2);
    }

    #[test]
    fn stats_track_ranges() {
        let mut store = HistoryStore::new(5, 30).unwrap();
        store.record_minute(sample_at(1, 1500.0));
        store.record_minute(sample_at(9, 1500.0));
        store.push_day(day_on(1));
        store.push_day(day_on(2));

        let stats = store.stats();
        assert_eq!(stats.minute_count, 2);
        assert_eq!(stats.day_count, 2);
        assert_eq!(stats.oldest_minute.unwrap().minute, 1);
        assert_eq!(stats.newest_minute.unwrap().minute, 9);
        assert_eq!(stats.oldest_day.unwrap().day, 1);
        assert_eq!(stats.newest_day.unwrap().day, 2);
    }

    #[test]
    fn clear_all_empties_both_rings() {
        let mut store = HistoryStore::new(5, 5).unwrap();
        store.record_minute(sample_at(1, 1500.0));
        store.push_day(day_on(1));
        store.clear_all();
        assert_eq!(store.minute_count(), 0);
        assert_eq!(store.day_count(), 0);
        assert!(store.latest_minute().is_none());
    }

    #[test]
    fn cleanup_is_a_noop_for_ring_storage() {
        let mut store = HistoryStore::new(5, 5).unwrap();
        store.record_minute(sample_at(1, 1500.0));
        store.cleanup_old(30);
        assert_eq!(store.minute_count(), 1);
    }

    #[test]
    fn recent_minutes_window() {
        let mut store = HistoryStore::new(10, 30).unwrap();
        for minute in 0..6 {
            store.record_minute(sample_at(minute, 1500.0));
        }
        let window: alloc::vec::Vec<u8> =
            store.recent_minutes(3).map(|s| s.timestamp.minute).collect();
        assert_eq!(window, [3, 4, 5]);
    }
}
