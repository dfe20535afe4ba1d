//! The status facade tying history, aggregation, profile and evaluation
//! together.

use log::{error, info, warn};

extern crate alloc;
use alloc::vec::Vec;

use crate::events::{MonitorEvent, MonitorPublisher};
use crate::profile::{KvError, KvStore, PlantProfile, ProfileStore};
use crate::sample::{DailySummary, MinuteSample};
use crate::status::{ConditionEvaluator, PlantStatus};
use crate::storage::{Aggregator, BufferStatus, HistoryStats, HistoryStore, StorageError};
use crate::time::{Date, Timestamp};

/// Public entry point for the firmware tasks.
///
/// Owns the history rings, the day aggregator, the condition evaluator and
/// the active profile. There are no global buffers behind this type; the
/// firmware threads one monitor handle through its tasks.
/// Construction performs the whole init sequence
/// (profile load, then history allocation), so a monitor that exists is
/// ready: operating "before init" is unrepresentable.
pub struct PlantMonitor<'a, K: KvStore> {
    history: HistoryStore,
    aggregator: Aggregator,
    evaluator: ConditionEvaluator,
    profiles: ProfileStore<K>,
    publisher: Option<MonitorPublisher<'a>>,
}

impl<'a, K: KvStore> PlantMonitor<'a, K> {
    /// Loads the profile (soft-failing to defaults, see
    /// [`ProfileStore::load`]) and allocates the history rings, failing
    /// fast on a rejected capacity.
    pub fn new(
        kv: K,
        minute_capacity: usize,
        day_capacity: usize,
    ) -> Result<Self, StorageError> {
        let mut profiles = ProfileStore::new(kv);
        profiles.load();

        let history = HistoryStore::new(minute_capacity, day_capacity)?;

        info!(
            "plant monitor ready for '{}'",
            profiles.active().plant_name
        );

        Ok(Self {
            history,
            aggregator: Aggregator::new(),
            evaluator: ConditionEvaluator::new(),
            profiles,
            publisher: None,
        })
    }

    /// Attaches the event channel publisher. Without one the monitor works
    /// identically but nothing is fanned out.
    pub fn with_publisher(mut self, publisher: MonitorPublisher<'a>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Records one sensor sample and rolls it into the daily aggregates.
    ///
    /// A sample whose timestamp is implausible (clock never synced) is
    /// dropped with a logged error; nothing else here can fail.
    pub fn process_sample(&mut self, sample: MinuteSample) {
        if !sample.timestamp.is_plausible() {
            error!(
                "dropping sample with implausible timestamp {}",
                sample.timestamp
            );
            return;
        }

        self.history.record_minute(sample);
        if let Some(finalized) = self.aggregator.ingest(&sample) {
            self.history.push_day(finalized);
            self.publish(MonitorEvent::DayFinalized(finalized));
        }
        self.publish(MonitorEvent::Sample(sample));
    }

    /// Runs one analysis cycle. Never fails: with no usable data the
    /// condition is `Error` and the growth phase `Unknown`, and the caller
    /// simply retries next cycle.
    pub fn determine_status(&mut self) -> PlantStatus {
        let status = self
            .evaluator
            .evaluate(&self.history, self.profiles.active());
        info!(
            "status: {} / {}",
            status.condition.label(),
            status.growth_phase.label()
        );
        self.publish(MonitorEvent::Status(status));
        status
    }

    /// The most recently recorded sample.
    pub fn latest_sample(&self) -> Option<&MinuteSample> {
        self.history.latest_minute()
    }

    /// The sample recorded at `ts`, matched to the minute.
    pub fn sample_at(&self, ts: &Timestamp) -> Option<&MinuteSample> {
        self.history.minute_at(ts)
    }

    /// Up to `n` most recent finalized daily summaries, oldest first.
    pub fn recent_days(&self, n: usize) -> Vec<DailySummary> {
        self.history.recent_days(n).copied().collect()
    }

    pub fn latest_day(&self) -> Option<&DailySummary> {
        self.history.latest_day()
    }

    pub fn day_summary(&self, date: &Date) -> Option<&DailySummary> {
        self.history.day_summary(date)
    }

    /// Minute-ring occupancy for the client's buffer-status query.
    pub fn buffer_status(&self) -> BufferStatus {
        self.history.occupancy()
    }

    pub fn history_stats(&self) -> HistoryStats {
        self.history.stats()
    }

    pub fn profile(&self) -> &PlantProfile {
        self.profiles.active()
    }

    /// Replaces the active profile in memory; call [`save_profile`] to make
    /// it durable.
    ///
    /// [`save_profile`]: Self::save_profile
    pub fn update_profile(&mut self, profile: PlantProfile) {
        self.profiles.update(profile);
    }

    pub fn save_profile(&mut self) -> Result<(), KvError> {
        self.profiles.save()
    }

    /// Periodic maintenance hook, see [`HistoryStore::cleanup_old`].
    pub fn cleanup_old(&mut self, retention_days: u16) {
        self.history.cleanup_old(retention_days);
    }

    /// Drops all recorded history.
    pub fn clear_history(&mut self) {
        self.history.clear_all();
    }

    /// Diagnostic dump of the whole system, non-authoritative.
    pub fn log_status(&self) {
        info!("=== plant monitor status ===");
        info!("plant: {}", self.profiles.active().plant_name);
        self.history.log_status();
        match self.history.latest_minute() {
            Some(latest) => info!("latest sample: {}", latest),
            None => warn!("no sample recorded yet"),
        }
        if let Some(day) = self.history.latest_day() {
            info!("latest daily summary: {}", day);
        }
        info!(
            "last condition: {}",
            self.evaluator.last_condition().label()
        );
    }

    fn publish(&self, event: MonitorEvent) {
        if let Some(publisher) = &self.publisher {
            // Must not block the sampling task.
            if publisher.try_publish(event).is_err() {
                warn!("event channel full, dropping event");
            }
        }
    }
}
