//! Cross-task plumbing for the monitor.
//!
//! The sampling task owns the monitor behind [`SharedMonitor`]; results fan
//! out to the transport-notify and indicator tasks through a global pub-sub
//! channel.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex as AsyncMutex;
use embassy_sync::pubsub::{PubSubChannel, Publisher, Subscriber};

use crate::monitor::PlantMonitor;
use crate::sample::{DailySummary, MinuteSample};
use crate::status::PlantStatus;

/// Channel capacity; sized to absorb a burst of events without blocking the
/// sampling task.
pub const EVENT_CHANNEL_CAPACITY: usize = 8;

/// Number of subscribers:
/// - Subscriber 0: wireless transport notifier
/// - Subscriber 1: status LED task
pub const EVENT_SUBSCRIBERS: usize = 2;

/// Only the task holding the monitor publishes.
pub const EVENT_PUBLISHERS: usize = 1;

/// Events published as the monitor processes samples and analysis cycles.
#[derive(Debug, Clone, Copy)]
pub enum MonitorEvent {
    /// A new minute sample was recorded.
    Sample(MinuteSample),
    /// A calendar day rolled over and its summary was finalized.
    DayFinalized(DailySummary),
    /// An analysis cycle produced a status.
    Status(PlantStatus),
}

/// Global pub-sub channel for monitor events.
pub static MONITOR_CHANNEL: PubSubChannel<
    CriticalSectionRawMutex,
    MonitorEvent,
    EVENT_CHANNEL_CAPACITY,
    EVENT_SUBSCRIBERS,
    EVENT_PUBLISHERS,
> = PubSubChannel::new();

/// Publisher half handed to the monitor.
pub type MonitorPublisher<'a> = Publisher<
    'a,
    CriticalSectionRawMutex,
    MonitorEvent,
    EVENT_CHANNEL_CAPACITY,
    EVENT_SUBSCRIBERS,
    EVENT_PUBLISHERS,
>;

/// Subscriber half for the transport and indicator tasks.
pub type MonitorSubscriber<'a> = Subscriber<
    'a,
    CriticalSectionRawMutex,
    MonitorEvent,
    EVENT_CHANNEL_CAPACITY,
    EVENT_SUBSCRIBERS,
    EVENT_PUBLISHERS,
>;

/// The one shared-mutable handle of the system: sampling task writes,
/// analysis task reads, both through this mutex.
pub type SharedMonitor<'a, K> = AsyncMutex<CriticalSectionRawMutex, PlantMonitor<'a, K>>;
