//! Fixed-capacity history storage for minute samples and daily summaries.

pub mod aggregator;
pub mod history;

pub use aggregator::Aggregator;
pub use history::HistoryStore;

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::time::{Date, Timestamp};

/// Default minute-ring capacity: one sample per minute for a full day.
pub const DEFAULT_MINUTE_CAPACITY: usize = 24 * 60;

/// Default daily-ring capacity: one month of finalized days.
pub const DEFAULT_DAY_CAPACITY: usize = 30;

/// Hard ceiling on the minute ring, sized to the device's RAM budget.
pub const MAX_MINUTE_CAPACITY: usize = 2 * 24 * 60;

/// Hard ceiling on the daily ring.
pub const MAX_DAY_CAPACITY: usize = 366;

/// Rejected ring-buffer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("minute capacity {requested} outside 1..={max}")]
    MinuteCapacity { requested: usize, max: usize },
    #[error("day capacity {requested} outside 1..={max}")]
    DayCapacity { requested: usize, max: usize },
}

/// Occupancy of the minute ring, answered over the wireless link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferStatus {
    pub count: u16,
    pub capacity: u16,
    pub empty: bool,
    pub full: bool,
}

/// Range statistics over both rings, for diagnostics and the client's
/// system-status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryStats {
    pub minute_count: u16,
    pub day_count: u16,
    pub oldest_minute: Option<Timestamp>,
    pub newest_minute: Option<Timestamp>,
    pub oldest_day: Option<Date>,
    pub newest_day: Option<Date>,
}
