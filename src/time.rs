//! Calendar timestamps for the history buffers.
//!
//! The device gets wall time from SNTP through the time-sync collaborator
//! and hands it to the core as plain calendar fields. Field order is
//! most-significant first so the derived ordering is chronological.

use serde::{Deserialize, Serialize};

/// A calendar point in time, to one-second resolution.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp {
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// A calendar date with the time-of-day fields stripped.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Timestamp {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// The calendar date this timestamp falls on.
    pub const fn date(&self) -> Date {
        Date {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }

    /// True when both timestamps fall within the same calendar minute.
    ///
    /// Seconds are ignored; history point lookups match to the minute.
    pub fn same_minute(&self, other: &Timestamp) -> bool {
        self.date() == other.date() && self.hour == other.hour && self.minute == other.minute
    }

    /// Basic calendar-field sanity check.
    ///
    /// The sensor task feeds timestamps straight from the time-sync
    /// collaborator; a zeroed or out-of-range timestamp means time was never
    /// synced and the sample cannot be indexed.
    pub fn is_plausible(&self) -> bool {
        (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
            && self.year >= 1970
    }
}

impl core::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
