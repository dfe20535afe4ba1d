//! Hardware-independent core library for the plantmon device
//!
//! This crate contains the platform-agnostic logic of the plant monitor:
//! the time-indexed sensor history buffers, daily aggregation, the plant
//! condition evaluator, profile persistence, and the facade the firmware
//! tasks drive. Sensor drivers, the wireless transport and the LED strip
//! live outside the crate and talk to it through the types defined here.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for tests).

#![no_std]

extern crate alloc;

pub mod events;
pub mod monitor;
pub mod profile;
pub mod sample;
pub mod status;
pub mod storage;
pub mod time;
pub mod wire;

pub use monitor::PlantMonitor;
pub use profile::{KvError, KvStore, PlantProfile, ProfileStore};
pub use sample::{DailySummary, MinuteSample};
pub use status::{ConditionEvaluator, GrowthPhase, PlantCondition, PlantStatus};
pub use storage::{BufferStatus, HistoryStore, StorageError};
pub use time::{Date, Timestamp};
