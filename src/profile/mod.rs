//! Plant profile: the configurable thresholds governing condition
//! evaluation, plus its persistence through the key-value collaborator.

pub mod record;
pub mod store;

pub use record::{PROFILE_RECORD_LEN, PROFILE_RECORD_VERSION, RecordError, decode_record,
                 encode_record};
pub use store::{KvError, KvStore, ProfileStore};

use core::str::FromStr;

/// Maximum plant name length in bytes, fixed by the persisted record layout.
pub const PLANT_NAME_LEN: usize = 32;

pub type PlantName = heapless::String<PLANT_NAME_LEN>;

/// Active configuration for one monitored plant.
///
/// Soil moisture thresholds are probe millivolts, where higher means drier.
/// The growth-phase fields classify dormancy/activity from daily
/// temperature aggregates, independently of the soil condition.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantProfile {
    pub plant_name: PlantName,

    /// At or above this the soil counts as dry.
    pub soil_dry_threshold_mv: f32,
    /// At or below this the soil counts as wet (watering completed).
    pub soil_wet_threshold_mv: f32,
    /// Consecutive dry days before watering is requested. Zero disables the
    /// consecutive-day check.
    pub soil_dry_days_for_watering: u8,
    /// Optimal moisture band, informational.
    pub soil_moisture_opt_min_mv: f32,
    pub soil_moisture_opt_max_mv: f32,

    /// Hard temperature limits; crossing either overrides all soil logic.
    pub temp_high_limit_c: f32,
    pub temp_low_limit_c: f32,

    /// One day reaching this maximum puts the plant in high-temperature
    /// dormancy immediately.
    pub high_temp_dormancy_max_temp: f32,
    /// Daily minimum at or above this counts toward high-temperature
    /// dormancy by day count.
    pub high_temp_dormancy_min_temp: f32,
    pub high_temp_dormancy_min_temp_days: u8,

    /// One day dipping to this minimum puts the plant in low-temperature
    /// dormancy immediately.
    pub low_temp_dormancy_min_temp: f32,

    /// Temperature band for the active growth period, with the number of
    /// consecutive in-band days required.
    pub active_period_min_temp: f32,
    pub active_period_max_temp: f32,
    pub active_period_consecutive_days: u8,
}

impl PlantProfile {
    /// Replaces the plant name, truncating on a character boundary if the
    /// given string exceeds the record's 32-byte field.
    pub fn set_name(&mut self, name: &str) {
        self.plant_name = clamped_name(name);
    }
}

/// Copies `name` into a fixed-capacity string, dropping trailing characters
/// that do not fit the persisted field.
pub(crate) fn clamped_name(name: &str) -> PlantName {
    match PlantName::from_str(name) {
        Ok(owned) => owned,
        Err(_) => {
            let mut owned = PlantName::new();
            for ch in name.chars() {
                if owned.push(ch).is_err() {
                    break;
                }
            }
            owned
        }
    }
}

impl Default for PlantProfile {
    /// The hard-coded succulent profile installed when nothing valid is
    /// persisted.
    fn default() -> Self {
        Self {
            plant_name: clamped_name("Succulent Plant"),
            soil_dry_threshold_mv: 2500.0,
            soil_wet_threshold_mv: 1000.0,
            soil_dry_days_for_watering: 3,
            soil_moisture_opt_min_mv: 1000.0,
            soil_moisture_opt_max_mv: 1800.0,
            temp_high_limit_c: 30.0,
            temp_low_limit_c: 15.0,
            high_temp_dormancy_max_temp: 30.0,
            high_temp_dormancy_min_temp: 25.0,
            high_temp_dormancy_min_temp_days: 4,
            low_temp_dormancy_min_temp: 5.0,
            active_period_min_temp: 10.0,
            active_period_max_temp: 28.0,
            active_period_consecutive_days: 3,
        }
    }
}
