//! Payload encoding for the wireless command surface.
//!
//! The transport collaborator frames and ships these payloads; the core
//! only defines the DTO shapes and their byte encoding. Samples, status and
//! occupancy travel as postcard; the profile travels as the same
//! fixed-layout record it is persisted as, so a client can read, edit and
//! write back one blob.

extern crate alloc;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::profile::{PlantProfile, RecordError, decode_record, encode_record, PROFILE_RECORD_LEN};
use crate::sample::MinuteSample;
use crate::status::PlantStatus;
use crate::storage::BufferStatus;
use crate::time::Timestamp;

/// One sensor sample as notified to the client.
///
/// Error-flagged samples are never notified, so the flag is not carried.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireSample {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub illuminance_lux: f32,
    pub soil_moisture_mv: f32,
}

impl From<&MinuteSample> for WireSample {
    fn from(sample: &MinuteSample) -> Self {
        Self {
            year: sample.timestamp.year,
            month: sample.timestamp.month,
            day: sample.timestamp.day,
            hour: sample.timestamp.hour,
            minute: sample.timestamp.minute,
            second: sample.timestamp.second,
            temperature_c: sample.temperature_c,
            humidity_pct: sample.humidity_pct,
            illuminance_lux: sample.illuminance_lux,
            soil_moisture_mv: sample.soil_moisture_mv,
        }
    }
}

/// Encodes a sample notification payload.
pub fn encode_sample(sample: &MinuteSample) -> Result<Vec<u8>, postcard::Error> {
    postcard::to_allocvec(&WireSample::from(sample))
}

/// Encodes a device-status payload.
pub fn encode_status(status: &PlantStatus) -> Result<Vec<u8>, postcard::Error> {
    postcard::to_allocvec(status)
}

/// Encodes a data-buffer occupancy payload.
pub fn encode_buffer_status(status: &BufferStatus) -> Result<Vec<u8>, postcard::Error> {
    postcard::to_allocvec(status)
}

/// Decodes the timestamp argument of a history point-lookup request.
pub fn decode_timestamp(bytes: &[u8]) -> Result<Timestamp, postcard::Error> {
    postcard::from_bytes(bytes)
}

/// Encodes the profile for a get-profile response.
pub fn encode_profile(profile: &PlantProfile) -> [u8; PROFILE_RECORD_LEN] {
    encode_record(profile)
}

/// Decodes the profile blob of a set-profile request.
pub fn decode_profile(bytes: &[u8]) -> Result<PlantProfile, RecordError> {
    decode_record(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{GrowthPhase, PlantCondition};

    #[test]
    fn sample_round_trips() {
        let sample = MinuteSample {
            timestamp: Timestamp::new(2025, 7, 1, 10, 30, 15),
            temperature_c: 23.5,
            humidity_pct: 48.0,
            illuminance_lux: 850.0,
            soil_moisture_mv: 1740.0,
            sensor_error: false,
        };

        let bytes = encode_sample(&sample).unwrap();
        let decoded: WireSample = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, WireSample::from(&sample));
        assert_eq!(decoded.minute, 30);
        assert_eq!(decoded.soil_moisture_mv, 1740.0);
    }

    #[test]
    fn status_round_trips() {
        let status = PlantStatus {
            condition: PlantCondition::NeedsWatering,
            growth_phase: GrowthPhase::ActivePeriod,
        };
        let bytes = encode_status(&status).unwrap();
        let decoded: PlantStatus = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, status);
    }

    #[test]
    fn buffer_status_round_trips() {
        let status = BufferStatus {
            count: 1440,
            capacity: 1440,
            empty: false,
            full: true,
        };
        let bytes = encode_buffer_status(&status).unwrap();
        let decoded: BufferStatus = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, status);
    }

    #[test]
    fn timestamp_request_round_trips() {
        let ts = Timestamp::new(2025, 7, 1, 10, 30, 0);
        let bytes = postcard::to_allocvec(&ts).unwrap();
        assert_eq!(decode_timestamp(&bytes).unwrap(), ts);
    }

    #[test]
    fn profile_payload_is_the_persisted_record() {
        let mut profile = PlantProfile::default();
        profile.set_name("Sedum");
        let blob = encode_profile(&profile);
        assert_eq!(blob.len(), PROFILE_RECORD_LEN);
        assert_eq!(decode_profile(&blob).unwrap(), profile);
    }
}
