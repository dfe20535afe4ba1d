//! Fixed-layout serialization of the plant profile.
//!
//! The profile is persisted (and carried over the wireless link) as one
//! versioned little-endian record with an explicit byte layout, so the
//! stored form is independent of in-memory struct padding.
//!
//! Binary format (little-endian):
//! - version: 1 byte
//! - plant name: 32 bytes (UTF-8, NUL padded)
//! - soil dry threshold: 4 bytes (f32, mV)
//! - soil wet threshold: 4 bytes (f32, mV)
//! - dry days for watering: 1 byte
//! - temperature high limit: 4 bytes (f32, °C)
//! - temperature low limit: 4 bytes (f32, °C)
//! - high-temp dormancy max temp: 4 bytes (f32, °C)
//! - high-temp dormancy min temp: 4 bytes (f32, °C)
//! - high-temp dormancy day count: 1 byte
//! - low-temp dormancy min temp: 4 bytes (f32, °C)
//! - active period min temp: 4 bytes (f32, °C)
//! - active period max temp: 4 bytes (f32, °C)
//! - active period consecutive days: 1 byte
//! - optimal moisture min: 4 bytes (f32, mV)
//! - optimal moisture max: 4 bytes (f32, mV)

use thiserror_no_std::Error;

use super::{PLANT_NAME_LEN, PlantProfile, clamped_name};

/// Current record layout version.
pub const PROFILE_RECORD_VERSION: u8 = 1;

/// Total record length in bytes.
pub const PROFILE_RECORD_LEN: usize = 1 + PLANT_NAME_LEN + 11 * 4 + 3;

/// A persisted record that cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("unsupported profile record version {0}")]
    UnsupportedVersion(u8),
    #[error("profile record is {found} bytes, expected {expected}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("plant name is not valid UTF-8")]
    BadName,
}

/// Serializes the profile into its fixed on-flash layout.
pub fn encode_record(profile: &PlantProfile) -> [u8; PROFILE_RECORD_LEN] {
    let mut bytes = [0u8; PROFILE_RECORD_LEN];
    let mut offset = 0;

    bytes[offset] = PROFILE_RECORD_VERSION;
    offset += 1;

    // Name field is NUL padded; the in-memory string never exceeds it.
    let name = profile.plant_name.as_bytes();
    bytes[offset..offset + name.len()].copy_from_slice(name);
    offset += PLANT_NAME_LEN;

    let put_f32 = |bytes: &mut [u8; PROFILE_RECORD_LEN], offset: &mut usize, value: f32| {
        bytes[*offset..*offset + 4].copy_from_slice(&value.to_le_bytes());
        *offset += 4;
    };

    put_f32(&mut bytes, &mut offset, profile.soil_dry_threshold_mv);
    put_f32(&mut bytes, &mut offset, profile.soil_wet_threshold_mv);
    bytes[offset] = profile.soil_dry_days_for_watering;
    offset += 1;

    put_f32(&mut bytes, &mut offset, profile.temp_high_limit_c);
    put_f32(&mut bytes, &mut offset, profile.temp_low_limit_c);

    put_f32(&mut bytes, &mut offset, profile.high_temp_dormancy_max_temp);
    put_f32(&mut bytes, &mut offset, profile.high_temp_dormancy_min_temp);
    bytes[offset] = profile.high_temp_dormancy_min_temp_days;
    offset += 1;

    put_f32(&mut bytes, &mut offset, profile.low_temp_dormancy_min_temp);

    put_f32(&mut bytes, &mut offset, profile.active_period_min_temp);
    put_f32(&mut bytes, &mut offset, profile.active_period_max_temp);
    bytes[offset] = profile.active_period_consecutive_days;
    offset += 1;

    put_f32(&mut bytes, &mut offset, profile.soil_moisture_opt_min_mv);
    put_f32(&mut bytes, &mut offset, profile.soil_moisture_opt_max_mv);
    debug_assert_eq!(offset, PROFILE_RECORD_LEN);

    bytes
}

/// Deserializes a record, rejecting unknown versions and wrong sizes.
pub fn decode_record(bytes: &[u8]) -> Result<PlantProfile, RecordError> {
    if bytes.len() != PROFILE_RECORD_LEN {
        return Err(RecordError::SizeMismatch {
            expected: PROFILE_RECORD_LEN,
            found: bytes.len(),
        });
    }
    if bytes[0] != PROFILE_RECORD_VERSION {
        return Err(RecordError::UnsupportedVersion(bytes[0]));
    }

    let mut offset = 1;

    let name_field = &bytes[offset..offset + PLANT_NAME_LEN];
    let name_len = name_field
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(PLANT_NAME_LEN);
    let name = core::str::from_utf8(&name_field[..name_len]).map_err(|_| RecordError::BadName)?;
    offset += PLANT_NAME_LEN;

    let take_f32 = |offset: &mut usize| {
        let mut field = [0u8; 4];
        field.copy_from_slice(&bytes[*offset..*offset + 4]);
        *offset += 4;
        f32::from_le_bytes(field)
    };

    let soil_dry_threshold_mv = take_f32(&mut offset);
    let soil_wet_threshold_mv = take_f32(&mut offset);
    let soil_dry_days_for_watering = bytes[offset];
    offset += 1;

    let temp_high_limit_c = take_f32(&mut offset);
    let temp_low_limit_c = take_f32(&mut offset);

    let high_temp_dormancy_max_temp = take_f32(&mut offset);
    let high_temp_dormancy_min_temp = take_f32(&mut offset);
    let high_temp_dormancy_min_temp_days = bytes[offset];
    offset += 1;

    let low_temp_dormancy_min_temp = take_f32(&mut offset);

    let active_period_min_temp = take_f32(&mut offset);
    let active_period_max_temp = take_f32(&mut offset);
    let active_period_consecutive_days = bytes[offset];
    offset += 1;

    let soil_moisture_opt_min_mv = take_f32(&mut offset);
    let soil_moisture_opt_max_mv = take_f32(&mut offset);
    debug_assert_eq!(offset, PROFILE_RECORD_LEN);

    Ok(PlantProfile {
        plant_name: clamped_name(name),
        soil_dry_threshold_mv,
        soil_wet_threshold_mv,
        soil_dry_days_for_watering,
        soil_moisture_opt_min_mv,
        soil_moisture_opt_max_mv,
        temp_high_limit_c,
        temp_low_limit_c,
        high_temp_dormancy_max_temp,
        high_temp_dormancy_min_temp,
        high_temp_dormancy_min_temp_days,
        low_temp_dormancy_min_temp,
        active_period_min_temp,
        active_period_max_temp,
        active_period_consecutive_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_80_bytes() {
        assert_eq!(PROFILE_RECORD_LEN, 80);
        assert_eq!(encode_record(&PlantProfile::default()).len(), 80);
    }

    #[test]
    fn round_trips_the_default_profile() {
        let profile = PlantProfile::default();
        let bytes = encode_record(&profile);
        let decoded = decode_record(&bytes).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn round_trips_a_customized_profile() {
        let mut profile = PlantProfile::default();
        profile.set_name("Haworthia");
        profile.soil_dry_threshold_mv = 2700.0;
        profile.soil_dry_days_for_watering = 5;
        profile.low_temp_dormancy_min_temp = 2.5;

        let decoded = decode_record(&encode_record(&profile)).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn rejects_wrong_size() {
        let bytes = encode_record(&PlantProfile::default());
        let err = decode_record(&bytes[..PROFILE_RECORD_LEN - 1]).unwrap_err();
        assert_eq!(
            err,
            RecordError::SizeMismatch {
                expected: PROFILE_RECORD_LEN,
                found: PROFILE_RECORD_LEN - 1
            }
        );
    }

    #[test]
    fn rejects_unknown_version() {
        let mut bytes = encode_record(&PlantProfile::default());
        bytes[0] = 9;
        assert_eq!(
            decode_record(&bytes).unwrap_err(),
            RecordError::UnsupportedVersion(9)
        );
    }

    #[test]
    fn rejects_invalid_name_bytes() {
        let mut bytes = encode_record(&PlantProfile::default());
        bytes[1] = 0xFF;
        bytes[2] = 0xFE;
        assert_eq!(decode_record(&bytes).unwrap_err(), RecordError::BadName);
    }
}
