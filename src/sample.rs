//! Sensor sample and daily summary records.

use crate::time::{Date, Timestamp};

/// One per-minute sensor reading.
///
/// Produced once per sampling interval by the sensor collaborator, recorded
/// verbatim in the minute ring, and destroyed only by ring overwrite.
///
/// Soil moisture is the raw probe voltage in millivolts: a *higher* value
/// means *drier* soil.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MinuteSample {
    pub timestamp: Timestamp,
    /// Air temperature in °C
    pub temperature_c: f32,
    /// Relative humidity in %
    pub humidity_pct: f32,
    /// Illuminance in lux
    pub illuminance_lux: f32,
    /// Soil moisture probe voltage in mV
    pub soil_moisture_mv: f32,
    /// Set when the sensor bus transaction failed; the sample is kept for
    /// continuity of the ring but excluded from aggregation.
    pub sensor_error: bool,
}

impl core::fmt::Display for MinuteSample {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "[{}] temp: {:.1}°C, humidity: {:.1}%, light: {:.0} lx, soil: {:.0} mV",
            self.timestamp,
            self.temperature_c,
            self.humidity_pct,
            self.illuminance_lux,
            self.soil_moisture_mv
        )
    }
}

/// Finalized aggregate of one calendar day of minute samples.
///
/// Built incrementally by the aggregator while the day is in progress and
/// frozen the moment a sample for a different date arrives. The average
/// fields are divided once at finalization and are only meaningful because
/// a summary is never finalized with `valid_samples == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailySummary {
    pub date: Date,
    pub min_temperature: f32,
    pub max_temperature: f32,
    pub avg_temperature: f32,
    pub avg_humidity: f32,
    pub avg_illuminance: f32,
    pub min_soil_moisture: f32,
    pub max_soil_moisture: f32,
    pub avg_soil_moisture: f32,
    /// Number of non-error samples folded into the aggregates.
    pub valid_samples: u16,
}

impl core::fmt::Display for DailySummary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "[{}] temp: {:.1}-{:.1}°C, soil avg: {:.0} mV ({} samples)",
            self.date,
            self.min_temperature,
            self.max_temperature,
            self.avg_soil_moisture,
            self.valid_samples
        )
    }
}
