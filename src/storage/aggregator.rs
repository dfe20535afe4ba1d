//! Rolls per-minute samples into per-day aggregates.

use log::{debug, info};

use crate::sample::{DailySummary, MinuteSample};
use crate::time::Date;

/// Running accumulator for the calendar day currently being sampled.
///
/// Sums are kept in `f64` and divided exactly once at finalization.
#[derive(Debug, Clone, Copy)]
pub struct DayAccumulator {
    date: Date,
    min_temperature: f32,
    max_temperature: f32,
    temperature_sum: f64,
    humidity_sum: f64,
    illuminance_sum: f64,
    min_soil_moisture: f32,
    max_soil_moisture: f32,
    soil_moisture_sum: f64,
    valid_samples: u16,
}

impl DayAccumulator {
    fn start(date: Date) -> Self {
        Self {
            date,
            min_temperature: f32::INFINITY,
            max_temperature: f32::NEG_INFINITY,
            temperature_sum: 0.0,
            humidity_sum: 0.0,
            illuminance_sum: 0.0,
            min_soil_moisture: f32::INFINITY,
            max_soil_moisture: f32::NEG_INFINITY,
            soil_moisture_sum: 0.0,
            valid_samples: 0,
        }
    }

    /// Folds one sample into the running aggregates. Error-flagged samples
    /// stay in the minute ring but are never counted here.
    fn fold(&mut self, sample: &MinuteSample) {
        if sample.sensor_error {
            debug!(
                "sample at {} flagged as sensor error, excluded from day aggregate",
                sample.timestamp
            );
            return;
        }

        self.min_temperature = self.min_temperature.min(sample.temperature_c);
        self.max_temperature = self.max_temperature.max(sample.temperature_c);
        self.temperature_sum += f64::from(sample.temperature_c);
        self.humidity_sum += f64::from(sample.humidity_pct);
        self.illuminance_sum += f64::from(sample.illuminance_lux);
        self.min_soil_moisture = self.min_soil_moisture.min(sample.soil_moisture_mv);
        self.max_soil_moisture = self.max_soil_moisture.max(sample.soil_moisture_mv);
        self.soil_moisture_sum += f64::from(sample.soil_moisture_mv);
        self.valid_samples += 1;
    }

    /// Computes the averages and freezes the day. A day that never saw a
    /// valid sample yields `None` and is dropped rather than finalized.
    fn finalize(self) -> Option<DailySummary> {
        if self.valid_samples == 0 {
            debug!("day {} had no valid samples, skipping finalization", self.date);
            return None;
        }

        let count = f64::from(self.valid_samples);
        Some(DailySummary {
            date: self.date,
            min_temperature: self.min_temperature,
            max_temperature: self.max_temperature,
            avg_temperature: (self.temperature_sum / count) as f32,
            avg_humidity: (self.humidity_sum / count) as f32,
            avg_illuminance: (self.illuminance_sum / count) as f32,
            min_soil_moisture: self.min_soil_moisture,
            max_soil_moisture: self.max_soil_moisture,
            avg_soil_moisture: (self.soil_moisture_sum / count) as f32,
            valid_samples: self.valid_samples,
        })
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn valid_samples(&self) -> u16 {
        self.valid_samples
    }
}

/// Folds the sample stream into daily summaries.
///
/// At most one in-progress day exists at a time. `ingest` is the only
/// mutating entry point; the facade feeds it every sample right after the
/// minute ring append.
#[derive(Debug, Default)]
pub struct Aggregator {
    current: Option<DayAccumulator>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Folds `sample` into the in-progress day. When the sample's date
    /// differs from the in-progress day (or no day is in progress), the
    /// previous day is finalized and returned for the caller to append to
    /// the daily ring, and a fresh day is started from this sample.
    pub fn ingest(&mut self, sample: &MinuteSample) -> Option<DailySummary> {
        let date = sample.timestamp.date();
        let rotate = !matches!(&self.current, Some(acc) if acc.date == date);

        let mut finalized = None;
        if rotate {
            if let Some(previous) = self.current.take() {
                finalized = previous.finalize();
                if let Some(summary) = &finalized {
                    info!("day rolled over: {}", summary);
                }
            }
            self.current = Some(DayAccumulator::start(date));
        }

        if let Some(acc) = self.current.as_mut() {
            acc.fold(sample);
        }

        finalized
    }

    /// The day currently being accumulated, for diagnostics.
    pub fn in_progress(&self) -> Option<&DayAccumulator> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timestamp;

    fn sample(day: u8, minute: u8, temp: f32, soil: f32) -> MinuteSample {
        MinuteSample {
            timestamp: Timestamp::new(2025, 7, day, 12, minute, 0),
            temperature_c: temp,
            humidity_pct: 50.0,
            illuminance_lux: 200.0,
            soil_moisture_mv: soil,
            sensor_error: false,
        }
    }

    #[test]
    fn folds_min_max_and_average() {
        let mut agg = Aggregator::new();
        assert!(agg.ingest(&sample(1, 0, 18.0, 2000.0)).is_none());
        assert!(agg.ingest(&sample(1, 1, 26.0, 2200.0)).is_none());
        assert!(agg.ingest(&sample(1, 2, 22.0, 2400.0)).is_none());

        // Rotation on the next day hands back day 1.
        let summary = agg.ingest(&sample(2, 0, 20.0, 1000.0)).unwrap();
        assert_eq!(summary.date.day, 1);
        assert_eq!(summary.valid_samples, 3);
        assert_eq!(summary.min_temperature, 18.0);
        assert_eq!(summary.max_temperature, 26.0);
        assert_eq!(summary.avg_temperature, 22.0);
        assert_eq!(summary.avg_soil_moisture, 2200.0);
        assert_eq!(summary.min_soil_moisture, 2000.0);
        assert_eq!(summary.max_soil_moisture, 2400.0);
    }

    #[test]
    fn min_le_every_temperature_le_max() {
        let temps = [21.5, 19.0, 25.0, 23.5, 20.0];
        let mut agg = Aggregator::new();
        for (i, t) in temps.iter().enumerate() {
            agg.ingest(&sample(1, i as u8, *t, 1500.0));
        }
        let summary = agg.ingest(&sample(2, 0, 22.0, 1500.0)).unwrap();
        for t in temps {
            assert!(summary.min_temperature <= t && t <= summary.max_temperature);
        }
    }

    #[test]
    fn error_samples_are_excluded_from_aggregates() {
        let mut agg = Aggregator::new();
        agg.ingest(&sample(1, 0, 20.0, 2000.0));

        let mut bad = sample(1, 1, 99.0, 9999.0);
        bad.sensor_error = true;
        agg.ingest(&bad);

        agg.ingest(&sample(1, 2, 24.0, 2600.0));

        let summary = agg.ingest(&sample(2, 0, 20.0, 1000.0)).unwrap();
        assert_eq!(summary.valid_samples, 2);
        assert_eq!(summary.max_temperature, 24.0);
        assert_eq!(summary.avg_soil_moisture, 2300.0);
    }

    #[test]
    fn day_of_only_errors_is_never_finalized() {
        let mut agg = Aggregator::new();
        let mut bad = sample(1, 0, 0.0, 0.0);
        bad.sensor_error = true;
        agg.ingest(&bad);

        // Rotation happens, but the empty day is dropped.
        assert!(agg.ingest(&sample(2, 0, 20.0, 1500.0)).is_none());
        assert_eq!(agg.in_progress().unwrap().date().day, 2);
    }

    #[test]
    fn error_sample_still_starts_a_new_day() {
        let mut agg = Aggregator::new();
        agg.ingest(&sample(1, 0, 20.0, 1500.0));

        let mut bad = sample(2, 0, 0.0, 0.0);
        bad.sensor_error = true;

        // The error sample rotates day 1 out even though it contributes
        // nothing itself.
        let summary = agg.ingest(&bad).unwrap();
        assert_eq!(summary.date.day, 1);
        let current = agg.in_progress().unwrap();
        assert_eq!(current.date().day, 2);
        assert_eq!(current.valid_samples(), 0);
    }

    #[test]
    fn single_sample_day() {
        let mut agg = Aggregator::new();
        agg.ingest(&sample(1, 0, 21.0, 1800.0));
        let summary = agg.ingest(&sample(2, 0, 20.0, 1500.0)).unwrap();
        assert_eq!(summary.valid_samples, 1);
        assert_eq!(summary.min_temperature, 21.0);
        assert_eq!(summary.max_temperature, 21.0);
        assert_eq!(summary.avg_temperature, 21.0);
    }
}
