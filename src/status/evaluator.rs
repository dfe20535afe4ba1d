//! The condition evaluator: a small state machine over the sensor history.

use log::{debug, warn};

use super::{GrowthPhase, PlantCondition, PlantStatus};
use crate::profile::PlantProfile;
use crate::sample::MinuteSample;
use crate::storage::HistoryStore;

/// Number of daily summaries the growth-phase classification looks at.
pub const GROWTH_PHASE_WINDOW_DAYS: usize = 7;

/// Evaluates the plant condition from the latest sample and the recent
/// daily aggregates.
///
/// The previously reported condition is carried as instance state (the
/// hysteresis anchor) rather than a global, so independent evaluator
/// instances cannot interfere with each other.
#[derive(Debug, Default)]
pub struct ConditionEvaluator {
    anchor: Option<PlantCondition>,
}

impl ConditionEvaluator {
    pub fn new() -> Self {
        Self { anchor: None }
    }

    /// The condition reported by the last successful evaluation.
    pub fn last_condition(&self) -> PlantCondition {
        self.anchor.unwrap_or(PlantCondition::Unknown)
    }

    /// Runs one full analysis cycle: soil condition plus growth phase.
    pub fn evaluate(&mut self, history: &HistoryStore, profile: &PlantProfile) -> PlantStatus {
        PlantStatus {
            condition: self.evaluate_soil(history, profile),
            growth_phase: Self::growth_phase(history, profile),
        }
    }

    /// Determines the soil condition and updates the hysteresis anchor.
    ///
    /// A cycle without a usable latest sample reports
    /// [`PlantCondition::Error`] and leaves the anchor untouched, so the
    /// next cycle resumes from the last real condition.
    pub fn evaluate_soil(
        &mut self,
        history: &HistoryStore,
        profile: &PlantProfile,
    ) -> PlantCondition {
        let Some(latest) = history.latest_minute() else {
            warn!("no latest sample, cannot determine soil condition");
            return PlantCondition::Error;
        };
        if latest.sensor_error {
            warn!("latest sample at {} is error-flagged", latest.timestamp);
            return PlantCondition::Error;
        }

        let condition = self.classify(latest, history, profile);
        debug!(
            "soil condition: {} (moisture {:.0} mV, anchor was {})",
            condition.label(),
            latest.soil_moisture_mv,
            self.last_condition().label()
        );
        self.anchor = Some(condition);
        condition
    }

    fn classify(
        &self,
        latest: &MinuteSample,
        history: &HistoryStore,
        profile: &PlantProfile,
    ) -> PlantCondition {
        // Temperature limits trump all soil logic.
        if latest.temperature_c >= profile.temp_high_limit_c {
            return PlantCondition::TempTooHigh;
        }
        if latest.temperature_c <= profile.temp_low_limit_c {
            return PlantCondition::TempTooLow;
        }

        // Watering completion: moisture crossed back down through the wet
        // threshold while a dry condition was standing.
        let was_dry = matches!(
            self.anchor,
            Some(PlantCondition::SoilDry) | Some(PlantCondition::NeedsWatering)
        );
        if was_dry && latest.soil_moisture_mv <= profile.soil_wet_threshold_mv {
            return PlantCondition::WateringCompleted;
        }

        // Consecutive dry days, scanned most-recent backward over the
        // finalized summaries. The run must be unbroken.
        let wanted = usize::from(profile.soil_dry_days_for_watering);
        if wanted > 0 {
            let run = history
                .recent_days(wanted)
                .collect::<alloc::vec::Vec<_>>()
                .into_iter()
                .rev()
                .take_while(|day| day.avg_soil_moisture >= profile.soil_dry_threshold_mv)
                .count();
            if run >= wanted {
                return PlantCondition::NeedsWatering;
            }
        }

        // Plain threshold classification of the live value.
        if latest.soil_moisture_mv >= profile.soil_dry_threshold_mv {
            return PlantCondition::SoilDry;
        }
        if latest.soil_moisture_mv <= profile.soil_wet_threshold_mv {
            return PlantCondition::SoilWet;
        }

        // Between the thresholds with no qualifying run: coast on the
        // previous condition.
        self.last_condition()
    }

    /// Classifies the growth phase from the last week of daily aggregates.
    ///
    /// Stateless: the phase carries no hysteresis and never touches the
    /// soil anchor.
    pub fn growth_phase(history: &HistoryStore, profile: &PlantProfile) -> GrowthPhase {
        let days = history
            .recent_days(GROWTH_PHASE_WINDOW_DAYS)
            .collect::<alloc::vec::Vec<_>>();
        if days.is_empty() {
            debug!("no daily data yet, growth phase unknown");
            return GrowthPhase::Unknown;
        }

        let mut high_temp_days = 0u8;
        let mut longest_active_run = 0u8;
        let mut active_run = 0u8;

        for day in days {
            // One scorching day is enough for high-temperature dormancy.
            if day.max_temperature >= profile.high_temp_dormancy_max_temp {
                return GrowthPhase::HighTempDormancy;
            }
            if day.min_temperature >= profile.high_temp_dormancy_min_temp {
                high_temp_days += 1;
            }

            // One freezing day is enough for low-temperature dormancy.
            if day.min_temperature <= profile.low_temp_dormancy_min_temp {
                return GrowthPhase::LowTempDormancy;
            }

            if day.min_temperature >= profile.active_period_min_temp
                && day.max_temperature <= profile.active_period_max_temp
            {
                active_run += 1;
                longest_active_run = longest_active_run.max(active_run);
            } else {
                active_run = 0;
            }
        }

        if high_temp_days >= profile.high_temp_dormancy_min_temp_days {
            return GrowthPhase::HighTempDormancy;
        }
        if longest_active_run >= profile.active_period_consecutive_days {
            return GrowthPhase::ActivePeriod;
        }

        GrowthPhase::Unknown
    }
}
