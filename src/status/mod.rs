//! Plant condition and growth phase classification.

pub mod evaluator;

pub use evaluator::ConditionEvaluator;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{RgbColor, WebColors};
use serde::{Deserialize, Serialize};

/// The single current plant-care status.
///
/// Exactly one condition is current at any time; the evaluator retains the
/// previous value as its hysteresis anchor so the status does not oscillate
/// around the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantCondition {
    /// Soil at or above the dry threshold.
    SoilDry,
    /// Soil at or below the wet threshold.
    SoilWet,
    /// Dry for the configured number of consecutive days.
    NeedsWatering,
    /// Moisture fell back below the wet threshold after a dry spell.
    WateringCompleted,
    /// Latest temperature at or above the configured high limit.
    TempTooHigh,
    /// Latest temperature at or below the configured low limit.
    TempTooLow,
    /// No usable latest sample.
    Error,
    /// Nothing evaluated yet.
    Unknown,
}

impl PlantCondition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SoilDry => "soil dry",
            Self::SoilWet => "soil wet",
            Self::NeedsWatering => "needs watering",
            Self::WateringCompleted => "watering completed",
            Self::TempTooHigh => "temperature too high",
            Self::TempTooLow => "temperature too low",
            Self::Error => "sensor error",
            Self::Unknown => "unknown",
        }
    }

    /// Fixed mapping onto the status LED, one color per analysis cycle.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::SoilDry => Rgb565::CSS_ORANGE,
            Self::SoilWet => Rgb565::CSS_BLUE,
            Self::NeedsWatering => Rgb565::CSS_PURPLE,
            Self::WateringCompleted => Rgb565::CSS_GREEN,
            Self::TempTooHigh => Rgb565::CSS_RED,
            Self::TempTooLow => Rgb565::CSS_CYAN,
            Self::Error => Rgb565::CSS_WHITE,
            Self::Unknown => Rgb565::BLACK,
        }
    }
}

/// Growth phase derived from the recent daily temperature aggregates.
///
/// Classified independently of the soil condition; the two outputs are
/// orthogonal axes of the same status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthPhase {
    Unknown,
    HighTempDormancy,
    LowTempDormancy,
    ActivePeriod,
}

impl GrowthPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::HighTempDormancy => "high-temperature dormancy",
            Self::LowTempDormancy => "low-temperature dormancy",
            Self::ActivePeriod => "active period",
        }
    }
}

/// Combined result of one analysis cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantStatus {
    pub condition: PlantCondition,
    pub growth_phase: GrowthPhase,
}
