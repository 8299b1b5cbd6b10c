use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Three-level hazard classification derived from the dust and wind
/// readings.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SensorStatus {
    Green,
    Yellow,
    Red,
}

impl SensorStatus {
    /// Either reading above this forces RED.
    pub const RED_THRESHOLD: f64 = 80.0;
    /// Either reading above this (and none above `RED_THRESHOLD`) forces
    /// YELLOW.
    pub const CAUTION_THRESHOLD: f64 = 60.0;

    /// First match wins: RED before YELLOW before GREEN.
    pub fn from_readings(dust_level: f64, wind_speed: f64) -> Self {
        if dust_level > Self::RED_THRESHOLD || wind_speed > Self::RED_THRESHOLD {
            SensorStatus::Red
        } else if dust_level > Self::CAUTION_THRESHOLD || wind_speed > Self::CAUTION_THRESHOLD {
            SensorStatus::Yellow
        } else {
            SensorStatus::Green
        }
    }
}
