use super::sensor_status::SensorStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One synthetic sensor reading. Ephemeral: produced once per iteration and
/// appended to the session history.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub x_position: f64,
    pub y_position: f64,
    pub battery: f64,
    pub gyroscope: [f64; 3],
    pub wind_speed: f64,
    pub dust_level: f64,
    pub sensor_status: SensorStatus,
}

impl TelemetryFrame {
    /// Stand-in for a reading that could not be generated: position and
    /// battery freeze at their last known values, the environment reads as
    /// zero and the status reports RED.
    pub fn frozen(x_position: f64, y_position: f64, battery: f64) -> Self {
        Self {
            x_position,
            y_position,
            battery,
            gyroscope: [0.0; 3],
            wind_speed: 0.0,
            dust_level: 0.0,
            sensor_status: SensorStatus::Red,
        }
    }
}

impl fmt::Display for TelemetryFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X-{}-Y-{}-BAT-{}-GYR-{:?}-WIND-{}-DUST-{}-SENS-{}",
            self.x_position,
            self.y_position,
            self.battery,
            self.gyroscope,
            self.wind_speed,
            self.dust_level,
            self.sensor_status
        )
    }
}
