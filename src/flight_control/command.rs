use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, Serialize, Deserialize)]
pub enum MovementDirection {
    #[strum(serialize = "fwd")]
    #[serde(rename = "fwd")]
    Forward,
    #[strum(serialize = "hold")]
    #[serde(rename = "hold")]
    Hold,
}

/// One motion command, produced each iteration and consumed immediately by
/// the telemetry generator. `climb` is a signed altitude delta.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct DroneCommand {
    pub speed: f64,
    pub climb: f64,
    pub movement: MovementDirection,
}

impl DroneCommand {
    /// The command the session enters its loop with.
    pub fn initial() -> Self {
        Self { speed: 5.0, climb: 0.0, movement: MovementDirection::Forward }
    }

    /// Halt and descend to the ground from `altitude`.
    pub fn landing(altitude: f64) -> Self {
        Self { speed: 0.0, climb: -altitude, movement: MovementDirection::Forward }
    }
}

impl fmt::Display for DroneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "speed {:.2} climb {:+.2} {}", self.speed, self.climb, self.movement)
    }
}
