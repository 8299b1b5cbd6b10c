//! The telemetry-generation / crash-prediction / command-decision state
//! machine. One [`FlightSession`] owns all mutable flight state and runs one
//! loop to completion.

mod command;
pub(crate) mod common;
mod fault;
mod flight_session;
mod sensor_status;
mod signal;
mod telemetry;

pub use command::{DroneCommand, MovementDirection};
pub use fault::{Recovered, SimFault};
pub use flight_session::{
    BATTERY_CRITICAL, BATTERY_LOW, BATTERY_MIN_FLIGHT, ENV_CEILING, ENV_FLOOR, FlightSession,
    MAX_ALTITUDE, POWER_SAVE_CEILING, RED_COOLDOWN_RESET, SAFE_ALTITUDE, SessionConfig,
    SessionSummary, TREND_LIMIT,
};
pub use sensor_status::SensorStatus;
pub use signal::TerminationReason;
pub use telemetry::TelemetryFrame;
