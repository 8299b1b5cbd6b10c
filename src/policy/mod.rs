//! The two interchangeable command-decision policies. The session loop
//! consults exactly one implementation per session, chosen at construction.

mod adaptive;
mod fixed_pattern;

pub use adaptive::AdaptivePolicy;
pub use fixed_pattern::FixedPatternPolicy;

use crate::flight_control::{DroneCommand, FlightSession, Recovered, TelemetryFrame};
use rand::Rng;

pub trait CommandPolicy<R: Rng> {
    fn type_name(&self) -> &'static str;

    /// `true` when the session loop must run the decided command through the
    /// crash predictor itself; policies that gate internally return `false`.
    fn needs_safety_gate(&self) -> bool { false }

    /// Decides the next command from the latest telemetry. Never fails; a
    /// fault substitutes the landing command.
    fn next_command(
        &self,
        session: &mut FlightSession<R>,
        frame: &TelemetryFrame,
    ) -> Recovered<DroneCommand>;
}

#[cfg(test)]
mod tests;
