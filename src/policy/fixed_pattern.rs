use super::CommandPolicy;
use crate::flight_control::{
    DroneCommand, FlightSession, MovementDirection, Recovered, TelemetryFrame,
};
use rand::Rng;

/// Climb/descend pattern that holds the drone around a RED-safe altitude at
/// constant speed, blind to sensors and environment. Relies on the session
/// loop for crash gating.
pub struct FixedPatternPolicy;

impl FixedPatternPolicy {
    const CRUISE_SPEED: f64 = 4.0;
    /// First climb out of the initial ground position.
    const INITIAL_CLIMB: f64 = 5.0;

    /// Pure function of the recorded history length: empty climbs to the
    /// cruise band, odd steps descend by one, even steps climb by one.
    pub fn pattern_command(history: &[TelemetryFrame]) -> DroneCommand {
        let climb = if history.is_empty() {
            Self::INITIAL_CLIMB
        } else if history.len() % 2 != 0 {
            -1.0
        } else {
            1.0
        };
        DroneCommand { speed: Self::CRUISE_SPEED, climb, movement: MovementDirection::Forward }
    }
}

impl<R: Rng> CommandPolicy<R> for FixedPatternPolicy {
    fn type_name(&self) -> &'static str { "FixedPatternPolicy" }

    fn needs_safety_gate(&self) -> bool { true }

    fn next_command(
        &self,
        session: &mut FlightSession<R>,
        _frame: &TelemetryFrame,
    ) -> Recovered<DroneCommand> {
        Recovered::Nominal(Self::pattern_command(session.telemetry_history()))
    }
}
