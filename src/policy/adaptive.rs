use super::CommandPolicy;
use crate::flight_control::{
    BATTERY_CRITICAL, BATTERY_LOW, DroneCommand, FlightSession, MovementDirection,
    POWER_SAVE_CEILING, Recovered, SAFE_ALTITUDE, SensorStatus, SimFault, TREND_LIMIT,
    TelemetryFrame,
};
use rand::Rng;

/// Reacts to sensor status, environmental trends and battery level, and
/// vetoes its own output through the crash predictor before handing it back.
pub struct AdaptivePolicy;

impl AdaptivePolicy {
    fn assemble<R: Rng>(
        &self,
        session: &mut FlightSession<R>,
        frame: &TelemetryFrame,
    ) -> Result<DroneCommand, SimFault> {
        if !(frame.dust_level.is_finite()
            && frame.wind_speed.is_finite()
            && frame.battery.is_finite())
        {
            return Err(SimFault::CorruptTelemetry);
        }

        let mut command = DroneCommand {
            speed: session.rng_mut().random_range(3.0..=7.0),
            climb: session.rng_mut().random_range(-2.0..=2.0),
            movement: MovementDirection::Forward,
        };

        let dust_trend = frame.dust_level - session.previous_dust();
        let wind_trend = frame.wind_speed - session.previous_wind();
        session.sink().info(&format!(
            "Environmental trends: dust_trend={dust_trend:.2}, wind_trend={wind_trend:.2}"
        ));

        let altitude = session.altitude();
        let red_now = frame.sensor_status == SensorStatus::Red;
        if red_now {
            command = DroneCommand::landing(altitude);
            session.arm_red_cooldown();
            session.sink().info("Sensor status RED: forcing landing");
        } else if frame.sensor_status == SensorStatus::Yellow {
            command.speed = 3.0;
            command.climb = command.climb.min(SAFE_ALTITUDE - altitude);
            session.relax_red_cooldown();
            session.sink().info("Sensor status YELLOW: reducing altitude and speed");
        } else if session.red_cooldown() > 0 {
            command.speed = 3.0;
            command.climb = command.climb.min(SAFE_ALTITUDE - altitude);
            session.sink().info(&format!(
                "RED cooldown active ({} iterations remaining)",
                session.red_cooldown()
            ));
            session.relax_red_cooldown();
        } else {
            command.climb = session.rng_mut().random_range(-2.0..=2.0);
        }

        if !red_now && (dust_trend > TREND_LIMIT || wind_trend > TREND_LIMIT) {
            command.speed = command.speed.min(3.0);
            command.climb = command.climb.min(SAFE_ALTITUDE - altitude);
            session.sink().info("High environmental trend detected: reducing speed and altitude");
        }

        if frame.battery < BATTERY_LOW {
            command.speed = command.speed.min(3.0);
            command.climb = command.climb.min(POWER_SAVE_CEILING - altitude);
            session.sink().info("Low battery (<50%): entering power-saving mode");
        }
        if frame.battery < BATTERY_CRITICAL {
            command = DroneCommand::landing(altitude);
            session.sink().info("Critical battery (<20%): forcing landing");
        }

        if session.predict_crash(&command, frame) {
            session.sink().warn("Crash predicted: forcing safe command");
            command = DroneCommand::landing(altitude);
        }

        session.note_environment(frame);
        session.sink().info(&format!("Sending command: {command}"));
        Ok(command)
    }
}

impl<R: Rng> CommandPolicy<R> for AdaptivePolicy {
    fn type_name(&self) -> &'static str { "AdaptivePolicy" }

    fn next_command(
        &self,
        session: &mut FlightSession<R>,
        frame: &TelemetryFrame,
    ) -> Recovered<DroneCommand> {
        match self.assemble(session, frame) {
            Ok(command) => Recovered::Nominal(command),
            Err(fault) => {
                session.sink().error(&format!("Error deciding command: {fault}"));
                Recovered::Fallback(DroneCommand::landing(session.altitude()), fault)
            }
        }
    }
}
