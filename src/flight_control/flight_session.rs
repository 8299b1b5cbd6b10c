use super::command::{DroneCommand, MovementDirection};
use super::common::vec2d::Vec2D;
use super::fault::{Recovered, SimFault};
use super::sensor_status::SensorStatus;
use super::signal::TerminationReason;
use super::telemetry::TelemetryFrame;
use crate::logger::EventSink;
use crate::policy::{AdaptivePolicy, CommandPolicy, FixedPatternPolicy};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;

/// Ceiling the altitude clamp enforces at all times.
pub const MAX_ALTITUDE: f64 = 8.0;
/// Altitude above which a RED (or recently RED) status is crash-causing.
pub const SAFE_ALTITUDE: f64 = 2.0;
/// Iterations of conservative flying after a RED reading.
pub const RED_COOLDOWN_RESET: u32 = 5;
/// Battery drain multiplier for harsh conditions.
const HARSH_DRAIN_FACTOR: f64 = 1.5;
/// Wind and dust readings never leave the [`ENV_FLOOR`], [`ENV_CEILING`] band.
pub const ENV_FLOOR: f64 = 40.0;
pub const ENV_CEILING: f64 = 100.0;
/// A per-iteration dust or wind jump above this counts as a hostile trend.
pub const TREND_LIMIT: f64 = 10.0;
/// Below this battery level the adaptive policy enters power saving.
pub const BATTERY_LOW: f64 = 50.0;
/// Below this battery level the adaptive policy forces a landing.
pub const BATTERY_CRITICAL: f64 = 20.0;
/// Below this battery level any commanded movement is predicted to crash.
pub const BATTERY_MIN_FLIGHT: f64 = 15.0;
/// Altitude cap while power saving. Numerically equal to [`SAFE_ALTITUDE`]
/// today, but a separate knob.
pub const POWER_SAVE_CEILING: f64 = 2.0;

/// Immutable per-session configuration, supplied at construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Iteration cap; values below 1 are lifted to 1.
    pub max_iterations: u32,
    /// `true` selects the fixed-pattern policy, `false` the adaptive one.
    pub use_fixed_pattern: bool,
    /// Delay between loop iterations. A pacing nicety; zero is valid.
    pub pacing: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_iterations: 100, use_fixed_pattern: true, pacing: Duration::from_millis(50) }
    }
}

/// Final metrics of a completed session.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub iterations: u32,
    pub total_distance: f64,
    pub flight_duration_s: f64,
    pub termination: TerminationReason,
    pub peak_wind: f64,
    pub peak_dust: f64,
}

/// A single drone's flight session.
///
/// Owns position, battery, environmental history and cooldown state, and
/// sequences telemetry generation, crash prediction and command decision in
/// [`FlightSession::run`]. Every stochastic draw goes through the injected
/// generator, every log line through the injected sink.
pub struct FlightSession<R: Rng = StdRng> {
    session_id: String,
    pos: Vec2D<f64>,
    battery: f64,
    iterations: u32,
    total_distance: f64,
    red_cooldown: u32,
    previous_status: SensorStatus,
    previous_dust: f64,
    previous_wind: f64,
    telemetry_history: Vec<TelemetryFrame>,
    start_time: DateTime<Utc>,
    config: SessionConfig,
    sink: Box<dyn EventSink>,
    rng: R,
}

impl FlightSession<StdRng> {
    pub fn new(config: SessionConfig, sink: Box<dyn EventSink>) -> Self {
        Self::with_rng(config, sink, StdRng::from_os_rng())
    }
}

impl<R: Rng> FlightSession<R> {
    pub fn with_rng(config: SessionConfig, sink: Box<dyn EventSink>, mut rng: R) -> Self {
        let session_id = format!("{:08x}", rng.random::<u32>());
        Self {
            session_id,
            pos: Vec2D::zero(),
            battery: 100.0,
            iterations: 0,
            total_distance: 0.0,
            red_cooldown: 0,
            previous_status: SensorStatus::Green,
            previous_dust: 0.0,
            previous_wind: 0.0,
            telemetry_history: Vec::new(),
            start_time: Utc::now(),
            config: SessionConfig { max_iterations: config.max_iterations.max(1), ..config },
            sink,
            rng,
        }
    }

    pub fn altitude(&self) -> f64 { self.pos.y() }

    pub fn battery(&self) -> f64 { self.battery }

    pub fn iterations(&self) -> u32 { self.iterations }

    pub fn red_cooldown(&self) -> u32 { self.red_cooldown }

    pub fn previous_status(&self) -> SensorStatus { self.previous_status }

    pub fn previous_dust(&self) -> f64 { self.previous_dust }

    pub fn previous_wind(&self) -> f64 { self.previous_wind }

    pub fn telemetry_history(&self) -> &[TelemetryFrame] { &self.telemetry_history }

    pub(crate) fn sink(&self) -> &dyn EventSink { self.sink.as_ref() }

    pub(crate) fn rng_mut(&mut self) -> &mut R { &mut self.rng }

    /// Arms the conservative-flight countdown after a RED reading.
    pub(crate) fn arm_red_cooldown(&mut self) { self.red_cooldown = RED_COOLDOWN_RESET; }

    /// Ticks the countdown toward zero.
    pub(crate) fn relax_red_cooldown(&mut self) {
        self.red_cooldown = self.red_cooldown.saturating_sub(1);
    }

    /// Records the readings the next decision computes its trends against.
    pub(crate) fn note_environment(&mut self, frame: &TelemetryFrame) {
        self.previous_status = frame.sensor_status;
        self.previous_dust = frame.dust_level;
        self.previous_wind = frame.wind_speed;
    }

    /// Produces one telemetry reading from `command` and the current state,
    /// mutating position, battery and history along the way.
    ///
    /// Never fails: a fault inside the step rolls position and battery back
    /// to their pre-step values and substitutes a frozen RED frame, which is
    /// not recorded in the history.
    pub fn generate_telemetry(&mut self, command: &DroneCommand) -> Recovered<TelemetryFrame> {
        self.iterations += 1;
        let checkpoint = (self.pos, self.battery, self.total_distance);
        match self.telemetry_step(command) {
            Ok(frame) => {
                self.telemetry_history.push(frame.clone());
                Recovered::Nominal(frame)
            }
            Err(fault) => {
                (self.pos, self.battery, self.total_distance) = checkpoint;
                self.sink.error(&format!("Error generating telemetry: {fault}"));
                Recovered::Fallback(
                    TelemetryFrame::frozen(self.pos.x(), self.pos.y(), self.battery),
                    fault,
                )
            }
        }
    }

    fn telemetry_step(&mut self, command: &DroneCommand) -> Result<TelemetryFrame, SimFault> {
        let mut speed = command.speed;
        if speed.is_nan() || speed < 0.0 {
            self.sink.error(&format!("Invalid speed: {speed}"));
            speed = 0.0;
        }
        let mut climb = command.climb;
        if climb.is_nan() {
            self.sink.error(&format!("Invalid altitude delta: {climb}"));
            climb = 0.0;
        }

        if command.movement == MovementDirection::Forward && speed > 0.0 {
            self.pos = self.pos + Vec2D::new(speed, 0.0);
            self.total_distance += speed;
        }
        self.pos = Vec2D::new(self.pos.x(), (self.pos.y() + climb).clamp(0.0, MAX_ALTITUDE));
        self.sink.debug(&format!("Updated position: {}", self.pos));

        let drain = HARSH_DRAIN_FACTOR
            * (speed / 5.0 + 0.5 * self.pos.y() / 8.0 + self.rng.random_range(0.1..=0.5));
        self.battery = (self.battery - drain).max(0.0);

        // Wind first; the dust walk is driven by the new wind reading.
        let wind_speed = (self.previous_wind
            + self.rng.random_range(-20.0..=20.0) * (1.0 + speed / 5.0))
            .clamp(ENV_FLOOR, ENV_CEILING);
        let dust_level = (self.previous_dust
            + self.rng.random_range(-30.0..=30.0) * (1.0 + wind_speed / 50.0))
            .clamp(ENV_FLOOR, ENV_CEILING);
        let sensor_status = SensorStatus::from_readings(dust_level, wind_speed);

        let gyroscope = [
            self.rng.random_range(-0.5..=0.5),
            self.rng.random_range(-0.5..=0.5),
            self.rng.random_range(-0.5..=0.5),
        ];

        let frame = TelemetryFrame {
            x_position: self.pos.x(),
            y_position: self.pos.y(),
            battery: self.battery,
            gyroscope,
            wind_speed,
            dust_level,
            sensor_status,
        };
        let audited = [
            frame.x_position,
            frame.y_position,
            frame.battery,
            frame.wind_speed,
            frame.dust_level,
        ];
        if !audited.iter().all(|value| value.is_finite()) {
            return Err(SimFault::NonFiniteTelemetry);
        }
        self.sink.debug(&format!("Generated telemetry: {frame}"));
        Ok(frame)
    }

    /// Forward-looking check whether `command` would crash the drone given
    /// the most recent telemetry. Deterministic; draws no randomness.
    pub fn predict_crash(&self, command: &DroneCommand, frame: &TelemetryFrame) -> bool {
        match self.crash_assessment(command, frame) {
            Ok(crash) => crash,
            Err(fault) => {
                self.sink.error(&format!("Error predicting crash: {fault}"));
                true
            }
        }
    }

    fn crash_assessment(
        &self,
        command: &DroneCommand,
        frame: &TelemetryFrame,
    ) -> Result<bool, SimFault> {
        let predicted_altitude = (self.pos.y() + command.climb).clamp(0.0, MAX_ALTITUDE);
        if !predicted_altitude.is_finite() {
            return Err(SimFault::NonFinitePrediction);
        }
        let red_context = frame.sensor_status == SensorStatus::Red
            || self.previous_status == SensorStatus::Red
            || self.red_cooldown > 0;
        if predicted_altitude > SAFE_ALTITUDE && red_context {
            self.sink.warn("Crash predicted: unsafe altitude with RED status");
            return Ok(true);
        }
        // Unreachable after the clamp; kept as a hard backstop.
        if predicted_altitude > MAX_ALTITUDE {
            self.sink.warn(&format!(
                "Crash predicted: altitude {predicted_altitude} exceeds max {MAX_ALTITUDE}"
            ));
            return Ok(true);
        }
        if frame.battery < BATTERY_MIN_FLIGHT && command.speed > 0.0 {
            self.sink.warn("Crash predicted: low battery with movement");
            return Ok(true);
        }
        Ok(false)
    }

    /// Runs the session to completion. Never returns an error; every fault
    /// folds into the conservative path and the loop reports whatever it
    /// accumulated.
    pub async fn run(&mut self) -> SessionSummary {
        self.sink.info(&format!("Connected with ID: {}", self.session_id));
        let policy: Box<dyn CommandPolicy<R>> = if self.config.use_fixed_pattern {
            Box::new(FixedPatternPolicy)
        } else {
            Box::new(AdaptivePolicy)
        };
        self.sink.info(&format!("Deciding commands via {}", policy.type_name()));
        let mut command = DroneCommand::initial();
        self.sink.info(&format!("Sending initial command: {command}"));

        let mut termination = TerminationReason::Exhausted;
        while self.battery > 0.0 && self.iterations < self.config.max_iterations {
            if !self.config.pacing.is_zero() {
                tokio::time::sleep(self.config.pacing).await;
            }
            let frame = self.generate_telemetry(&command).into_inner();
            self.sink.info(&format!(
                "Telemetry: {frame}, Metrics: iterations={}, total_distance={:.2}",
                self.iterations, self.total_distance
            ));

            if !frame.y_position.is_finite() || !frame.battery.is_finite() {
                // Unreachable while generate_telemetry rolls back on fault.
                self.sink.error("Error in control loop: corrupt frame escaped recovery");
                termination = TerminationReason::Aborted;
                break;
            }

            if frame.y_position > SAFE_ALTITUDE
                && (frame.sensor_status == SensorStatus::Red
                    || self.previous_status == SensorStatus::Red)
            {
                self.sink.error(&format!(
                    "Drone crashed: unsafe altitude with RED sensor status. \
                     Maximum safe altitude is {SAFE_ALTITUDE}. Final telemetry: {frame}"
                ));
                termination = TerminationReason::Crashed;
                break;
            }

            command = policy.next_command(self, &frame).into_inner();
            if policy.needs_safety_gate() {
                if self.predict_crash(&command, &frame) {
                    self.sink.warn("Crash predicted: forcing safe command");
                    command = DroneCommand::landing(self.pos.y());
                }
                self.sink.info(&format!("Pattern command: {command}"));
            }
        }
        self.summarize(termination)
    }

    #[allow(clippy::cast_precision_loss)]
    fn summarize(&self, termination: TerminationReason) -> SessionSummary {
        let flight_duration_s = (Utc::now() - self.start_time).num_milliseconds() as f64 / 1000.0;
        let peak_wind = self
            .telemetry_history
            .iter()
            .map(|frame| frame.wind_speed)
            .minmax()
            .into_option()
            .map_or(0.0, |(_, max)| max);
        let peak_dust = self
            .telemetry_history
            .iter()
            .map(|frame| frame.dust_level)
            .minmax()
            .into_option()
            .map_or(0.0, |(_, max)| max);

        self.sink.info(&format!(
            "Final metrics: iterations={}, total_distance={:.2}",
            self.iterations, self.total_distance
        ));
        self.sink.info(&format!("Commands sent: {}", self.iterations));
        self.sink.info(&format!("Flight duration: {flight_duration_s:.2}s"));
        self.sink.info(&format!("Maximum distance traveled: {:.2} units", self.total_distance));

        SessionSummary {
            session_id: self.session_id.clone(),
            iterations: self.iterations,
            total_distance: self.total_distance,
            flight_duration_s,
            termination,
            peak_wind,
            peak_dust,
        }
    }
}

#[cfg(test)]
impl<R: Rng> FlightSession<R> {
    pub(crate) fn set_battery(&mut self, battery: f64) { self.battery = battery; }

    pub(crate) fn set_altitude(&mut self, altitude: f64) {
        self.pos = Vec2D::new(self.pos.x(), altitude);
    }

    pub(crate) fn set_previous_status(&mut self, status: SensorStatus) {
        self.previous_status = status;
    }

    pub(crate) fn set_red_cooldown(&mut self, ticks: u32) { self.red_cooldown = ticks; }

    pub(crate) fn set_previous_readings(&mut self, dust: f64, wind: f64) {
        self.previous_dust = dust;
        self.previous_wind = wind;
    }
}
