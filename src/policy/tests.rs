use super::{AdaptivePolicy, CommandPolicy, FixedPatternPolicy};
use crate::flight_control::{
    FlightSession, MovementDirection, POWER_SAVE_CEILING, RED_COOLDOWN_RESET, SAFE_ALTITUDE,
    SensorStatus, SessionConfig, TelemetryFrame,
};
use crate::logger::SilentSink;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

fn test_session(seed: u64) -> FlightSession<StdRng> {
    let config = SessionConfig { pacing: Duration::ZERO, ..SessionConfig::default() };
    FlightSession::with_rng(config, Box::new(SilentSink), StdRng::seed_from_u64(seed))
}

fn frame(battery: f64, dust: f64, wind: f64) -> TelemetryFrame {
    TelemetryFrame {
        x_position: 0.0,
        y_position: 0.0,
        battery,
        gyroscope: [0.0; 3],
        wind_speed: wind,
        dust_level: dust,
        sensor_status: SensorStatus::from_readings(dust, wind),
    }
}

#[test]
fn red_status_forces_landing_and_arms_cooldown() {
    let mut session = test_session(31);
    session.set_altitude(1.5);
    let telemetry = frame(90.0, 85.0, 45.0);
    let command = AdaptivePolicy.next_command(&mut session, &telemetry).into_inner();
    assert_eq!(command.speed, 0.0);
    assert_eq!(command.climb, -1.5);
    assert_eq!(command.movement, MovementDirection::Forward);
    assert_eq!(session.red_cooldown(), RED_COOLDOWN_RESET);
}

#[test]
fn adaptive_decision_records_the_consumed_readings() {
    let mut session = test_session(32);
    let telemetry = frame(90.0, 55.0, 58.0);
    AdaptivePolicy.next_command(&mut session, &telemetry);
    assert_eq!(session.previous_status(), SensorStatus::Green);
    assert_eq!(session.previous_dust(), 55.0);
    assert_eq!(session.previous_wind(), 58.0);
}

#[test]
fn yellow_status_caps_speed_and_climb() {
    let mut session = test_session(33);
    session.set_altitude(1.0);
    session.set_red_cooldown(3);
    session.set_previous_readings(60.0, 60.0);
    let telemetry = frame(90.0, 65.0, 45.0);
    let command = AdaptivePolicy.next_command(&mut session, &telemetry).into_inner();
    assert_eq!(command.speed, 3.0);
    assert!(command.climb <= SAFE_ALTITUDE - 1.0);
    assert_eq!(session.red_cooldown(), 2);
}

#[test]
fn red_cooldown_keeps_flying_conservative_on_green() {
    let mut session = test_session(34);
    session.set_red_cooldown(2);
    session.set_previous_readings(50.0, 50.0);
    let telemetry = frame(90.0, 50.0, 50.0);
    let command = AdaptivePolicy.next_command(&mut session, &telemetry).into_inner();
    assert_eq!(command.speed, 3.0);
    assert!(command.climb <= SAFE_ALTITUDE);
    assert_eq!(session.red_cooldown(), 1);
}

#[test]
fn hostile_trend_reduces_speed_and_altitude() {
    let mut session = test_session(35);
    session.set_altitude(1.0);
    session.set_previous_readings(40.0, 40.0);
    // GREEN frame, but the dust reading jumped by 15 since the last one.
    let telemetry = frame(90.0, 55.0, 45.0);
    let command = AdaptivePolicy.next_command(&mut session, &telemetry).into_inner();
    assert!(command.speed <= 3.0);
    assert!(command.climb <= SAFE_ALTITUDE - 1.0);
}

#[test]
fn low_battery_enters_power_saving() {
    let mut session = test_session(36);
    session.set_altitude(1.5);
    session.set_previous_readings(50.0, 50.0);
    let telemetry = frame(45.0, 50.0, 50.0);
    let command = AdaptivePolicy.next_command(&mut session, &telemetry).into_inner();
    assert!(command.speed <= 3.0);
    assert!(command.climb <= POWER_SAVE_CEILING - 1.5);
}

#[test]
fn critical_battery_forces_landing_despite_green_sensors() {
    let mut session = test_session(37);
    session.set_altitude(1.5);
    session.set_previous_readings(50.0, 50.0);
    let telemetry = frame(18.0, 50.0, 50.0);
    let command = AdaptivePolicy.next_command(&mut session, &telemetry).into_inner();
    assert_eq!(command.speed, 0.0);
    assert_eq!(command.climb, -1.5);
}

#[test]
fn predictor_veto_overrides_the_assembled_command() {
    let mut session = test_session(38);
    // High up with a RED reading one iteration ago: whatever the baseline
    // draw was, the predicted altitude stays above the safe ceiling.
    session.set_altitude(4.5);
    session.set_previous_status(SensorStatus::Red);
    session.set_previous_readings(50.0, 50.0);
    let telemetry = frame(90.0, 50.0, 50.0);
    let command = AdaptivePolicy.next_command(&mut session, &telemetry).into_inner();
    assert_eq!(command.speed, 0.0);
    assert_eq!(command.climb, -4.5);
}

#[test]
fn corrupt_frame_returns_landing_without_recording() {
    let mut session = test_session(39);
    session.set_altitude(2.0);
    session.set_previous_readings(44.0, 46.0);
    let mut telemetry = frame(90.0, 50.0, 50.0);
    telemetry.dust_level = f64::NAN;
    let decision = AdaptivePolicy.next_command(&mut session, &telemetry);
    assert!(decision.is_fallback());
    let command = decision.into_inner();
    assert_eq!(command.speed, 0.0);
    assert_eq!(command.climb, -2.0);
    assert_eq!(session.previous_dust(), 44.0);
    assert_eq!(session.previous_wind(), 46.0);
}

#[test]
fn pattern_command_is_a_pure_function_of_history_length() {
    let empty: Vec<TelemetryFrame> = Vec::new();
    let first = FixedPatternPolicy::pattern_command(&empty);
    assert_eq!(first.climb, 5.0);
    assert_eq!(first.speed, 4.0);
    assert_eq!(first.movement, MovementDirection::Forward);

    let one = vec![frame(90.0, 50.0, 50.0)];
    assert_eq!(FixedPatternPolicy::pattern_command(&one).climb, -1.0);

    let two = vec![frame(90.0, 50.0, 50.0), frame(90.0, 50.0, 50.0)];
    assert_eq!(FixedPatternPolicy::pattern_command(&two).climb, 1.0);

    // Replayable: same history, same command.
    assert_eq!(
        FixedPatternPolicy::pattern_command(&two),
        FixedPatternPolicy::pattern_command(&two)
    );
}

#[test]
fn fixed_pattern_ignores_sensor_state() {
    let mut session = test_session(40);
    let calm = frame(90.0, 45.0, 45.0);
    let hostile = frame(5.0, 95.0, 95.0);
    let a = FixedPatternPolicy.next_command(&mut session, &calm).into_inner();
    let b = FixedPatternPolicy.next_command(&mut session, &hostile).into_inner();
    assert_eq!(a, b);
    assert!(<FixedPatternPolicy as CommandPolicy<StdRng>>::needs_safety_gate(&FixedPatternPolicy));
}
