#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod flight_control;
mod logger;
mod policy;

use crate::flight_control::{FlightSession, SessionConfig};
use crate::logger::{ConsoleSink, EventSink};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::{env, time::Duration};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = config_from_env();
    let console = ConsoleSink;
    console.info(&format!(
        "Starting flight session: max_iterations={}, fixed_pattern={}",
        config.max_iterations, config.use_fixed_pattern
    ));

    let sink = Box::new(ConsoleSink);
    let summary = match env::var("TALON_SEED").ok().and_then(|v| v.parse::<u64>().ok()) {
        Some(seed) => {
            FlightSession::with_rng(config, sink, StdRng::seed_from_u64(seed)).run().await
        }
        None => FlightSession::new(config, sink).run().await,
    };

    console.info(&format!(
        "Session summary: {}",
        serde_json::to_string(&summary).unwrap_or_default()
    ));
}

/// Unparseable or missing values degrade to the defaults; the driver never
/// aborts over configuration.
fn config_from_env() -> SessionConfig {
    let defaults = SessionConfig::default();
    let max_iterations = env::var("TALON_MAX_ITERATIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.max_iterations);
    let use_fixed_pattern = env::var("TALON_POLICY")
        .map_or(defaults.use_fixed_pattern, |v| !v.eq_ignore_ascii_case("adaptive"));
    let pacing = env::var("TALON_PACING_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map_or(defaults.pacing, Duration::from_millis);
    SessionConfig { max_iterations, use_fixed_pattern, pacing }
}
