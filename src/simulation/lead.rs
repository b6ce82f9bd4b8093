//! Synthetic speed profile of the vehicle ahead
//!
//! The lead vehicle oscillates smoothly around the road's baseline speed and
//! periodically brakes hard, which is what exercises the follow controller.

use super::params::lead_base_speed;
use super::types::RoadCategory;

/// The lead vehicle never drops below this speed (km/h)
pub const LEAD_MIN_SPEED: f64 = 15.0;

/// Period divisor for the smooth oscillation (ms)
const NOISE_PERIOD_MS: f64 = 4000.0;
const NOISE_AMPLITUDE: f64 = 10.0;

/// Period divisor for the braking events (ms)
const SPIKE_PERIOD_MS: f64 = 12000.0;
const SPIKE_THRESHOLD: f64 = 0.85;
const SPIKE_DROP: f64 = -25.0;

/// Lead vehicle speed at simulated time `time_ms`
///
/// Pure function of its inputs, so tests can drive it with any clock value.
pub fn lead_speed(road: RoadCategory, time_ms: u64) -> f64 {
    let t = time_ms as f64;
    let noise = (t / NOISE_PERIOD_MS).sin() * NOISE_AMPLITUDE;
    let spike = if is_braking_event(time_ms) { SPIKE_DROP } else { 0.0 };
    (lead_base_speed(road) + noise + spike).max(LEAD_MIN_SPEED)
}

/// Whether the lead vehicle is in one of its hard-braking windows
pub fn is_braking_event(time_ms: u64) -> bool {
    (time_ms as f64 / SPIKE_PERIOD_MS).sin() > SPIKE_THRESHOLD
}
