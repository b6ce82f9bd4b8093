//! Collision-risk monitor

use super::gap::kmh_to_mps;
use super::params::CRITICAL_DISTANCE;
use super::types::SafetyStatus;

/// Closing speed used when the vehicles are not closing at all (m/s)
pub const MIN_CLOSING_SPEED: f64 = 0.1;

/// Closing faster than this (km/h) at moderate range is dangerous
pub const RAPID_CLOSING_KMH: f64 = -10.0;
/// Range considered moderate for the rapid-closing check (meters)
pub const RAPID_CLOSING_RANGE: f64 = 40.0;

/// Predicted impact sooner than this (seconds) is dangerous
pub const MIN_TIME_TO_COLLISION: f64 = 2.0;

/// Seconds until the gap closes at the current relative speed
///
/// Always finite: a zero relative speed falls back to MIN_CLOSING_SPEED.
pub fn time_to_collision(distance: f64, speed_diff_kmh: f64) -> f64 {
    let closing = kmh_to_mps(speed_diff_kmh.abs());
    let closing = if closing == 0.0 {
        MIN_CLOSING_SPEED
    } else {
        closing
    };
    distance / closing
}

/// Classify the tick. Any one trigger is enough.
pub fn assess(distance: f64, speed_diff_kmh: f64) -> SafetyStatus {
    let too_close = distance < CRITICAL_DISTANCE;
    let closing_fast = speed_diff_kmh < RAPID_CLOSING_KMH && distance < RAPID_CLOSING_RANGE;
    let impact_soon = time_to_collision(distance, speed_diff_kmh) < MIN_TIME_TO_COLLISION;

    if too_close || closing_fast || impact_soon {
        SafetyStatus::Danger
    } else {
        SafetyStatus::Safe
    }
}
