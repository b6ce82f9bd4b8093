//! Tunable constants for the cruise control simulation
//!
//! These are process-wide and never change at runtime.

use super::types::RoadCategory;

/// Speed limits per road category (km/h)
pub const MAX_SPEED_HIGHWAY: f64 = 120.0;
pub const MAX_SPEED_CITY: f64 = 50.0;

/// Controller setpoint for the following gap (meters)
pub const SAFE_DISTANCE: f64 = 45.0;
/// Gap below which automatic mode brakes as hard as it can (meters)
pub const CRITICAL_DISTANCE: f64 = 12.0;

/// Saturation limits for the automatic controller (km/h per tick)
pub const ACC_ACCELERATION: f64 = 0.45;
pub const ACC_BRAKING: f64 = 0.75;

/// Speed change applied by one manual pedal command (km/h)
pub const MANUAL_ACCELERATION: f64 = 1.4;
pub const MANUAL_BRAKING: f64 = 2.5;

/// Baseline speed of the simulated lead vehicle (km/h)
pub const LEAD_BASE_SPEED_HIGHWAY: f64 = 90.0;
pub const LEAD_BASE_SPEED_CITY: f64 = 40.0;

/// Fixed tick duration
pub const TICK_MILLIS: u64 = 100;
pub const TICK_SECS: f64 = 0.1;

/// Bounds for the following gap (meters)
pub const MIN_DISTANCE: f64 = 0.5;
pub const MAX_DISTANCE: f64 = 200.0;

/// Full tank, in percent
pub const FUEL_CAPACITY: f64 = 100.0;

/// Starting gap to the lead vehicle (meters)
pub const DEFAULT_DISTANCE: f64 = 130.0;

/// Number of telemetry samples kept for display
pub const HISTORY_CAPACITY: usize = 100;

/// Upper speed bound for the given road category
pub fn max_speed(road: RoadCategory) -> f64 {
    match road {
        RoadCategory::Highway => MAX_SPEED_HIGHWAY,
        RoadCategory::City => MAX_SPEED_CITY,
    }
}

/// Baseline lead-vehicle speed for the given road category
pub fn lead_base_speed(road: RoadCategory) -> f64 {
    match road {
        RoadCategory::Highway => LEAD_BASE_SPEED_HIGHWAY,
        RoadCategory::City => LEAD_BASE_SPEED_CITY,
    }
}
