//! The mutable simulation aggregate
//!
//! One value holds everything a reader may look at. The orchestrator builds
//! the next value in full and swaps it in, so readers never see a tick that
//! is only partly applied.

use super::params::{lead_base_speed, max_speed, DEFAULT_DISTANCE, FUEL_CAPACITY};
use super::telemetry::TelemetryHistory;
use super::types::{DrivingMode, MotionState, RoadCategory, SafetyStatus};

/// Fuel below this is reported as needing a refuel (percent)
pub const REFUEL_THRESHOLD: f64 = 5.0;
/// Fuel below this is reported as low (percent)
pub const LOW_FUEL_THRESHOLD: f64 = 20.0;
/// Gaps below this are flagged on the dashboard (meters)
pub const DISTANCE_ALERT_THRESHOLD: f64 = 25.0;

/// Dashboard warning derived from the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    EmergencyActive,
    RefuelNeeded,
    LowFuel,
    DistanceDanger,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::EmergencyActive => "Emergency Mode Active",
            Alert::RefuelNeeded => "Refuel Needed",
            Alert::LowFuel => "Low Fuel",
            Alert::DistanceDanger => "Distance Danger",
        }
    }
}

/// Full simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    /// Ego speed (km/h)
    pub speed: f64,
    /// Gap to the lead vehicle (meters)
    pub distance: f64,
    /// Fuel level (percent)
    pub fuel: f64,
    pub mode: DrivingMode,
    /// Emergency stop latched; cleared only by a reset
    pub emergency: bool,
    pub paused: bool,
    pub road: RoadCategory,
    /// Lead vehicle speed from the last tick (km/h)
    pub lead_speed: f64,
    pub motion_state: MotionState,
    pub safety: SafetyStatus,
    pub history: TelemetryHistory,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimState {
    /// State at process start
    pub fn new() -> Self {
        let road = RoadCategory::default();
        Self {
            speed: 0.0,
            distance: DEFAULT_DISTANCE,
            fuel: FUEL_CAPACITY,
            mode: DrivingMode::Manual,
            emergency: false,
            paused: false,
            road,
            lead_speed: lead_base_speed(road),
            motion_state: MotionState::Stable,
            safety: SafetyStatus::Safe,
            history: TelemetryHistory::new(),
        }
    }

    /// Speed limit of the current road, which is also the cruise target
    pub fn target_speed(&self) -> f64 {
        max_speed(self.road)
    }

    /// Whether the periodic step should run at all
    pub fn is_running(&self) -> bool {
        !self.paused && !self.emergency
    }

    /// Warnings for the dashboard, most severe first
    pub fn alerts(&self) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if self.emergency {
            alerts.push(Alert::EmergencyActive);
        }
        if self.fuel < REFUEL_THRESHOLD {
            alerts.push(Alert::RefuelNeeded);
        } else if self.fuel < LOW_FUEL_THRESHOLD {
            alerts.push(Alert::LowFuel);
        }
        if self.distance < DISTANCE_ALERT_THRESHOLD {
            alerts.push(Alert::DistanceDanger);
        }
        alerts
    }
}
