//! Simulation step and command handlers
//!
//! `AccSim` owns the state between ticks. Each tick derives the next state
//! from the previous one and commits it with a single assignment. Commands
//! arrive between ticks and are guard-checked; a rejected command changes
//! nothing and reports `false`.

use log::{debug, info, warn};

use super::control::{compute_control, ControlInput};
use super::fuel;
use super::gap::advance_gap;
use super::lead::lead_speed;
use super::params::{lead_base_speed, max_speed, MANUAL_ACCELERATION, MANUAL_BRAKING, TICK_MILLIS};
use super::safety;
use super::state::SimState;
use super::types::{DrivingMode, MotionState, RoadCategory, SafetyStatus, TelemetrySample};

/// The simulation: state plus the simulated clock driving the lead vehicle
#[derive(Debug, Clone)]
pub struct AccSim {
    state: SimState,
    /// Simulated time in milliseconds
    time_ms: u64,
}

impl Default for AccSim {
    fn default() -> Self {
        Self::new()
    }
}

impl AccSim {
    pub fn new() -> Self {
        Self::from_state_at(SimState::new(), 0)
    }

    /// Start the clock at `start_ms` instead of zero
    pub fn with_start_time(start_ms: u64) -> Self {
        Self::from_state_at(SimState::new(), start_ms)
    }

    /// Resume from an arbitrary state
    pub fn from_state(state: SimState) -> Self {
        Self::from_state_at(state, 0)
    }

    pub fn from_state_at(state: SimState, start_ms: u64) -> Self {
        Self {
            state,
            time_ms: start_ms,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Owned copy of the whole state for readers on another schedule
    pub fn snapshot(&self) -> SimState {
        self.state.clone()
    }

    pub fn time_ms(&self) -> u64 {
        self.time_ms
    }

    /// Run one fixed-duration step
    ///
    /// Does nothing while paused or after an emergency stop, and returns
    /// whether the step ran.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }

        let Some(time_ms) = self.time_ms.checked_add(TICK_MILLIS) else {
            warn!("Simulated clock exhausted at {}ms, not ticking", self.time_ms);
            return false;
        };
        self.time_ms = time_ms;

        let was_fueled = self.state.fuel > 0.0;
        let was_safe = self.state.safety == SafetyStatus::Safe;

        // The previous state is consumed so its history is reused in place
        let step = advance(std::mem::take(&mut self.state), time_ms);
        let next = &step.state;

        if was_fueled && next.fuel <= 0.0 {
            info!("Fuel exhausted at {:.1} km/h, coasting to a stop", next.speed);
        }
        if was_safe && next.safety == SafetyStatus::Danger {
            warn!(
                "Collision risk: gap {:.1} m, closing at {:.1} km/h",
                next.distance,
                -step.speed_diff_kmh
            );
        }
        debug!(
            "t={}ms speed={:.2} gap={:.2} fuel={:.3} lead={:.2}",
            time_ms, next.speed, next.distance, next.fuel, next.lead_speed
        );

        self.state = step.state;
        true
    }

    /// Switch control policy. Rejected while paused or in an emergency.
    pub fn set_mode(&mut self, mode: DrivingMode) -> bool {
        if self.state.emergency || self.state.paused {
            debug!("Ignoring mode change to {}: emergency or paused", mode);
            return false;
        }
        if self.state.mode != mode {
            info!("Driving mode: {} -> {}", self.state.mode, mode);
        }
        self.state.mode = mode;
        true
    }

    /// Freeze or resume the periodic step. Rejected in an emergency.
    pub fn toggle_pause(&mut self) -> bool {
        if self.state.emergency {
            debug!("Ignoring pause toggle: emergency active");
            return false;
        }
        self.state.paused = !self.state.paused;
        info!("Simulation {}", if self.state.paused { "paused" } else { "resumed" });
        true
    }

    fn pedals_available(&self) -> bool {
        self.state.mode == DrivingMode::Manual && !self.state.emergency && !self.state.paused
    }

    /// Manual throttle: one step of MANUAL_ACCELERATION, capped at the road's
    /// limit. Requires manual mode, fuel, and a running simulation.
    pub fn accelerate(&mut self) -> bool {
        if !self.pedals_available() || self.state.fuel <= 0.0 {
            debug!("Ignoring accelerate: pedals unavailable or tank empty");
            return false;
        }
        let limit = max_speed(self.state.road);
        self.state.speed = (self.state.speed + MANUAL_ACCELERATION).min(limit);
        self.state.motion_state = MotionState::Accelerating;
        true
    }

    /// Manual brake: one step of MANUAL_BRAKING, never below zero.
    /// Requires manual mode and a running simulation.
    pub fn brake(&mut self) -> bool {
        if !self.pedals_available() {
            debug!("Ignoring brake: pedals unavailable");
            return false;
        }
        self.state.speed = (self.state.speed - MANUAL_BRAKING).max(0.0);
        self.state.motion_state = MotionState::Braking;
        true
    }

    /// Change road and reseed the lead vehicle to the new baseline at once
    pub fn set_road_category(&mut self, road: RoadCategory) -> bool {
        if self.state.road != road {
            info!("Road category: {} -> {}", self.state.road, road);
        }
        self.state.road = road;
        self.state.lead_speed = lead_base_speed(road);
        true
    }

    /// Latch an emergency stop. Only a reset clears it.
    pub fn emergency(&mut self) -> bool {
        warn!("Emergency stop at {:.1} km/h", self.state.speed);
        self.state.emergency = true;
        self.state.mode = DrivingMode::Manual;
        self.state.speed = 0.0;
        self.state.motion_state = MotionState::Braking;
        self.state.safety = SafetyStatus::Danger;
        true
    }

    /// Restore every default, including history and the lead vehicle seed.
    /// The clock keeps running so timestamps stay increasing.
    pub fn reset(&mut self) -> bool {
        info!("Simulation reset");
        self.state = SimState::new();
        true
    }

    /// One-line status
    pub fn summary(&self) -> String {
        let s = &self.state;
        format!(
            "t={:.1}s | {} on {} | speed {:.1} km/h | gap {:.1} m | lead {:.1} km/h | fuel {:.2}% | {} | {}{}{}",
            self.time_ms as f64 / 1000.0,
            s.mode,
            s.road,
            s.speed,
            s.distance,
            s.lead_speed,
            s.fuel,
            s.motion_state,
            s.safety,
            if s.paused { " | PAUSED" } else { "" },
            if s.emergency { " | EMERGENCY" } else { "" },
        )
    }

    /// Print a summary of the simulation state
    pub fn print_summary(&self) {
        let s = &self.state;
        println!("=== ACC Simulation Summary ===");
        println!("{}", self.summary());
        println!(
            "Target speed: {:.0} km/h, samples recorded: {}",
            s.target_speed(),
            s.history.len()
        );
        if let (Some(min_gap), Some(peak)) = (s.history.min_distance(), s.history.peak_speed()) {
            println!("Window: closest gap {:.1} m, peak speed {:.1} km/h", min_gap, peak);
        }
        for alert in s.alerts() {
            println!("  ! {}", alert.message());
        }
    }
}

/// Outcome of one simulation step
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: SimState,
    /// Lead speed minus ego speed that the controller and the safety monitor
    /// both evaluated this tick (km/h)
    pub speed_diff_kmh: f64,
}

/// Derive the state one tick later at simulated time `time_ms`
///
/// Takes the previous state by value and records into its history, so a
/// tick never copies the telemetry window.
/// Order matters: lead vehicle, gap, control, fuel, safety, telemetry.
pub fn advance(prev: SimState, time_ms: u64) -> Step {
    let lead = lead_speed(prev.road, time_ms);
    let gap = advance_gap(prev.distance, lead, prev.speed);

    let control = compute_control(&ControlInput {
        mode: prev.mode,
        road: prev.road,
        fuel: prev.fuel,
        speed: prev.speed,
        distance: gap.distance,
        speed_diff_kmh: gap.speed_diff_kmh,
    });

    let fuel = fuel::burn(prev.fuel, control.speed, control.acceleration);
    let safety = safety::assess(gap.distance, gap.speed_diff_kmh);

    let mut history = prev.history;
    history.record(TelemetrySample {
        timestamp: time_ms,
        speed: control.speed,
        distance: gap.distance,
        acceleration: control.acceleration,
    });

    Step {
        state: SimState {
            speed: control.speed,
            distance: gap.distance,
            fuel,
            lead_speed: lead,
            motion_state: control.motion_state,
            safety,
            history,
            mode: prev.mode,
            emergency: prev.emergency,
            paused: prev.paused,
            road: prev.road,
        },
        speed_diff_kmh: gap.speed_diff_kmh,
    }
}
