//! Control law for the ego vehicle
//!
//! Three policies, selected once per tick:
//! - fuel exhausted: coast down regardless of mode
//! - automatic: hard brake below the critical gap, otherwise a PD follow law
//!   capped by a speed-limit governor
//! - manual: idle drag only (pedal commands act between ticks)

use super::params::{max_speed, ACC_ACCELERATION, ACC_BRAKING, CRITICAL_DISTANCE, SAFE_DISTANCE};
use super::types::{DrivingMode, MotionState, RoadCategory};

/// Speed lost per tick when the tank is empty (km/h)
pub const COAST_DECAY: f64 = 0.3;

/// Speed lost per tick to drag in manual mode (km/h)
pub const IDLE_DRAG: f64 = 0.15;

/// Hard-brake multiplier applied to ACC_BRAKING below the critical gap
pub const HARD_BRAKE_FACTOR: f64 = 4.0;

/// Gain on the gap error
pub const KP_DISTANCE: f64 = 0.03;
/// Gain on the relative velocity
pub const KD_VELOCITY: f64 = 0.07;
/// Gain on the distance to the speed limit
pub const KP_SPEED: f64 = 0.1;

/// Accelerations within this band are reported as Stable
pub const MOTION_DEADBAND: f64 = 0.08;

/// Everything the control law reads for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlInput {
    pub mode: DrivingMode,
    pub road: RoadCategory,
    pub fuel: f64,
    /// Ego speed before this tick
    pub speed: f64,
    /// Gap after this tick's distance update
    pub distance: f64,
    /// Lead speed minus ego speed, as computed by the gap update
    pub speed_diff_kmh: f64,
}

/// Command produced by the control law
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlOutput {
    pub acceleration: f64,
    /// Ego speed after applying the command
    pub speed: f64,
    pub motion_state: MotionState,
}

/// Evaluate the control law for one tick
pub fn compute_control(input: &ControlInput) -> ControlOutput {
    if input.fuel <= 0.0 {
        let speed = (input.speed - COAST_DECAY).max(0.0);
        let motion_state = if speed > 0.0 {
            MotionState::Braking
        } else {
            MotionState::Stable
        };
        return ControlOutput {
            acceleration: 0.0,
            speed,
            motion_state,
        };
    }

    let (acceleration, motion_state) = match input.mode {
        DrivingMode::Automatic => follow_law(input),
        DrivingMode::Manual => {
            let drag = if input.speed > 0.0 { -IDLE_DRAG } else { 0.0 };
            (drag, MotionState::Stable)
        }
    };

    ControlOutput {
        acceleration,
        speed: (input.speed + acceleration).max(0.0),
        motion_state,
    }
}

/// Automatic mode: hard floor below the critical gap, PD law otherwise
fn follow_law(input: &ControlInput) -> (f64, MotionState) {
    if input.distance < CRITICAL_DISTANCE {
        return (-ACC_BRAKING * HARD_BRAKE_FACTOR, MotionState::Braking);
    }

    let dist_error = input.distance - SAFE_DISTANCE;
    let accel_from_distance = dist_error * KP_DISTANCE + input.speed_diff_kmh * KD_VELOCITY;
    let accel_from_speed_limit = (max_speed(input.road) - input.speed) * KP_SPEED;

    // Never faster than either constraint allows
    let acceleration = accel_from_distance
        .min(accel_from_speed_limit)
        .clamp(-ACC_BRAKING, ACC_ACCELERATION);

    (acceleration, classify_motion(acceleration))
}

/// Map an acceleration onto the displayed motion state
pub fn classify_motion(acceleration: f64) -> MotionState {
    if acceleration > MOTION_DEADBAND {
        MotionState::Accelerating
    } else if acceleration < -MOTION_DEADBAND {
        MotionState::Braking
    } else {
        MotionState::Stable
    }
}
