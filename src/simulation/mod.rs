//! Adaptive cruise control simulation core
//!
//! Advances a single ego vehicle behind a synthetic lead vehicle in fixed
//! 100ms ticks. Nothing in here renders, blocks, or touches the network.

mod command;
mod control;
mod driver;
mod fuel;
mod gap;
mod lead;
mod params;
mod safety;
mod state;
mod telemetry;
mod types;
mod world;

pub use command::{Command, ScheduledCommand};
pub use control::{
    classify_motion, compute_control, ControlInput, ControlOutput, COAST_DECAY, HARD_BRAKE_FACTOR,
    IDLE_DRAG, KD_VELOCITY, KP_DISTANCE, KP_SPEED, MOTION_DEADBAND,
};
pub use driver::{SharedSim, SimDriver};
pub use fuel::{burn, consumption, ACCEL_FACTOR, BASE_CONSUMPTION, SPEED_FACTOR};
pub use gap::{advance_gap, kmh_to_mps, GapUpdate};
pub use lead::{is_braking_event, lead_speed, LEAD_MIN_SPEED};
pub use params::{
    lead_base_speed, max_speed, ACC_ACCELERATION, ACC_BRAKING, CRITICAL_DISTANCE,
    DEFAULT_DISTANCE, FUEL_CAPACITY, HISTORY_CAPACITY, LEAD_BASE_SPEED_CITY,
    LEAD_BASE_SPEED_HIGHWAY, MANUAL_ACCELERATION, MANUAL_BRAKING, MAX_DISTANCE, MAX_SPEED_CITY,
    MAX_SPEED_HIGHWAY, MIN_DISTANCE, SAFE_DISTANCE, TICK_MILLIS, TICK_SECS,
};
pub use safety::{assess, time_to_collision, MIN_CLOSING_SPEED};
pub use state::{Alert, SimState, DISTANCE_ALERT_THRESHOLD, LOW_FUEL_THRESHOLD, REFUEL_THRESHOLD};
pub use telemetry::TelemetryHistory;
pub use types::{DrivingMode, MotionState, RoadCategory, SafetyStatus, TelemetrySample};
pub use world::{advance, AccSim, Step};
