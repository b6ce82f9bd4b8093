//! Following-gap integration between the ego and the lead vehicle

use super::params::{MAX_DISTANCE, MIN_DISTANCE, TICK_SECS};

const KMH_PER_MPS: f64 = 3.6;

/// Result of advancing the gap by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapUpdate {
    /// New gap, clamped to [MIN_DISTANCE, MAX_DISTANCE]
    pub distance: f64,
    /// Lead speed minus ego speed (km/h). Positive means the gap is opening.
    ///
    /// Computed once per tick and shared by the controller and the safety
    /// monitor.
    pub speed_diff_kmh: f64,
}

/// Advance the gap by one tick given both vehicles' speeds (km/h)
pub fn advance_gap(distance: f64, lead_speed: f64, ego_speed: f64) -> GapUpdate {
    let speed_diff_kmh = lead_speed - ego_speed;
    let delta_m = kmh_to_mps(speed_diff_kmh) * TICK_SECS;

    GapUpdate {
        distance: (distance + delta_m).clamp(MIN_DISTANCE, MAX_DISTANCE),
        speed_diff_kmh,
    }
}

pub fn kmh_to_mps(kmh: f64) -> f64 {
    kmh / KMH_PER_MPS
}
