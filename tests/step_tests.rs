//! Simulation step validation
//!
//! Checks the per-tick pipeline: lead vehicle, gap, control law, fuel,
//! safety and telemetry, plus the invariants that must hold after any tick.

use acc_sim::simulation::{
    advance, advance_gap, assess, burn, compute_control, consumption, is_braking_event, lead_speed,
    max_speed, time_to_collision, AccSim, ControlInput, DrivingMode, MotionState, RoadCategory, SafetyStatus,
    SimState, ACC_ACCELERATION, ACC_BRAKING, CRITICAL_DISTANCE, DEFAULT_DISTANCE, FUEL_CAPACITY,
    HARD_BRAKE_FACTOR, HISTORY_CAPACITY, LEAD_BASE_SPEED_HIGHWAY, LEAD_MIN_SPEED, MAX_DISTANCE,
    MAX_SPEED_HIGHWAY, MIN_DISTANCE, SAFE_DISTANCE, TICK_MILLIS,
};
use approx::assert_abs_diff_eq;

fn automatic(distance: f64, speed: f64, speed_diff_kmh: f64) -> ControlInput {
    ControlInput {
        mode: DrivingMode::Automatic,
        road: RoadCategory::Highway,
        fuel: FUEL_CAPACITY,
        speed,
        distance,
        speed_diff_kmh,
    }
}

fn assert_within_road_limit(state: &SimState) {
    assert!(
        state.speed <= max_speed(state.road) + 1e-9,
        "speed {} above the {} limit",
        state.speed,
        state.road
    );
}

fn assert_invariants(state: &SimState) {
    assert!(state.speed >= 0.0, "negative speed {}", state.speed);
    assert!(
        (MIN_DISTANCE..=MAX_DISTANCE).contains(&state.distance),
        "gap out of range: {}",
        state.distance
    );
    assert!(
        (0.0..=FUEL_CAPACITY).contains(&state.fuel),
        "fuel out of range: {}",
        state.fuel
    );
    assert!(state.history.len() <= HISTORY_CAPACITY);
}

#[test]
fn test_startup_tick() {
    let mut sim = AccSim::new();
    assert_eq!(sim.state().speed, 0.0);
    assert_eq!(sim.state().distance, DEFAULT_DISTANCE);
    assert_eq!(sim.state().fuel, FUEL_CAPACITY);
    assert_eq!(sim.state().mode, DrivingMode::Manual);
    assert_eq!(sim.state().road, RoadCategory::Highway);
    assert_eq!(sim.state().lead_speed, LEAD_BASE_SPEED_HIGHWAY);

    assert!(sim.tick());

    let lead = lead_speed(RoadCategory::Highway, TICK_MILLIS);
    let state = sim.state();
    assert_eq!(sim.time_ms(), TICK_MILLIS);
    assert_abs_diff_eq!(state.lead_speed, lead, epsilon = 1e-12);
    assert_abs_diff_eq!(state.distance, DEFAULT_DISTANCE + lead / 3.6 * 0.1, epsilon = 1e-9);
    assert_eq!(state.speed, 0.0);
    assert_eq!(state.fuel, FUEL_CAPACITY);
    assert_eq!(state.motion_state, MotionState::Stable);
    assert_eq!(state.safety, SafetyStatus::Safe);

    let sample = state.history.latest().expect("one sample recorded");
    assert_eq!(sample.timestamp, TICK_MILLIS);
    assert_eq!(sample.acceleration, 0.0);
}

#[test]
fn test_fuel_exhaustion_coasts_down() {
    let state = SimState {
        fuel: 0.0,
        speed: 40.0,
        mode: DrivingMode::Automatic,
        ..SimState::new()
    };
    let mut sim = AccSim::from_state(state);

    sim.tick();

    assert_abs_diff_eq!(sim.state().speed, 39.7, epsilon = 1e-9);
    assert_eq!(sim.state().motion_state, MotionState::Braking);
    assert_eq!(sim.state().fuel, 0.0);
    assert_eq!(sim.state().history.latest().map(|s| s.acceleration), Some(0.0));
}

#[test]
fn test_fuel_exhaustion_settles_at_standstill() {
    let state = SimState {
        fuel: 0.0,
        speed: 0.2,
        ..SimState::new()
    };
    let mut sim = AccSim::from_state(state);

    sim.tick();
    assert_eq!(sim.state().speed, 0.0);
    assert_eq!(sim.state().motion_state, MotionState::Stable);
}

#[test]
fn test_hard_brake_overrides_follow_law() {
    // Even with the lead pulling away fast, the hard floor wins
    for speed_diff in [-40.0, 0.0, 80.0] {
        let out = compute_control(&automatic(CRITICAL_DISTANCE - 2.0, 60.0, speed_diff));
        assert_eq!(out.acceleration, -ACC_BRAKING * HARD_BRAKE_FACTOR);
        assert_eq!(out.motion_state, MotionState::Braking);
        assert_abs_diff_eq!(out.speed, 57.0, epsilon = 1e-9);
    }
}

#[test]
fn test_follow_law_at_safe_distance_uses_speed_limit_term() {
    // Distance term is zero, so the limit term decides
    let below_limit = compute_control(&automatic(SAFE_DISTANCE, 100.0, 0.0));
    assert_eq!(below_limit.acceleration, 0.0);
    assert_eq!(below_limit.motion_state, MotionState::Stable);

    let over_limit = compute_control(&automatic(SAFE_DISTANCE, 125.0, 0.0));
    assert_abs_diff_eq!(over_limit.acceleration, -0.5, epsilon = 1e-9);
    assert_eq!(over_limit.motion_state, MotionState::Braking);

    let far_over_limit = compute_control(&automatic(SAFE_DISTANCE, 140.0, 0.0));
    assert_eq!(far_over_limit.acceleration, -ACC_BRAKING);
}

#[test]
fn test_follow_law_saturates_acceleration() {
    let out = compute_control(&automatic(100.0, 0.0, 0.0));
    assert_eq!(out.acceleration, ACC_ACCELERATION);
    assert_eq!(out.motion_state, MotionState::Accelerating);
    assert_abs_diff_eq!(out.speed, ACC_ACCELERATION, epsilon = 1e-12);
}

#[test]
fn test_follow_law_deadband() {
    // 2 m past the setpoint with the lead slightly slower: 0.06 - 0.007
    let out = compute_control(&automatic(SAFE_DISTANCE + 2.0, 50.0, -0.1));
    assert_abs_diff_eq!(out.acceleration, 0.053, epsilon = 1e-9);
    assert_eq!(out.motion_state, MotionState::Stable);
}

#[test]
fn test_manual_idle_drag() {
    let state = SimState {
        speed: 10.0,
        ..SimState::new()
    };
    let mut sim = AccSim::from_state(state);
    sim.tick();

    assert_abs_diff_eq!(sim.state().speed, 9.85, epsilon = 1e-9);
    assert_eq!(sim.state().motion_state, MotionState::Stable);
    assert_abs_diff_eq!(sim.state().fuel, 100.0 - (0.002 + 9.85 / 1000.0), epsilon = 1e-12);
}

#[test]
fn test_fuel_consumption() {
    assert_eq!(consumption(0.0, 0.0), 0.0);
    assert_eq!(consumption(0.0, -0.15), 0.0);
    assert_abs_diff_eq!(consumption(100.0, 0.45), 0.1245, epsilon = 1e-12);
    // Braking still burns the base amount plus the speed term
    assert_abs_diff_eq!(consumption(50.0, -0.75), 0.052, epsilon = 1e-12);
    // Throttle from standstill burns fuel
    assert_abs_diff_eq!(consumption(0.0, 0.4), 0.022, epsilon = 1e-12);

    assert_eq!(burn(0.01, 100.0, 0.0), 0.0);
}

#[test]
fn test_time_to_collision_division_guard() {
    assert_abs_diff_eq!(time_to_collision(100.0, 0.0), 1000.0, epsilon = 1e-9);
    assert_eq!(assess(100.0, 0.0), SafetyStatus::Safe);
}

#[test]
fn test_safety_triggers() {
    // Too close, regardless of relative speed
    assert_eq!(assess(CRITICAL_DISTANCE - 1.0, 0.0), SafetyStatus::Danger);
    // Closing fast at moderate range
    assert_eq!(assess(39.0, -11.0), SafetyStatus::Danger);
    assert_eq!(assess(41.0, -11.0), SafetyStatus::Safe);
    // Impact predicted within two seconds
    assert_eq!(assess(50.0, -100.0), SafetyStatus::Danger);
    // Time-to-collision uses the magnitude of the relative speed
    assert_eq!(assess(50.0, 100.0), SafetyStatus::Danger);
}

#[test]
fn test_lead_vehicle_profile() {
    assert_eq!(lead_speed(RoadCategory::Highway, 0), LEAD_BASE_SPEED_HIGHWAY);
    assert!(!is_braking_event(0));

    // Around t = 6000*pi ms both signals sit at their extremes
    let t = 18_850;
    assert!(is_braking_event(t));
    assert_abs_diff_eq!(lead_speed(RoadCategory::Highway, t), 55.0, epsilon = 1e-3);
    assert_eq!(lead_speed(RoadCategory::City, t), LEAD_MIN_SPEED);

    for t in (0..200_000).step_by(250) {
        assert!(lead_speed(RoadCategory::City, t) >= LEAD_MIN_SPEED);
        assert_eq!(lead_speed(RoadCategory::City, t), lead_speed(RoadCategory::City, t));
    }
}

#[test]
fn test_gap_clamped() {
    let closing = advance_gap(0.6, 0.0, 100.0);
    assert_eq!(closing.distance, MIN_DISTANCE);
    assert_eq!(closing.speed_diff_kmh, -100.0);

    let opening = advance_gap(199.9, 120.0, 0.0);
    assert_eq!(opening.distance, MAX_DISTANCE);
}

#[test]
fn test_advance_is_pure() {
    let state = SimState {
        speed: 70.0,
        mode: DrivingMode::Automatic,
        ..SimState::new()
    };
    let first = advance(state.clone(), 5_000);
    let second = advance(state.clone(), 5_000);
    assert_eq!(first, second);
    assert_eq!(state.history.len(), 0);
    assert_eq!(first.state.history.len(), 1);
}

#[test]
fn test_advance_reports_shared_speed_difference() {
    let state = SimState {
        speed: 150.0,
        distance: 30.0,
        mode: DrivingMode::Automatic,
        ..SimState::new()
    };
    let step = advance(state, 5_000);

    let expected = lead_speed(RoadCategory::Highway, 5_000) - 150.0;
    assert_eq!(step.speed_diff_kmh, expected);
    // The ego vehicle is closing on the lead
    assert!(step.speed_diff_kmh < 0.0);
    assert_eq!(
        step.state.safety,
        assess(step.state.distance, step.speed_diff_kmh)
    );
    assert_eq!(step.state.safety, SafetyStatus::Danger);
}

#[test]
fn test_advance_records_into_full_history() {
    let mut sim = AccSim::new();
    for _ in 0..HISTORY_CAPACITY {
        sim.tick();
    }
    let full = sim.snapshot();
    assert_eq!(full.history.len(), HISTORY_CAPACITY);

    let next_time = sim.time_ms() + TICK_MILLIS;
    let step = advance(full, next_time);
    let history = &step.state.history;
    assert_eq!(history.len(), HISTORY_CAPACITY);
    assert_eq!(history.oldest().map(|s| s.timestamp), Some(2 * TICK_MILLIS));
    assert_eq!(history.latest().map(|s| s.timestamp), Some(next_time));
}

#[test]
fn test_clock_exhaustion_stops_ticking() {
    let mut sim = AccSim::with_start_time(u64::MAX - 50);
    let before = sim.snapshot();

    assert!(!sim.tick());
    assert_eq!(sim.time_ms(), u64::MAX - 50);
    assert_eq!(sim.snapshot(), before);

    // The last representable tick still runs
    let mut sim = AccSim::with_start_time(u64::MAX - TICK_MILLIS);
    assert!(sim.tick());
    assert_eq!(sim.time_ms(), u64::MAX);
    assert!(!sim.tick());
    assert_eq!(sim.state().history.len(), 1);
}

#[test]
fn test_invariants_hold_under_automatic_control() {
    let mut sim = AccSim::new();
    assert!(sim.set_mode(DrivingMode::Automatic));

    let switch_tick = 400;
    let mut last_fuel = sim.state().fuel;
    for i in 0..3_000 {
        if i == switch_tick {
            sim.set_road_category(RoadCategory::City);
        }
        sim.tick();
        assert_invariants(sim.state());
        assert!(sim.state().fuel <= last_fuel, "fuel increased on tick {}", i);
        last_fuel = sim.state().fuel;

        // The governor sheds the excess speed geometrically after the switch
        if i < switch_tick || i >= switch_tick + 400 {
            assert_within_road_limit(sim.state());
        }
    }
    assert!(sim.state().fuel < FUEL_CAPACITY);
}

#[test]
fn test_governor_converges_after_road_change() {
    let mut sim = AccSim::from_state(SimState {
        speed: MAX_SPEED_HIGHWAY,
        distance: MAX_DISTANCE,
        mode: DrivingMode::Automatic,
        ..SimState::new()
    });
    sim.set_road_category(RoadCategory::City);

    // Linear at ACC_BRAKING down to 57.5 km/h, then geometric towards 50
    for _ in 0..400 {
        sim.tick();
    }
    assert_within_road_limit(sim.state());
    assert!(sim.state().fuel > 0.0);
}

#[test]
fn test_invariants_hold_under_manual_pedals() {
    let mut sim = AccSim::with_start_time(1_700_000_000_000);

    let mut last_fuel = sim.state().fuel;
    for i in 0..2_000 {
        if i % 3 == 0 {
            sim.accelerate();
        }
        if i % 11 == 0 {
            sim.brake();
        }
        sim.tick();
        assert_invariants(sim.state());
        assert!(sim.state().fuel <= last_fuel);
        last_fuel = sim.state().fuel;
    }
}

#[test]
fn test_history_is_bounded_ring_buffer() {
    let mut sim = AccSim::new();
    for _ in 0..150 {
        sim.tick();
    }

    let history = &sim.state().history;
    assert_eq!(history.len(), HISTORY_CAPACITY);

    // Ticks 51..=150 are retained, 1..=50 were evicted
    let oldest = history.oldest().expect("history is full");
    assert_eq!(oldest.timestamp, 51 * TICK_MILLIS);
    assert!(oldest.timestamp > 50 * TICK_MILLIS);
    assert_eq!(history.latest().map(|s| s.timestamp), Some(150 * TICK_MILLIS));

    let timestamps: Vec<u64> = history.iter().map(|s| s.timestamp).collect();
    assert!(timestamps.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_history_window_statistics() {
    let mut sim = AccSim::new();
    assert!(sim.state().history.min_distance().is_none());

    for _ in 0..20 {
        sim.accelerate();
        sim.tick();
    }

    let history = &sim.state().history;
    let min_gap = history.min_distance().expect("samples recorded");
    let peak = history.peak_speed().expect("samples recorded");
    assert!(history.iter().all(|s| s.distance >= min_gap));
    assert!(history.iter().all(|s| s.speed <= peak));
    assert_eq!(history.latest().map(|s| s.speed), Some(peak));
}
