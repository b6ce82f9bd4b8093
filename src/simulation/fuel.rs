//! Fuel consumption model
//!
//! Fuel only ever goes down here. The tank is refilled by a reset.

/// Consumed every moving tick, even while braking (percent)
pub const BASE_CONSUMPTION: f64 = 0.002;
/// Consumption per km/h of speed
pub const SPEED_FACTOR: f64 = 1.0 / 1000.0;
/// Consumption per unit of positive acceleration
pub const ACCEL_FACTOR: f64 = 0.05;

/// Fuel burned this tick. Zero while standing still without throttle.
pub fn consumption(speed: f64, acceleration: f64) -> f64 {
    if speed <= 0.0 && acceleration <= 0.0 {
        return 0.0;
    }

    let accel_term = if acceleration > 0.0 {
        acceleration * ACCEL_FACTOR
    } else {
        0.0
    };
    BASE_CONSUMPTION + speed * SPEED_FACTOR + accel_term
}

/// Fuel level after one tick at the given speed and acceleration
pub fn burn(fuel: f64, speed: f64, acceleration: f64) -> f64 {
    (fuel - consumption(speed, acceleration)).max(0.0)
}
