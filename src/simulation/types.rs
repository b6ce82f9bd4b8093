//! Core types for the cruise control simulation

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Error};

/// Road the ego vehicle is driving on. Selects speed limits and the lead
/// vehicle's baseline speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoadCategory {
    #[default]
    Highway,
    City,
}

/// Which control policy drives the ego vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrivingMode {
    /// Adaptive cruise control follows the lead vehicle
    Automatic,
    /// Pedal commands only, with idle drag between them
    #[default]
    Manual,
}

/// Classification of the last computed acceleration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionState {
    Accelerating,
    Braking,
    #[default]
    Stable,
}

/// Output of the safety monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SafetyStatus {
    #[default]
    Safe,
    Danger,
}

/// One recorded telemetry point. Never modified after it is recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    /// Simulated time in milliseconds
    pub timestamp: u64,
    pub speed: f64,
    pub distance: f64,
    pub acceleration: f64,
}

impl fmt::Display for RoadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoadCategory::Highway => write!(f, "highway"),
            RoadCategory::City => write!(f, "city"),
        }
    }
}

impl FromStr for RoadCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "highway" => Ok(RoadCategory::Highway),
            "city" => Ok(RoadCategory::City),
            other => bail!("unknown road category '{}' (expected highway or city)", other),
        }
    }
}

impl fmt::Display for DrivingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrivingMode::Automatic => write!(f, "ACC"),
            DrivingMode::Manual => write!(f, "Manual"),
        }
    }
}

impl FromStr for DrivingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "acc" | "auto" | "automatic" => Ok(DrivingMode::Automatic),
            "manual" => Ok(DrivingMode::Manual),
            other => bail!("unknown driving mode '{}' (expected acc or manual)", other),
        }
    }
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionState::Accelerating => write!(f, "Accelerating"),
            MotionState::Braking => write!(f, "Braking"),
            MotionState::Stable => write!(f, "Stable"),
        }
    }
}

impl fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyStatus::Safe => write!(f, "Safe"),
            SafetyStatus::Danger => write!(f, "Danger"),
        }
    }
}
