//! Local weather lookup for the dashboard

use std::fmt;

use anyhow::{bail, Result};
use log::warn;

/// A position on the globe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Used when the host cannot report its location (San Francisco)
pub const DEFAULT_LOCATION: GeoPoint = GeoPoint {
    latitude: 37.7749,
    longitude: -122.4194,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rainy,
}

impl WeatherCondition {
    /// Bucket a WMO weather code
    pub fn from_weather_code(code: u32) -> Self {
        if code < 3 {
            WeatherCondition::Clear
        } else if code < 50 {
            WeatherCondition::Cloudy
        } else {
            WeatherCondition::Rainy
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherCondition::Clear => write!(f, "Clear"),
            WeatherCondition::Cloudy => write!(f, "Cloudy"),
            WeatherCondition::Rainy => write!(f, "Rainy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherData {
    pub temperature_c: f64,
    pub condition: WeatherCondition,
    pub location: String,
}

impl fmt::Display for WeatherData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {:.1}°C | {}",
            self.location,
            self.temperature_c,
            self.condition.to_string().to_uppercase()
        )
    }
}

/// Shown whenever the provider fails
pub fn default_weather() -> WeatherData {
    WeatherData {
        temperature_c: 22.0,
        condition: WeatherCondition::Clear,
        location: "System Default".to_string(),
    }
}

/// Source of current conditions at a location
pub trait WeatherProvider {
    fn current(&self, at: GeoPoint) -> Result<WeatherData>;
}

/// Look up the weather, substituting the default on any failure
pub fn resolve_weather<P: WeatherProvider + ?Sized>(
    provider: &P,
    location: Option<GeoPoint>,
) -> WeatherData {
    let at = location.unwrap_or(DEFAULT_LOCATION);
    match provider.current(at) {
        Ok(weather) => weather,
        Err(err) => {
            warn!("Weather lookup failed, using default: {:#}", err);
            default_weather()
        }
    }
}

/// Provider for hosts without network access. Always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineWeather;

impl WeatherProvider for OfflineWeather {
    fn current(&self, at: GeoPoint) -> Result<WeatherData> {
        bail!(
            "no weather service available for ({:.4}, {:.4})",
            at.latitude,
            at.longitude
        )
    }
}

/// Provider returning a fixed reading, e.g. from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FixedWeather(pub WeatherData);

impl WeatherProvider for FixedWeather {
    fn current(&self, _at: GeoPoint) -> Result<WeatherData> {
        Ok(self.0.clone())
    }
}
