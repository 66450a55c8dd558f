//! Weather and observer location models

use serde::{Deserialize, Serialize};

/// Current conditions at an observer location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    /// Degrees Fahrenheit
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    /// Cloud cover, percent
    pub cloud_cover: f64,
    /// Atmospheric visibility, miles
    pub visibility: f64,
    pub conditions: String,
}

/// Observer location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

impl Location {
    pub fn new(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: name.into(),
        }
    }
}
