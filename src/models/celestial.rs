//! Celestial event model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kinds of sky events the dashboard knows how to score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    MeteorShower,
    Eclipse,
    IssPass,
    PlanetConjunction,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::MeteorShower,
        EventType::Eclipse,
        EventType::IssPass,
        EventType::PlanetConjunction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::MeteorShower => "meteor_shower",
            EventType::Eclipse => "eclipse",
            EventType::IssPass => "iss_pass",
            EventType::PlanetConjunction => "planet_conjunction",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Where in the sky an event appears
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyPosition {
    pub altitude: f64,
    pub azimuth: f64,
}

/// A predicted sky event near an observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialEvent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date: NaiveDate,
    /// Local time as `HH:MM`
    pub time: String,
    pub duration: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<SkyPosition>,
}
