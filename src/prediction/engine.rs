//! Visibility scoring

use serde::{Deserialize, Serialize};

use crate::models::celestial::{CelestialEvent, EventType};
use crate::models::weather::{Location, WeatherData};
use crate::prediction::heuristics::{estimate_light_pollution, moon_phase, season, Season};
use crate::utils::helpers::parse_hour;

const BASE_SCORE: f64 = 5.0;
const BASE_CONFIDENCE: i32 = 70;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;
pub const MIN_CONFIDENCE: i32 = 50;
pub const MAX_CONFIDENCE: i32 = 95;

/// How well an event should be visible, with the reasons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityPrediction {
    /// 1.0 to 10.0, one decimal
    pub score: f64,
    /// 50 to 95
    pub confidence: i32,
    pub factors: Vec<String>,
}

/// Running tally while the scoring steps are applied
struct Tally {
    score: f64,
    confidence: i32,
    factors: Vec<String>,
}

impl Tally {
    fn new() -> Self {
        Self {
            score: BASE_SCORE,
            confidence: BASE_CONFIDENCE,
            factors: Vec::new(),
        }
    }

    fn apply(&mut self, delta: f64, factor: &str) {
        self.score += delta;
        self.factors.push(factor.to_string());
    }

    fn finish(self) -> VisibilityPrediction {
        // Round half up to one decimal
        let rounded = (self.score * 10.0 + 0.5).floor() / 10.0;
        VisibilityPrediction {
            score: rounded.clamp(MIN_SCORE, MAX_SCORE),
            confidence: self.confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
            factors: self.factors,
        }
    }
}

/// Stateless scorer combining weather, event kind and observer location
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictionEngine;

impl PredictionEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn predict_visibility(
        &self,
        event: &CelestialEvent,
        weather: &WeatherData,
        location: &Location,
    ) -> VisibilityPrediction {
        let mut tally = Tally::new();

        if weather.cloud_cover <= 20.0 {
            tally.apply(2.0, "Clear skies (excellent)");
        } else if weather.cloud_cover <= 50.0 {
            tally.apply(1.0, "Partly cloudy (good)");
        } else if weather.cloud_cover <= 80.0 {
            tally.apply(-1.0, "Mostly cloudy (fair)");
        } else {
            tally.apply(-3.0, "Overcast skies (poor)");
        }

        if weather.visibility >= 15.0 {
            tally.apply(1.0, "Excellent atmospheric visibility");
        } else if weather.visibility >= 10.0 {
            tally.apply(0.0, "Good atmospheric visibility");
        } else if weather.visibility >= 5.0 {
            tally.apply(-1.0, "Fair atmospheric visibility");
        } else {
            tally.apply(-2.0, "Poor atmospheric visibility");
        }

        if weather.humidity <= 40.0 {
            tally.apply(0.5, "Low humidity (clear air)");
        } else if weather.humidity >= 80.0 {
            tally.apply(-0.5, "High humidity (hazy conditions)");
        }

        match event.event_type {
            EventType::MeteorShower => {
                let phase = moon_phase(event.date);
                if phase < 0.3 {
                    tally.apply(1.0, "New moon phase (dark skies)");
                    tally.confidence += 10;
                } else if phase > 0.7 {
                    tally.apply(-1.0, "Full moon phase (bright skies)");
                    tally.confidence += 5;
                }
            }
            EventType::IssPass => {
                tally.confidence += 15;
                tally.apply(0.0, "ISS orbital data (high accuracy)");

                if let Some(hour) = parse_hour(&event.time) {
                    if hour >= 18 || hour <= 6 {
                        tally.apply(1.0, "Twilight viewing (optimal)");
                    }
                }
            }
            EventType::Eclipse => {
                tally.confidence += 20;
                tally.apply(0.0, "Eclipse timing (very accurate)");
            }
            EventType::PlanetConjunction => {
                tally.confidence += 10;
                tally.apply(0.0, "Planetary positions (accurate)");
            }
        }

        let light_pollution = estimate_light_pollution(location.lat, location.lng);
        if light_pollution < 3.0 {
            tally.apply(1.0, "Dark sky location (minimal light pollution)");
        } else if light_pollution > 7.0 {
            tally.apply(-2.0, "Urban location (significant light pollution)");
        } else {
            tally.apply(0.0, "Suburban location (moderate light pollution)");
        }

        if season(event.date, location.lat) == Season::Winter && location.lat > 40.0 {
            tally.apply(0.5, "Winter season (longer nights)");
        }

        tally.finish()
    }
}
