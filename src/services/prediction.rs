//! Visibility predictions for an observer

use std::sync::Arc;

use crate::models::celestial::CelestialEvent;
use crate::models::weather::{Location, WeatherData};
use crate::prediction::{rank_predictions, PredictedEvent, PredictionEngine};
use crate::services::celestial::EventSource;
use crate::services::weather::WeatherService;
use crate::utils::errors::{Result, StarCastError};
use crate::utils::logging::log_prediction_run;

/// Ranked predictions together with the weather they were scored against
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionReport {
    pub location: Location,
    pub weather: WeatherData,
    pub predictions: Vec<PredictedEvent>,
}

#[derive(Clone)]
pub struct PredictionService {
    weather: WeatherService,
    events: Arc<dyn EventSource>,
    engine: PredictionEngine,
}

impl PredictionService {
    pub fn new(weather: WeatherService, events: Arc<dyn EventSource>) -> Self {
        Self {
            weather,
            events,
            engine: PredictionEngine::new(),
        }
    }

    /// Fetch weather and upcoming events concurrently, then score and rank
    pub async fn report(&self, location: Location) -> Result<PredictionReport> {
        let (weather, events) = tokio::try_join!(
            async {
                self.weather
                    .current(location.lat, location.lng)
                    .await
                    .map_err(StarCastError::from)
            },
            self.events.events_near(location.lat, location.lng),
        )?;

        let predictions = score_all(&self.engine, events, &weather, &location);
        log_prediction_run(
            location.lat,
            location.lng,
            predictions.len(),
            predictions.first().map(|p| p.visibility.score),
        );

        Ok(PredictionReport {
            location,
            weather,
            predictions,
        })
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("weather", &self.weather)
            .finish_non_exhaustive()
    }
}

/// Score every event and return them best first
pub fn score_all(
    engine: &PredictionEngine,
    events: Vec<CelestialEvent>,
    weather: &WeatherData,
    location: &Location,
) -> Vec<PredictedEvent> {
    let predictions = events
        .into_iter()
        .map(|event| {
            let visibility = engine.predict_visibility(&event, weather, location);
            PredictedEvent { event, visibility }
        })
        .collect();
    rank_predictions(predictions)
}
