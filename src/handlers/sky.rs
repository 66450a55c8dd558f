//! Celestial events, visibility predictions and calendar export

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use crate::models::celestial::CelestialEvent;
use crate::models::weather::{Location, WeatherData};
use crate::prediction::VisibilityPrediction;
use crate::services::calendar::{CalendarExport, CalendarRequest};
use crate::services::celestial::next_iss_pass;
use crate::services::prediction::PredictionReport;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::helpers::{non_blank, validate_coordinates};
use super::extract::{ApiJson, ApiQuery};

use super::feeds::CoordinatesQuery;

const DEFAULT_LOCATION_NAME: &str = "Your location";

pub async fn celestial_events(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CoordinatesQuery>,
) -> Result<Json<Vec<CelestialEvent>>> {
    let (lat, lng) = params.validated()?;
    let events = state.services.event_source.events_near(lat, lng).await?;
    Ok(Json(events))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextPassResponse {
    pub next_pass: Option<CelestialEvent>,
}

pub async fn next_pass(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CoordinatesQuery>,
) -> Result<Json<NextPassResponse>> {
    let (lat, lng) = params.validated()?;
    let events = state.services.event_source.events_near(lat, lng).await?;

    Ok(Json(NextPassResponse {
        next_pass: next_iss_pass(&events).cloned(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    pub lat: f64,
    pub lng: f64,
    pub name: Option<String>,
}

pub async fn predictions(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PredictionQuery>,
) -> Result<Json<PredictionReport>> {
    validate_coordinates(params.lat, params.lng)?;
    let name = non_blank(params.name).unwrap_or_else(|| DEFAULT_LOCATION_NAME.to_string());

    let report = state
        .services
        .prediction_service
        .report(Location::new(params.lat, params.lng, name))
        .await?;
    Ok(Json(report))
}

/// Caller-supplied inputs for a single score
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub event: CelestialEvent,
    pub weather: WeatherData,
    pub location: Location,
}

pub async fn score(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScoreRequest>,
) -> Result<Json<VisibilityPrediction>> {
    validate_coordinates(request.location.lat, request.location.lng)?;

    let prediction = state.services.prediction_service.engine().predict_visibility(
        &request.event,
        &request.weather,
        &request.location,
    );
    Ok(Json(prediction))
}

pub async fn calendar(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CalendarRequest>,
) -> Result<Json<CalendarExport>> {
    let export = state.services.calendar_service.export(request)?;
    Ok(Json(export))
}
