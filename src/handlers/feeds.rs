//! Pass-through endpoints for the public feeds

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::models::feeds::{EarthEventPage, EarthEventSummary, IssSnapshot, NewsPage};
use crate::models::weather::{Location, WeatherData};
use crate::services::eonet::{paginate, EarthEventQuery};
use crate::state::AppState;
use crate::utils::errors::{Result, StarCastError, ValidationError};
use crate::utils::helpers::validate_coordinates;
use super::extract::{ApiJson, ApiQuery};

#[derive(Debug, Deserialize)]
pub struct CoordinatesQuery {
    pub lat: f64,
    pub lng: f64,
}

impl CoordinatesQuery {
    pub fn validated(&self) -> std::result::Result<(f64, f64), ValidationError> {
        validate_coordinates(self.lat, self.lng)?;
        Ok((self.lat, self.lng))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    /// Comma separated category ids
    pub category: Option<String>,
}

/// 1-based page number, defaulting to the first page
pub fn page_number(page: Option<u32>) -> std::result::Result<usize, ValidationError> {
    match page {
        None => Ok(1),
        Some(0) => Err(ValidationError::InvalidPage(0)),
        Some(n) => Ok(n as usize),
    }
}

pub fn parse_categories(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

pub async fn iss(State(state): State<AppState>) -> Result<Json<IssSnapshot>> {
    let snapshot = state.services.iss_service.snapshot().await?;
    Ok(Json(snapshot))
}

pub async fn earth_events(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageQuery>,
) -> Result<Json<EarthEventPage>> {
    let query = EarthEventQuery {
        categories: parse_categories(params.category.as_deref()),
        page: page_number(params.page)?,
    };

    let eonet = &state.services.eonet_service;
    let events = state
        .services
        .redis_service
        .get_or_fetch("eonet:events", || async {
            eonet.events().await.map_err(StarCastError::from)
        })
        .await?;

    debug!(total = events.len(), page = query.page, "Serving earth events");
    Ok(Json(paginate(events, &query)))
}

#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    pub description: String,
}

pub async fn generate_description(
    State(state): State<AppState>,
    ApiJson(summary): ApiJson<EarthEventSummary>,
) -> Result<Json<DescriptionResponse>> {
    let description = state.services.description_service.describe(&summary).await?;
    Ok(Json(DescriptionResponse { description }))
}

pub async fn news(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageQuery>,
) -> Result<Json<NewsPage>> {
    let page = page_number(params.page)?;
    let news = &state.services.news_service;

    let result = state
        .services
        .redis_service
        .get_or_fetch(&format!("news:page:{}", page), || async {
            news.articles(page).await.map_err(StarCastError::from)
        })
        .await?;

    Ok(Json(result))
}

pub async fn weather(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CoordinatesQuery>,
) -> Result<Json<WeatherData>> {
    let (lat, lng) = params.validated()?;
    let weather = state.services.weather_service.current(lat, lng).await?;
    Ok(Json(weather))
}

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn geocode(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<GeocodeQuery>,
) -> Result<Json<Vec<Location>>> {
    let places = state.services.geocoding_service.suggest(&params.q).await?;
    Ok(Json(places))
}
