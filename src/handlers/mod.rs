//! HTTP handlers module
//!
//! This module contains the axum handlers organized by area:
//! - Feed pass-through endpoints (ISS, EONET, news, weather, geocoding)
//! - Sky endpoints (celestial events, predictions, calendar export)
//! - Account endpoints (session token, current user, saved events)
//! - Learning endpoints (catalogue and progress)

pub mod account;
pub mod extract;
pub mod feeds;
pub mod health;
pub mod learning;
pub mod sky;

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;
use crate::config::ServerConfig;
use crate::middleware::{rate_limit, request_logging, REQUEST_ID_HEADER};
use crate::state::AppState;

/// Build the full application router
///
/// `/health` is exempt from rate limiting so probes never see 429.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/iss", get(feeds::iss))
        .route("/api/earth-events", get(feeds::earth_events))
        .route("/api/generate-description", post(feeds::generate_description))
        .route("/api/news", get(feeds::news))
        .route("/api/weather", get(feeds::weather))
        .route("/api/geocode", get(feeds::geocode))
        .route("/api/celestial-events", get(sky::celestial_events))
        .route("/api/iss/next-pass", get(sky::next_pass))
        .route("/api/predictions", get(sky::predictions))
        .route("/api/predictions/score", post(sky::score))
        .route("/api/calendar", post(sky::calendar))
        .route("/api/auth/token", post(account::dev_token))
        .route("/api/me", get(account::me))
        .route("/api/events/saved", get(account::saved_events))
        .route(
            "/api/events/save",
            post(account::save_event).delete(account::remove_event),
        )
        .route("/api/learning/modules", get(learning::modules))
        .route(
            "/api/user-progress",
            get(learning::progress).post(learning::complete_lesson),
        )
        .route_layer(from_fn_with_state(state.clone(), rate_limit));

    let timeout = Duration::from_secs(state.settings.server.request_timeout_seconds);
    let cors = cors_layer(&state.settings.server);

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .layer(from_fn(request_logging))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured browser origins; `*` allows any origin
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, REQUEST_ID_HEADER])
        .expose_headers([REQUEST_ID_HEADER])
        .max_age(Duration::from_secs(60 * 60));

    if config.cors_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
