//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the StarCast application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{Result, StarCastError};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file appender on drop, so it must be held
/// until the process exits.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, "starcast.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .try_init()
        .map_err(|e| StarCastError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log saved-event actions
pub fn log_saved_event_action(user_id: i64, event_id: &str, action: &str) {
    info!(
        user_id = user_id,
        event_id = event_id,
        action = action,
        "Saved event action performed"
    );
}

/// Log upstream feed errors with context
pub fn log_feed_error(feed: &str, error: &str, context: Option<&str>) {
    error!(
        feed = feed,
        error = error,
        context = context,
        "Feed error occurred"
    );
}

/// Log a finished prediction run
pub fn log_prediction_run(lat: f64, lng: f64, events: usize, best_score: Option<f64>) {
    info!(
        lat = lat,
        lng = lng,
        events = events,
        best_score = best_score,
        "Visibility predictions computed"
    );
}

/// Log an HTTP request outcome
pub fn log_request(request_id: &str, method: &str, path: &str, status: u16, duration_ms: u64) {
    if status >= 500 {
        error!(
            request_id = request_id,
            method = method,
            path = path,
            status = status,
            duration_ms = duration_ms,
            "Request failed"
        );
    } else if status >= 400 {
        warn!(
            request_id = request_id,
            method = method,
            path = path,
            status = status,
            duration_ms = duration_ms,
            "Request rejected"
        );
    } else {
        debug!(
            request_id = request_id,
            method = method,
            path = path,
            status = status,
            duration_ms = duration_ms,
            "Request completed"
        );
    }
}
