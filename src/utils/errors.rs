//! Error handling for StarCast
//!
//! This module defines the main error types used throughout the application
//! and the mapping from errors to HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Main error type for StarCast application
#[derive(Error, Debug)]
pub enum StarCastError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Upstream feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("User not found")]
    UserNotFound,

    #[error("Saved event not found: {event_id}")]
    SavedEventNotFound { event_id: String },

    #[error("Event already saved")]
    DuplicateSavedEvent,

    #[error("Lesson not found: {lesson_id}")]
    LessonNotFound { lesson_id: String },

    #[error("Feature disabled: {0}")]
    FeatureDisabled(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Upstream feed specific errors
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("{feed} request failed: {message}")]
    RequestFailed { feed: &'static str, message: String },

    #[error("{feed} request timed out")]
    Timeout { feed: &'static str },

    #[error("Invalid {feed} response: {message}")]
    InvalidResponse { feed: &'static str, message: String },

    #[error("{feed} service unavailable")]
    ServiceUnavailable { feed: &'static str },
}

impl FeedError {
    /// Classify a transport error the same way for every feed
    pub fn from_transport(feed: &'static str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FeedError::Timeout { feed }
        } else if error.is_connect() {
            FeedError::ServiceUnavailable { feed }
        } else {
            FeedError::RequestFailed {
                feed,
                message: error.to_string(),
            }
        }
    }

    pub fn invalid(feed: &'static str, message: impl Into<String>) -> Self {
        FeedError::InvalidResponse {
            feed,
            message: message.into(),
        }
    }
}

/// Request payload validation failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid event type '{0}'. Must be one of: meteor_shower, eclipse, iss_pass, planet_conjunction")]
    InvalidEventType(String),

    #[error("Invalid date format: '{0}'. Please provide a valid date string")]
    InvalidDate(String),

    #[error("Invalid coordinates: lat {lat}, lng {lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },

    #[error("Invalid page: {0}")]
    InvalidPage(u32),

    #[error("Lesson {lesson_id} does not belong to module {module_id}")]
    LessonModuleMismatch { lesson_id: String, module_id: i32 },

    #[error("Incorrect answer")]
    IncorrectAnswer,

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

/// Result type alias for StarCast operations
pub type Result<T> = std::result::Result<T, StarCastError>;

/// Result type alias for feed operations
pub type FeedResult<T> = std::result::Result<T, FeedError>;

impl StarCastError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            StarCastError::Database(_) => false,
            StarCastError::Migration(_) => false,
            StarCastError::Feed(_) => true,
            StarCastError::Validation(_) => false,
            StarCastError::Config(_) => false,
            StarCastError::Unauthenticated => false,
            StarCastError::UserNotFound => false,
            StarCastError::SavedEventNotFound { .. } => false,
            StarCastError::DuplicateSavedEvent => false,
            StarCastError::LessonNotFound { .. } => false,
            StarCastError::FeatureDisabled(_) => false,
            StarCastError::Redis(_) => true,
            StarCastError::Http(_) => true,
            StarCastError::Serialization(_) => false,
            StarCastError::Io(_) => true,
            StarCastError::UrlParse(_) => false,
            StarCastError::Token(_) => false,
            StarCastError::RateLimitExceeded => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StarCastError::Database(_) => ErrorSeverity::Critical,
            StarCastError::Migration(_) => ErrorSeverity::Critical,
            StarCastError::Config(_) => ErrorSeverity::Critical,
            StarCastError::Unauthenticated => ErrorSeverity::Warning,
            StarCastError::Token(_) => ErrorSeverity::Warning,
            StarCastError::RateLimitExceeded => ErrorSeverity::Warning,
            StarCastError::Validation(_) => ErrorSeverity::Info,
            StarCastError::UserNotFound => ErrorSeverity::Info,
            StarCastError::SavedEventNotFound { .. } => ErrorSeverity::Info,
            StarCastError::DuplicateSavedEvent => ErrorSeverity::Info,
            StarCastError::LessonNotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            StarCastError::Validation(_) => StatusCode::BAD_REQUEST,
            StarCastError::Unauthenticated | StarCastError::Token(_) => StatusCode::UNAUTHORIZED,
            StarCastError::UserNotFound
            | StarCastError::SavedEventNotFound { .. }
            | StarCastError::LessonNotFound { .. } => StatusCode::NOT_FOUND,
            StarCastError::DuplicateSavedEvent => StatusCode::CONFLICT,
            StarCastError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            StarCastError::Feed(_) | StarCastError::Http(_) => StatusCode::BAD_GATEWAY,
            StarCastError::FeatureDisabled(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to API clients
    pub fn public_message(&self) -> String {
        match self {
            StarCastError::Token(_) => "Not authenticated".to_string(),
            StarCastError::Feed(e) => e.to_string(),
            StarCastError::Http(_) => "Upstream request failed".to_string(),
            e if e.status_code().is_server_error() => "An unexpected error occurred".to_string(),
            e => e.to_string(),
        }
    }
}

/// Postgres unique-violation SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

/// Whether a sqlx error is a unique constraint violation
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

impl From<JsonRejection> for StarCastError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::MalformedRequest(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for StarCastError {
    fn from(rejection: QueryRejection) -> Self {
        ValidationError::MalformedRequest(rejection.body_text()).into()
    }
}

impl IntoResponse for StarCastError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, severity = %self.severity(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = serde_json::json!({ "error": self.public_message() });
        (status, Json(body)).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
