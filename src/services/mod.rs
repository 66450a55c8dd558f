//! Services module
//!
//! This module contains business logic services and the upstream feed clients

pub mod auth;
pub mod calendar;
pub mod celestial;
pub mod description;
pub mod eonet;
pub mod geocoding;
pub mod http;
pub mod iss;
pub mod learning;
pub mod news;
pub mod prediction;
pub mod redis;
pub mod saved_events;
pub mod user;
pub mod weather;

// Re-export commonly used services
pub use auth::{AuthService, Claims};
pub use calendar::{CalendarExport, CalendarRequest, CalendarService};
pub use celestial::{next_iss_pass, EventSource, SyntheticEventSource};
pub use description::DescriptionService;
pub use eonet::{EarthEventQuery, EonetService};
pub use geocoding::GeocodingService;
pub use iss::IssService;
pub use learning::LearningService;
pub use news::NewsService;
pub use prediction::{PredictionReport, PredictionService};
pub use redis::RedisService;
pub use saved_events::SavedEventService;
pub use user::UserService;
pub use weather::WeatherService;

use std::sync::Arc;

use serde::Serialize;
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub auth_service: AuthService,
    pub saved_event_service: SavedEventService,
    pub learning_service: LearningService,
    pub weather_service: WeatherService,
    pub iss_service: IssService,
    pub eonet_service: EonetService,
    pub news_service: NewsService,
    pub geocoding_service: GeocodingService,
    pub description_service: DescriptionService,
    pub calendar_service: CalendarService,
    pub prediction_service: PredictionService,
    pub redis_service: RedisService,
    pub event_source: Arc<dyn EventSource>,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    ///
    /// Every feed client shares one HTTP client so connections are pooled.
    pub fn new(
        settings: &Settings,
        database: DatabaseService,
        event_source: Arc<dyn EventSource>,
    ) -> Result<Self> {
        let client = http::build_client(&settings.feeds)?;
        let feeds = &settings.feeds;

        let weather_service = WeatherService::new(client.clone(), &feeds.weather_api_url);
        let prediction_service = PredictionService::new(weather_service.clone(), event_source.clone());

        Ok(Self {
            user_service: UserService::new(database.users.clone()),
            auth_service: AuthService::new(&settings.auth)?,
            saved_event_service: SavedEventService::new(database.saved_events.clone()),
            learning_service: LearningService::new(database.learning.clone()),
            iss_service: IssService::new(client.clone(), &feeds.iss_api_url),
            eonet_service: EonetService::new(client.clone(), &feeds.eonet_api_url),
            news_service: NewsService::new(client.clone(), &feeds.news_api_url),
            geocoding_service: GeocodingService::new(client.clone(), &feeds.geocoding_api_url),
            description_service: DescriptionService::new(client, settings.ai.clone()),
            calendar_service: CalendarService::new()?,
            redis_service: RedisService::try_from(settings)?,
            weather_service,
            prediction_service,
            event_source,
            database,
        })
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = self.database.health_check().await.is_ok();
        let redis_healthy = self.redis_service.health_check().await;

        ServiceHealthStatus {
            database_healthy,
            redis_healthy,
            ai_enabled: self.description_service.is_enabled(),
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
    /// `None` when response caching is disabled
    pub redis_healthy: Option<bool>,
    pub ai_enabled: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }
        if self.redis_healthy == Some(false) {
            issues.push("Redis connection failed".to_string());
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_failure_is_not_critical() {
        let status = ServiceHealthStatus {
            database_healthy: true,
            redis_healthy: Some(false),
            ai_enabled: false,
        };

        assert!(status.is_healthy());
        assert_eq!(status.get_issues(), vec!["Redis connection failed"]);
    }

    #[test]
    fn test_database_failure_is_critical() {
        let status = ServiceHealthStatus {
            database_healthy: false,
            redis_healthy: None,
            ai_enabled: true,
        };

        assert!(!status.is_healthy());
        assert_eq!(status.get_issues(), vec!["Database connection failed"]);
    }
}
