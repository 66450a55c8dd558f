//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{StarCastError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_feeds_config(&settings.feeds)?;
    validate_auth_config(&settings.auth)?;
    validate_rate_limit_config(&settings.rate_limit)?;
    validate_logging_config(&settings.logging)?;

    if let Some(ref ai_config) = settings.ai {
        validate_ai_config(ai_config)?;
    }

    Ok(())
}

fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(StarCastError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.request_timeout_seconds == 0 {
        return Err(StarCastError::Config(
            "Request timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(StarCastError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(StarCastError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(StarCastError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(StarCastError::Config(
            "Redis URL is required".to_string()
        ));
    }

    Ok(())
}

/// Validate upstream feed endpoints
fn validate_feeds_config(config: &super::FeedsConfig) -> Result<()> {
    let urls = [
        ("ISS", &config.iss_api_url),
        ("EONET", &config.eonet_api_url),
        ("news", &config.news_api_url),
        ("weather", &config.weather_api_url),
        ("geocoding", &config.geocoding_api_url),
    ];

    for (name, value) in urls {
        url::Url::parse(value).map_err(|e| {
            StarCastError::Config(format!("Invalid {} API URL '{}': {}", name, value, e))
        })?;
    }

    if config.timeout_seconds == 0 {
        return Err(StarCastError::Config(
            "Feed timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate session token configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.len() < 32 {
        return Err(StarCastError::Config(
            "JWT secret is required and must be at least 32 bytes".to_string()
        ));
    }

    if config.token_ttl_seconds == 0 {
        return Err(StarCastError::Config(
            "Token TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate generative description configuration
fn validate_ai_config(config: &super::AiConfig) -> Result<()> {
    if config.api_key.is_empty() {
        return Err(StarCastError::Config(
            "AI API key is required when the ai section is present".to_string()
        ));
    }

    if config.model.is_empty() {
        return Err(StarCastError::Config(
            "AI model is required".to_string()
        ));
    }

    url::Url::parse(&config.api_url)
        .map_err(|e| StarCastError::Config(format!("Invalid AI API URL: {}", e)))?;

    Ok(())
}

fn validate_rate_limit_config(config: &super::RateLimitConfig) -> Result<()> {
    if config.requests_per_minute == 0 {
        return Err(StarCastError::Config(
            "Requests per minute must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(StarCastError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(StarCastError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
