//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from an optional config file and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub feeds: FeedsConfig,
    pub auth: AuthConfig,
    pub ai: Option<AiConfig>,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub request_timeout_seconds: u64,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Upstream feed endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedsConfig {
    pub iss_api_url: String,
    pub eonet_api_url: String,
    pub news_api_url: String,
    pub weather_api_url: String,
    pub geocoding_api_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub token_ttl_seconds: u64,
}

/// Generative description configuration
///
/// Only the key is required; `STARCAST__AI__API_KEY` alone enables the feature.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiConfig {
    #[serde(default = "default_ai_api_url")]
    pub api_url: String,
    pub api_key: String,
    #[serde(default = "default_ai_model")]
    pub model: String,
}

fn default_ai_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_ai_model() -> String {
    "gemini-1.5-flash".to_string()
}

/// Per-client request quota
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    pub requests_per_minute: u32,
    pub burst: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub response_cache: bool,
    pub seed_learning_content: bool,
    pub dev_login: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("STARCAST")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::StarCastError> {
        super::validation::validate_settings(self)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                cors_origins: vec!["http://localhost:3001".to_string()],
                request_timeout_seconds: 30,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/starcast".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "starcast:".to_string(),
                ttl_seconds: 300,
            },
            feeds: FeedsConfig {
                iss_api_url: "http://api.open-notify.org".to_string(),
                eonet_api_url: "https://eonet.gsfc.nasa.gov/api/v3".to_string(),
                news_api_url: "https://api.spaceflightnewsapi.net/v4".to_string(),
                weather_api_url: "https://api.open-meteo.com/v1".to_string(),
                geocoding_api_url: "https://nominatim.openstreetmap.org".to_string(),
                timeout_seconds: 10,
                user_agent: "StarCast/0.1".to_string(),
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                issuer: "starcast".to_string(),
                token_ttl_seconds: 60 * 60 * 24 * 7,
            },
            ai: None,
            rate_limit: RateLimitConfig {
                requests_per_minute: 120,
                burst: 20,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: "logs".to_string(),
            },
            features: FeaturesConfig {
                response_cache: false,
                seed_learning_content: true,
                dev_login: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    struct EnvGuard(&'static [&'static str]);

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in self.0 {
                env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults_load_without_sources() {
        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.port, 3000);
        assert!(settings.ai.is_none());
        assert!(settings.auth.jwt_secret.is_empty());
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        let _guard = EnvGuard(&[
            "STARCAST__SERVER__PORT",
            "STARCAST__SERVER__CORS_ORIGINS",
            "STARCAST__AUTH__JWT_SECRET",
            "STARCAST__FEATURES__DEV_LOGIN",
        ]);
        env::set_var("STARCAST__SERVER__PORT", "4100");
        env::set_var("STARCAST__SERVER__CORS_ORIGINS", "https://a.example,https://b.example");
        env::set_var("STARCAST__AUTH__JWT_SECRET", "from-the-environment");
        env::set_var("STARCAST__FEATURES__DEV_LOGIN", "true");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.port, 4100);
        assert_eq!(
            settings.server.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(settings.auth.jwt_secret, "from-the-environment");
        assert!(settings.features.dev_login);
        assert_eq!(settings.bind_address(), "127.0.0.1:4100");
    }

    #[test]
    #[serial]
    fn test_ai_key_alone_enables_descriptions() {
        let _guard = EnvGuard(&["STARCAST__AI__API_KEY"]);
        env::set_var("STARCAST__AI__API_KEY", "test-key");

        let ai = Settings::new().unwrap().ai.unwrap();
        assert_eq!(ai.api_key, "test-key");
        assert_eq!(ai.model, "gemini-1.5-flash");
        assert!(ai.api_url.starts_with("https://generativelanguage.googleapis.com"));
    }
}
