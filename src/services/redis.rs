//! Redis response cache
//!
//! Upstream feed responses are cached as JSON under a configurable key prefix.
//! When caching is disabled every lookup misses and every write is skipped, so
//! callers never need to branch on whether Redis is configured. Redis failures
//! are logged and treated as misses.
//!
//! The connection manager is created on first use and shared by every clone,
//! so a server that is down at startup only costs misses until it comes back.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult};
use tokio::sync::OnceCell;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use crate::config::settings::RedisConfig;
use crate::utils::errors::{Result, StarCastError};

/// Backoff for the initial connect: base, factor (ms) and retries
const CONNECT_BACKOFF: (u64, u64, usize) = (2, 100, 1);

#[derive(Clone)]
pub struct RedisService {
    client: Option<Client>,
    manager: Arc<OnceCell<ConnectionManager>>,
    prefix: String,
    ttl_seconds: u64,
}

impl fmt::Debug for RedisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisService")
            .field("enabled", &self.is_enabled())
            .field("connected", &self.manager.initialized())
            .field("prefix", &self.prefix)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl RedisService {
    /// Create a cache backed by the configured Redis server
    pub fn new(config: &RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;

        Ok(Self {
            client: Some(client),
            manager: Arc::new(OnceCell::new()),
            prefix: config.prefix.clone(),
            ttl_seconds: config.ttl_seconds,
        })
    }

    /// A cache that never stores anything
    pub fn disabled() -> Self {
        Self {
            client: None,
            manager: Arc::new(OnceCell::new()),
            prefix: String::new(),
            ttl_seconds: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Shared auto-reconnecting connection; `None` when caching is disabled
    async fn connection(&self) -> Result<Option<ConnectionManager>> {
        let Some(client) = &self.client else {
            return Ok(None);
        };

        let manager = self
            .manager
            .get_or_try_init(|| {
                let (base, factor, retries) = CONNECT_BACKOFF;
                ConnectionManager::new_with_backoff(client.clone(), base, factor, retries)
            })
            .await?;
        Ok(Some(manager.clone()))
    }

    /// Get a value from Redis
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let Some(mut conn) = self.connection().await? else {
            return Ok(None);
        };
        let full_key = self.full_key(key);

        let result: Option<String> = conn.get(&full_key).await?;
        match result {
            Some(data) => {
                debug!(key = %full_key, "Cache hit");
                Ok(Some(serde_json::from_str::<T>(&data)?))
            }
            None => {
                debug!(key = %full_key, "Cache miss");
                Ok(None)
            }
        }
    }

    /// Set a value with the configured TTL
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let Some(mut conn) = self.connection().await? else {
            return Ok(());
        };
        let full_key = self.full_key(key);
        let serialized = serde_json::to_string(value)?;

        let _: () = conn.set_ex(&full_key, serialized, self.ttl_seconds).await?;

        debug!(key = %full_key, ttl = self.ttl_seconds, "Value cached");
        Ok(())
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !self.is_enabled() {
            return fetch().await;
        }

        match self.get::<T>(key).await {
            Ok(Some(hit)) => return Ok(hit),
            Ok(None) => {}
            Err(e) => warn!(key = %key, error = %e, "Cache read failed"),
        }

        let value = fetch().await?;
        if let Err(e) = self.set(key, &value).await {
            warn!(key = %key, error = %e, "Cache write failed");
        }
        Ok(value)
    }

    /// Health check for Redis connection; `None` when caching is disabled
    pub async fn health_check(&self) -> Option<bool> {
        let healthy = match self.connection().await {
            Ok(None) => return None,
            Ok(Some(mut conn)) => {
                let result: RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
                match result {
                    Ok(response) => response == "PONG",
                    Err(e) => {
                        warn!(error = %e, "Redis health check failed");
                        false
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Redis connection failed");
                false
            }
        };
        Some(healthy)
    }
}

impl TryFrom<&crate::config::Settings> for RedisService {
    type Error = StarCastError;

    fn try_from(settings: &crate::config::Settings) -> Result<Self> {
        if settings.features.response_cache {
            RedisService::new(&settings.redis)
        } else {
            Ok(RedisService::disabled())
        }
    }
}
