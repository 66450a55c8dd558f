//! Shared application state
//!
//! One [`AppState`] is built at startup and cloned into every request handler.

use std::sync::Arc;

use crate::config::Settings;
use crate::middleware::rate_limit::{build_limiter, ClientRateLimiter};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub services: Arc<ServiceFactory>,
    pub rate_limiter: Arc<ClientRateLimiter>,
}

impl AppState {
    pub fn new(settings: Settings, services: ServiceFactory) -> Result<Self> {
        let rate_limiter = build_limiter(&settings.rate_limit)?;

        Ok(Self {
            settings: Arc::new(settings),
            services: Arc::new(services),
            rate_limiter: Arc::new(rate_limiter),
        })
    }
}
