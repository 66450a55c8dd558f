//! Per-client rate limiting
//!
//! Requests are keyed by the peer IP address. Clients over quota receive 429
//! until the limiter replenishes.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use crate::config::RateLimitConfig;
use crate::state::AppState;
use crate::utils::errors::{Result, StarCastError};

pub type ClientRateLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// How often idle client entries are dropped from the limiter
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Build the keyed limiter from configuration
///
/// A zero burst falls back to the per-minute rate.
pub fn build_limiter(config: &RateLimitConfig) -> Result<ClientRateLimiter> {
    let per_minute = NonZeroU32::new(config.requests_per_minute).ok_or_else(|| {
        StarCastError::Config("Rate limit must allow at least one request per minute".to_string())
    })?;
    let burst = NonZeroU32::new(config.burst).unwrap_or(per_minute);

    Ok(RateLimiter::keyed(Quota::per_minute(per_minute).allow_burst(burst)))
}

/// Drop clients whose quota has fully replenished, returning the entries left
pub fn cleanup_idle_clients(limiter: &ClientRateLimiter) -> usize {
    limiter.retain_recent();
    limiter.shrink_to_fit();
    let remaining = limiter.len();
    debug!(remaining_clients = remaining, "Cleaned up idle rate limit entries");
    remaining
}

/// Run [`cleanup_idle_clients`] every `every` until the runtime shuts down
pub fn spawn_cleanup(limiter: Arc<ClientRateLimiter>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            cleanup_idle_clients(&limiter);
        }
    })
}

/// Peer address, or the unspecified address when the server was not started
/// with connect info (in-process tests)
pub fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let ip = client_ip(&request);

    if state.rate_limiter.check_key(&ip).is_err() {
        warn!(client = %ip, path = %request.uri().path(), "Rate limit exceeded");
        return StarCastError::RateLimitExceeded.into_response();
    }

    next.run(request).await
}
