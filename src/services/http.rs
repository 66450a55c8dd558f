//! Shared plumbing for the outbound feed clients

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use crate::config::settings::FeedsConfig;
use crate::utils::errors::{FeedError, FeedResult, Result};
use crate::utils::helpers::truncate_text;
use crate::utils::logging::log_feed_error;

/// Upstream error bodies are clipped to this many characters
const MAX_ERROR_BODY_CHARS: usize = 200;

/// One HTTP client for every upstream feed
pub fn build_client(config: &FeedsConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Send `request` and decode a JSON body, classifying failures per feed
pub async fn fetch_json<T>(feed: &'static str, request: RequestBuilder) -> FeedResult<T>
where
    T: DeserializeOwned,
{
    let result = send(feed, request).await;
    if let Err(e) = &result {
        log_feed_error(feed, &e.to_string(), None);
    }
    result
}

async fn send<T>(feed: &'static str, request: RequestBuilder) -> FeedResult<T>
where
    T: DeserializeOwned,
{
    let response = request
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| FeedError::from_transport(feed, e))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(FeedError::RequestFailed {
            feed,
            message: format!("HTTP {}: {}", status, truncate_text(&error_text, MAX_ERROR_BODY_CHARS)),
        });
    }

    debug!(feed = feed, status = status.as_u16(), "Feed responded");

    response
        .json::<T>()
        .await
        .map_err(|e| FeedError::invalid(feed, e.to_string()))
}

/// Join a configured base URL and a path without doubling slashes
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
