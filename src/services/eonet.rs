//! Natural events from NASA EONET

use std::collections::BTreeSet;

use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;
use crate::models::feeds::{EarthEvent, EarthEventPage, GeoPoint};
use crate::services::http::{endpoint, fetch_json};
use crate::utils::errors::FeedResult;
use crate::utils::helpers::{calculate_offset, total_pages};

const FEED: &str = "eonet";
pub const EVENTS_PER_PAGE: usize = 10;
const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Deserialize)]
struct EventsResponse {
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    title: String,
    description: Option<String>,
    closed: Option<String>,
    #[serde(default)]
    categories: Vec<RawCategory>,
    #[serde(default)]
    sources: Vec<RawSource>,
    #[serde(default)]
    geometry: Vec<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeometry {
    date: String,
    coordinates: serde_json::Value,
    magnitude_value: Option<f64>,
}

/// Filter and page over the feed
#[derive(Debug, Clone, Default)]
pub struct EarthEventQuery {
    /// Empty means every category
    pub categories: Vec<String>,
    /// 1-based
    pub page: usize,
}

#[derive(Clone, Debug)]
pub struct EonetService {
    client: Client,
    base_url: String,
}

impl EonetService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Every well-formed event currently in the feed
    pub async fn events(&self) -> FeedResult<Vec<EarthEvent>> {
        let request = self.client.get(endpoint(&self.base_url, "events"));
        let response: EventsResponse = fetch_json(FEED, request).await?;

        let events = response
            .events
            .into_iter()
            .filter_map(|raw| {
                let id = raw.id.clone();
                let event = to_earth_event(raw);
                if event.is_none() {
                    warn!(feed = FEED, event_id = %id, "Skipping malformed event");
                }
                event
            })
            .collect();

        Ok(events)
    }
}

fn to_earth_event(raw: RawEvent) -> Option<EarthEvent> {
    let category = raw.categories.first()?.id.to_lowercase();
    let geometry = raw.geometry.into_iter().next()?;
    let coordinates = geometry.coordinates.as_array()?;
    let longitude = coordinates.first()?.as_f64()?;
    let latitude = coordinates.get(1)?.as_f64()?;

    Some(EarthEvent {
        id: raw.id,
        title: raw.title,
        description: raw
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        category: display_category(&category),
        coordinates: GeoPoint { latitude, longitude },
        date: calendar_date(&geometry.date),
        status: if raw.closed.is_some() { "Closed" } else { "Ongoing" }.to_string(),
        magnitude: geometry.magnitude_value,
        sources: raw.sources.into_iter().map(|s| s.url).collect(),
    })
}

/// EONET calls sea and lake ice `sealakeice`
fn display_category(category: &str) -> String {
    match category {
        "sealakeice" => "iceberg".to_string(),
        other => other.to_string(),
    }
}

fn calendar_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|d| d.date_naive().to_string())
        .unwrap_or_else(|_| timestamp.chars().take(10).collect())
}

/// Apply category filter and paging to a fetched feed
pub fn paginate(events: Vec<EarthEvent>, query: &EarthEventQuery) -> EarthEventPage {
    let categories: Vec<String> = events
        .iter()
        .map(|e| e.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let filtered: Vec<EarthEvent> = events
        .into_iter()
        .filter(|e| query.categories.is_empty() || query.categories.contains(&e.category))
        .collect();

    let page = query.page.max(1);
    let total_events = filtered.len();
    let events = filtered
        .into_iter()
        .skip(calculate_offset(page, EVENTS_PER_PAGE))
        .take(EVENTS_PER_PAGE)
        .collect();

    EarthEventPage {
        events,
        categories,
        page,
        total_pages: total_pages(total_events, EVENTS_PER_PAGE),
        total_events,
    }
}
