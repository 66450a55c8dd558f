//! Records exposed from the third-party feeds

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssPosition {
    pub latitude: f64,
    pub longitude: f64,
    /// Unix seconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astronaut {
    pub name: String,
    pub craft: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssSnapshot {
    pub position: IssPosition,
    pub crew: Vec<Astronaut>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A natural event reported by EONET
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub coordinates: GeoPoint,
    /// Date of the first geometry sample, `YYYY-MM-DD`
    pub date: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthEventPage {
    pub events: Vec<EarthEvent>,
    /// Every category present in the unfiltered feed, sorted
    pub categories: Vec<String>,
    pub page: usize,
    pub total_pages: usize,
    pub total_events: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub news_site: String,
    pub summary: String,
    pub published_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    pub articles: Vec<NewsArticle>,
    pub page: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

/// Input to description generation, as posted by the browser
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthEventSummary {
    pub event_title: String,
    pub event_category: String,
    pub event_date: String,
    pub event_status: String,
    pub coordinates: GeoPoint,
}
