//! Place-name suggestions from Nominatim

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use crate::models::weather::Location;
use crate::services::http::{endpoint, fetch_json};
use crate::utils::errors::FeedResult;

const FEED: &str = "geocoding";
const MAX_SUGGESTIONS: usize = 5;
const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    address: Option<Address>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    suburb: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl Address {
    fn main_place(&self) -> Option<&String> {
        self.city
            .as_ref()
            .or(self.town.as_ref())
            .or(self.village.as_ref())
            .or(self.municipality.as_ref())
            .or(self.suburb.as_ref())
    }

    fn is_locality(&self) -> bool {
        self.main_place().is_some() || self.county.is_some() || self.state.is_some()
    }

    /// "Place, County, State, Country", skipping repeats
    fn display_name(&self) -> String {
        let main = self.main_place();
        let mut parts: Vec<&str> = Vec::new();

        if let Some(place) = main {
            parts.push(place);
        }
        if let Some(county) = &self.county {
            if Some(county) != main {
                parts.push(county);
            }
        }
        if let Some(state) = &self.state {
            if Some(state) != self.county.as_ref() {
                parts.push(state);
            }
        }
        if let Some(country) = &self.country {
            parts.push(country);
        }

        parts.join(", ")
    }
}

#[derive(Clone, Debug)]
pub struct GeocodingService {
    client: Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Up to five locations matching a free-text query, cities preferred
    pub async fn suggest(&self, query: &str) -> FeedResult<Vec<Location>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let mut places = self.search(query, true).await?;
        if places.is_empty() {
            debug!(query = %query, "No city match, widening search");
            places = self.search(query, false).await?;
        }

        Ok(rank_places(query, places))
    }

    async fn search(&self, query: &str, cities_only: bool) -> FeedResult<Vec<Place>> {
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", MAX_SUGGESTIONS.to_string()),
            ("addressdetails", "1".to_string()),
        ];
        if cities_only {
            params.push(("featuretype", "city".to_string()));
        }

        let request = self
            .client
            .get(endpoint(&self.base_url, "search"))
            .header(reqwest::header::ACCEPT_LANGUAGE, "en")
            .query(&params);

        fetch_json(FEED, request).await
    }
}

fn rank_places(query: &str, places: Vec<Place>) -> Vec<Location> {
    let query = query.to_lowercase();

    let mut named: Vec<(String, Place)> = places
        .into_iter()
        .filter_map(|place| {
            let address = place.address.as_ref()?;
            if !address.is_locality() {
                return None;
            }
            Some((address.display_name(), place))
        })
        .collect();

    named.sort_by(|(a, _), (b, _)| {
        let a_prefix = a.to_lowercase().starts_with(&query);
        let b_prefix = b.to_lowercase().starts_with(&query);
        b_prefix
            .cmp(&a_prefix)
            .then_with(|| a.chars().count().cmp(&b.chars().count()))
    });

    named
        .into_iter()
        .filter_map(|(name, place)| {
            let lat = place.lat.parse::<f64>().ok()?;
            let lng = place.lon.parse::<f64>().ok()?;
            Some(Location::new(lat, lng, name))
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn place(lat: &str, lon: &str, address: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "display_name": "ignored",
            "lat": lat,
            "lon": lon,
            "type": "city",
            "class": "place",
            "address": address
        })
    }

    #[tokio::test]
    async fn test_short_query_skips_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let service = GeocodingService::new(Client::new(), server.uri());
        assert!(service.suggest(" a ").await.unwrap().is_empty());
        assert!(service.suggest("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_falls_back_to_general_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("featuretype", "city"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                place("44.06", "-121.31", serde_json::json!({
                    "town": "Bend",
                    "county": "Deschutes County",
                    "state": "Oregon",
                    "country": "United States"
                }))
            ])))
            .mount(&server)
            .await;

        let suggestions = GeocodingService::new(Client::new(), server.uri())
            .suggest("Bend")
            .await
            .unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Bend, Deschutes County, Oregon, United States");
        assert_eq!(suggestions[0].lat, 44.06);
        assert_eq!(suggestions[0].lng, -121.31);
    }

    #[test]
    fn test_rank_prefers_prefix_then_shorter() {
        let places: Vec<Place> = serde_json::from_value(serde_json::json!([
            place("1", "1", serde_json::json!({"city": "East Paris", "country": "France"})),
            place("2", "2", serde_json::json!({"city": "Paris", "state": "Texas", "country": "United States"})),
            place("3", "3", serde_json::json!({"city": "Paris", "country": "France"})),
            place("4", "4", serde_json::json!({"country": "Nowhere"})),
            place("5", "5", serde_json::json!({"state": "Île-de-France", "county": "Île-de-France", "country": "France"}))
        ]))
        .unwrap();

        let names: Vec<_> = rank_places("paris", places).into_iter().map(|l| l.name).collect();
        assert_eq!(
            names,
            vec![
                "Paris, France",
                "Paris, Texas, United States",
                "East Paris, France",
                "Île-de-France, France",
            ]
        );
    }
}
