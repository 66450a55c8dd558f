//! Current weather from open-meteo

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use crate::models::weather::WeatherData;
use crate::services::http::{endpoint, fetch_json};
use crate::utils::errors::FeedResult;

const FEED: &str = "weather";
const METERS_PER_MILE: f64 = 1609.34;
const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,cloud_cover,visibility,weather_code";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    cloud_cover: f64,
    /// Metres
    visibility: f64,
    weather_code: i32,
}

#[derive(Clone, Debug)]
pub struct WeatherService {
    client: Client,
    base_url: String,
}

impl WeatherService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Current conditions at a coordinate, temperature in Fahrenheit
    pub async fn current(&self, lat: f64, lng: f64) -> FeedResult<WeatherData> {
        debug!(lat = lat, lng = lng, "Fetching current weather");

        let request = self
            .client
            .get(endpoint(&self.base_url, "forecast"))
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lng.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
            ]);

        let response: ForecastResponse = fetch_json(FEED, request).await?;
        Ok(to_weather(response.current))
    }
}

fn to_weather(current: CurrentConditions) -> WeatherData {
    WeatherData {
        temperature: current.temperature_2m.round(),
        humidity: current.relative_humidity_2m,
        cloud_cover: current.cloud_cover,
        visibility: (current.visibility / METERS_PER_MILE * 10.0).round() / 10.0,
        conditions: describe_weather_code(current.weather_code).to_string(),
    }
}

/// Plain-language summary of a WMO weather interpretation code
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        i32::MIN..=3 => "Clear to partly cloudy",
        4..=48 => "Foggy",
        49..=57 => "Drizzle",
        58..=67 => "Rainy",
        68..=77 => "Snow",
        78..=82 => "Rain showers",
        83..=86 => "Snow showers",
        87..=99 => "Thunderstorm",
        _ => "Clear sky",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_weather_code_bands() {
        assert_eq!(describe_weather_code(0), "Clear to partly cloudy");
        assert_eq!(describe_weather_code(45), "Foggy");
        assert_eq!(describe_weather_code(53), "Drizzle");
        assert_eq!(describe_weather_code(63), "Rainy");
        assert_eq!(describe_weather_code(75), "Snow");
        assert_eq!(describe_weather_code(81), "Rain showers");
        assert_eq!(describe_weather_code(85), "Snow showers");
        assert_eq!(describe_weather_code(95), "Thunderstorm");
        assert_eq!(describe_weather_code(120), "Clear sky");
    }

    #[tokio::test]
    async fn test_current_weather_conversion() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "45"))
            .and(query_param("longitude", "-75"))
            .and(query_param("temperature_unit", "fahrenheit"))
            .and(query_param("current", CURRENT_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 45.0,
                "longitude": -75.0,
                "current": {
                    "time": "2024-06-15T20:00",
                    "temperature_2m": 68.6,
                    "relative_humidity_2m": 30,
                    "cloud_cover": 10,
                    "visibility": 24140.0,
                    "weather_code": 1
                }
            })))
            .mount(&server)
            .await;

        let service = WeatherService::new(Client::new(), server.uri());
        let weather = service.current(45.0, -75.0).await.unwrap();

        assert_eq!(weather.temperature, 69.0);
        assert_eq!(weather.humidity, 30.0);
        assert_eq!(weather.cloud_cover, 10.0);
        assert_eq!(weather.visibility, 15.0);
        assert_eq!(weather.conditions, "Clear to partly cloudy");
    }
}
