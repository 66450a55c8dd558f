//! Generated descriptions for natural events

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::config::settings::AiConfig;
use crate::models::feeds::EarthEventSummary;
use crate::services::http::{endpoint, fetch_json};
use crate::utils::errors::{Result, StarCastError};

const FEED: &str = "generative-language";
pub const FALLBACK_DESCRIPTION: &str = "Unable to generate description.";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub struct DescriptionService {
    client: Client,
    config: Option<AiConfig>,
}

impl DescriptionService {
    /// Service is disabled unless `config` carries a non-empty key
    pub fn new(client: Client, config: Option<AiConfig>) -> Self {
        let config = config.filter(|c| !c.api_key.trim().is_empty());
        if config.is_none() {
            info!("No generative-language key configured, descriptions disabled");
        }
        Self { client, config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    pub async fn describe(&self, event: &EarthEventSummary) -> Result<String> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StarCastError::FeatureDisabled("description generation".to_string()))?;

        let prompt = build_prompt(event);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        debug!(event = %event.event_title, model = %config.model, "Requesting generated description");

        let request = self
            .client
            .post(endpoint(
                &config.api_url,
                &format!("models/{}:generateContent", config.model),
            ))
            .header("x-goog-api-key", config.api_key.as_str())
            .json(&body);

        let response: GenerateResponse = fetch_json(FEED, request).await?;
        let text = response.text();

        if text.trim().is_empty() {
            Ok(FALLBACK_DESCRIPTION.to_string())
        } else {
            Ok(text)
        }
    }
}

pub fn build_prompt(event: &EarthEventSummary) -> String {
    format!(
        "Generate a detailed, engaging description for this natural event:\n\n\
         Event: {}\n\
         Category: {}\n\
         Date: {}\n\
         Status: {}\n\
         Location: {}, {}\n\n\
         Please provide:\n\
         1. A brief explanation of what this type of event is\n\
         2. Potential impacts and significance\n\
         3. Interesting facts about this specific event or location\n\
         4. Any relevant safety information\n\n\
         Keep it informative but accessible to the general public. Limit to 2-3 paragraphs.",
        event.event_title,
        event.event_category,
        event.event_date,
        event.event_status,
        event.coordinates.latitude,
        event.coordinates.longitude,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feeds::GeoPoint;
    use assert_matches::assert_matches;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summary() -> EarthEventSummary {
        EarthEventSummary {
            event_title: "Wildfire in Oregon".to_string(),
            event_category: "wildfires".to_string(),
            event_date: "2024-06-10".to_string(),
            event_status: "Ongoing".to_string(),
            coordinates: GeoPoint { latitude: 44.2, longitude: -121.5 },
        }
    }

    fn config(api_url: String) -> AiConfig {
        AiConfig {
            api_url,
            api_key: "test-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
        }
    }

    #[test]
    fn test_prompt_carries_event_details() {
        let prompt = build_prompt(&summary());
        assert!(prompt.contains("Event: Wildfire in Oregon"));
        assert!(prompt.contains("Location: 44.2, -121.5"));
        assert!(prompt.contains("Limit to 2-3 paragraphs."));
    }

    #[tokio::test]
    async fn test_disabled_without_key() {
        let mut cfg = config("http://unused".to_string());
        cfg.api_key = "  ".to_string();
        let service = DescriptionService::new(Client::new(), Some(cfg));

        assert!(!service.is_enabled());
        assert_matches!(
            service.describe(&summary()).await,
            Err(StarCastError::FeatureDisabled(_))
        );
    }

    #[tokio::test]
    async fn test_describe_joins_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"parts": [{"text": "A wildfire is "}, {"text": "burning."}], "role": "model"}
                }]
            })))
            .mount(&server)
            .await;

        let service = DescriptionService::new(Client::new(), Some(config(server.uri())));
        let text = service.describe(&summary()).await.unwrap();
        assert_eq!(text, "A wildfire is burning.");
    }

    #[tokio::test]
    async fn test_empty_model_output_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let service = DescriptionService::new(Client::new(), Some(config(server.uri())));
        assert_eq!(service.describe(&summary()).await.unwrap(), FALLBACK_DESCRIPTION);
    }
}
