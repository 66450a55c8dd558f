//! ISS position and crew from open-notify

use reqwest::Client;
use serde::Deserialize;
use crate::models::feeds::{Astronaut, IssPosition, IssSnapshot};
use crate::services::http::{endpoint, fetch_json};
use crate::utils::errors::{FeedError, FeedResult};

const FEED: &str = "iss";
const ISS_CRAFT: &str = "ISS";

#[derive(Debug, Deserialize)]
struct IssNowResponse {
    iss_position: RawPosition,
    timestamp: i64,
}

/// open-notify reports coordinates as strings
#[derive(Debug, Deserialize)]
struct RawPosition {
    latitude: String,
    longitude: String,
}

#[derive(Debug, Deserialize)]
struct AstrosResponse {
    people: Vec<Astronaut>,
}

#[derive(Clone, Debug)]
pub struct IssService {
    client: Client,
    base_url: String,
}

impl IssService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Current position plus the crew aboard the station
    pub async fn snapshot(&self) -> FeedResult<IssSnapshot> {
        let position_request = self.client.get(endpoint(&self.base_url, "iss-now.json"));
        let crew_request = self.client.get(endpoint(&self.base_url, "astros.json"));

        let (position, astros) = tokio::try_join!(
            fetch_json::<IssNowResponse>(FEED, position_request),
            fetch_json::<AstrosResponse>(FEED, crew_request),
        )?;

        Ok(IssSnapshot {
            position: IssPosition {
                latitude: parse_coordinate(&position.iss_position.latitude)?,
                longitude: parse_coordinate(&position.iss_position.longitude)?,
                timestamp: position.timestamp,
            },
            crew: astros
                .people
                .into_iter()
                .filter(|person| person.craft == ISS_CRAFT)
                .collect(),
        })
    }
}

fn parse_coordinate(value: &str) -> FeedResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| FeedError::invalid(FEED, format!("bad coordinate '{}'", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_astros(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/astros.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "success",
                "number": 3,
                "people": [
                    {"name": "Jasmin Moghbeli", "craft": "ISS"},
                    {"name": "Jing Haiping", "craft": "Tiangong"},
                    {"name": "Andreas Mogensen", "craft": "ISS"}
                ]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_snapshot_combines_position_and_iss_crew() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/iss-now.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "success",
                "timestamp": 1718478000,
                "iss_position": {"latitude": "-12.3456", "longitude": "101.5"}
            })))
            .mount(&server)
            .await;
        mount_astros(&server).await;

        let snapshot = IssService::new(Client::new(), server.uri())
            .snapshot()
            .await
            .unwrap();

        assert_eq!(snapshot.position.latitude, -12.3456);
        assert_eq!(snapshot.position.longitude, 101.5);
        assert_eq!(snapshot.position.timestamp, 1718478000);
        let names: Vec<_> = snapshot.crew.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Jasmin Moghbeli", "Andreas Mogensen"]);
    }

    #[tokio::test]
    async fn test_unparseable_position() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/iss-now.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "timestamp": 1,
                "iss_position": {"latitude": "north", "longitude": "0"}
            })))
            .mount(&server)
            .await;
        mount_astros(&server).await;

        let result = IssService::new(Client::new(), server.uri()).snapshot().await;
        assert_matches!(result, Err(FeedError::InvalidResponse { feed: "iss", .. }));
    }
}
