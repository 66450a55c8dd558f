//! Upstream feed fixtures and request bodies

use serde_json::{json, Value};
use starcast::models::user::UserIdentity;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn test_identity(email: &str) -> UserIdentity {
    UserIdentity {
        email: email.to_string(),
        name: Some("Test Stargazer".to_string()),
        image: None,
    }
}

pub fn save_event_body(event_id: &str, date: &str) -> Value {
    json!({
        "eventId": event_id,
        "eventName": "Perseid Meteor Shower Peak",
        "eventDate": date,
        "description": "Up to 60 meteors per hour",
        "type": "meteor_shower"
    })
}

pub fn eonet_feed() -> Value {
    let event = |id: &str, category: &str, lng: f64, lat: f64| {
        json!({
            "id": id,
            "title": format!("{} {}", category, id),
            "description": null,
            "closed": null,
            "categories": [{"id": category, "title": category}],
            "sources": [{"id": "src", "url": format!("https://source.example/{}", id)}],
            "geometry": [{
                "date": "2024-06-10T00:00:00Z",
                "type": "Point",
                "coordinates": [lng, lat]
            }]
        })
    };

    let mut events: Vec<Value> = (0..12)
        .map(|i| event(&format!("EONET_W{}", i), "wildfires", -120.0, 40.0))
        .collect();
    events.push(event("EONET_V1", "volcanoes", 14.99, 37.75));
    events.push(event("EONET_I1", "seaLakeIce", -40.0, -60.5));

    json!({ "title": "EONET Events", "events": events })
}

/// Mount every upstream feed the API proxies onto one mock server
pub async fn mount_feeds(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/iss-now.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "timestamp": 1718478000,
            "iss_position": {"latitude": "51.5", "longitude": "-0.12"}
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/astros.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "number": 2,
            "people": [
                {"name": "Suni Williams", "craft": "ISS"},
                {"name": "Ye Guangfu", "craft": "Tiangong"}
            ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(eonet_feed()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/articles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 8,
            "next": null,
            "previous": null,
            "results": [{
                "id": 1,
                "title": "Europa Clipper launches",
                "url": "https://news.example/clipper",
                "image_url": null,
                "news_site": "NASA",
                "summary": "On its way to Jupiter.",
                "published_at": "2024-10-14T16:06:00Z"
            }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {
                "temperature_2m": 61.4,
                "relative_humidity_2m": 45.0,
                "cloud_cover": 10.0,
                "visibility": 24140.0,
                "weather_code": 1
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "display_name": "Denver, Colorado, United States",
            "lat": "39.7392",
            "lon": "-104.9903",
            "address": {
                "city": "Denver",
                "county": "Denver County",
                "state": "Colorado",
                "country": "United States"
            }
        }])))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/models/[^/]+:generateContent$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "A large wildfire is burning in Oregon."}]}
            }]
        })))
        .mount(server)
        .await;
}
