//! Visibility prediction
//!
//! Scores how well a celestial event will be visible from an observer location
//! given the current weather, and ranks a batch of scored events.

pub mod engine;
pub mod heuristics;

pub use engine::{PredictionEngine, VisibilityPrediction};
pub use heuristics::{estimate_light_pollution, moon_phase, season, Season};

use serde::{Deserialize, Serialize};

use crate::models::celestial::CelestialEvent;

/// A celestial event together with its visibility score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedEvent {
    #[serde(flatten)]
    pub event: CelestialEvent,
    pub visibility: VisibilityPrediction,
}

/// Best score first; equal scores keep the earlier date first
pub fn rank_predictions(mut predictions: Vec<PredictedEvent>) -> Vec<PredictedEvent> {
    predictions.sort_by(|a, b| {
        b.visibility
            .score
            .total_cmp(&a.visibility.score)
            .then_with(|| a.event.date.cmp(&b.event.date))
    });
    predictions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::celestial::EventType;
    use chrono::NaiveDate;

    fn predicted(id: &str, day: u32, score: f64) -> PredictedEvent {
        PredictedEvent {
            event: CelestialEvent {
                id: id.to_string(),
                name: id.to_string(),
                event_type: EventType::IssPass,
                date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                time: "20:00".to_string(),
                duration: "4 minutes".to_string(),
                description: String::new(),
                coordinates: None,
            },
            visibility: VisibilityPrediction {
                score,
                confidence: 85,
                factors: vec![],
            },
        }
    }

    #[test]
    fn test_rank_by_score_then_date() {
        let ranked = rank_predictions(vec![
            predicted("late-good", 20, 8.0),
            predicted("poor", 1, 3.5),
            predicted("early-good", 5, 8.0),
            predicted("best", 28, 9.5),
        ]);

        let ids: Vec<_> = ranked.iter().map(|p| p.event.id.as_str()).collect();
        assert_eq!(ids, vec!["best", "early-good", "late-good", "poor"]);
    }

    #[test]
    fn test_predicted_event_is_flat_on_the_wire() {
        let value = serde_json::to_value(predicted("a", 1, 7.0)).unwrap();
        assert_eq!(value["type"], "iss_pass");
        assert_eq!(value["visibility"]["score"], 7.0);
    }
}
