//! Saved event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::models::celestial::EventType;
use crate::utils::errors::ValidationError;
use crate::utils::helpers::{non_blank, parse_event_date};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedEvent {
    pub id: i64,
    pub user_id: i64,
    pub event_id: String,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub description: Option<String>,
    pub event_type: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/events/save` as sent by the browser
///
/// Every field is optional at the wire level so that missing fields can be
/// reported together instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEventPayload {
    pub event_id: Option<String>,
    pub event_name: Option<String>,
    pub event_date: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

/// A save request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavedEvent {
    pub event_id: String,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub description: Option<String>,
    pub event_type: EventType,
}

impl SaveEventPayload {
    pub fn validate(self) -> Result<NewSavedEvent, ValidationError> {
        let event_id = non_blank(self.event_id);
        let event_name = non_blank(self.event_name);
        let event_date = non_blank(self.event_date);
        let event_type = non_blank(self.event_type);

        let mut missing = Vec::new();
        if event_id.is_none() {
            missing.push("eventId");
        }
        if event_name.is_none() {
            missing.push("eventName");
        }
        if event_date.is_none() {
            missing.push("eventDate");
        }
        if event_type.is_none() {
            missing.push("type");
        }

        let (Some(event_id), Some(event_name), Some(event_date), Some(event_type)) =
            (event_id, event_name, event_date, event_type)
        else {
            return Err(ValidationError::MissingFields(missing));
        };

        let event_type = event_type
            .parse::<EventType>()
            .map_err(ValidationError::InvalidEventType)?;

        let parsed_date =
            parse_event_date(&event_date).ok_or(ValidationError::InvalidDate(event_date))?;

        Ok(NewSavedEvent {
            event_id,
            event_name,
            event_date: parsed_date,
            description: self.description,
            event_type,
        })
    }
}

/// Body of `DELETE /api/events/save`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveEventPayload {
    pub event_id: Option<String>,
}

impl RemoveEventPayload {
    pub fn validate(self) -> Result<String, ValidationError> {
        non_blank(self.event_id).ok_or(ValidationError::MissingFields(vec!["eventId"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn payload() -> SaveEventPayload {
        SaveEventPayload {
            event_id: Some("guaranteed_perseid".into()),
            event_name: Some("Perseid Meteor Shower Peak".into()),
            event_date: Some("2024-08-12".into()),
            description: Some("Up to 60 meteors per hour".into()),
            event_type: Some("meteor_shower".into()),
        }
    }

    #[test]
    fn test_valid_payload() {
        let event = payload().validate().unwrap();
        assert_eq!(event.event_type, EventType::MeteorShower);
        assert_eq!(event.event_date.to_rfc3339(), "2024-08-12T00:00:00+00:00");
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let err = SaveEventPayload {
            event_id: Some(String::new()),
            event_name: None,
            ..payload()
        }
        .validate()
        .unwrap_err();

        assert_eq!(err, ValidationError::MissingFields(vec!["eventId", "eventName"]));
    }

    #[test]
    fn test_invalid_type() {
        let err = SaveEventPayload {
            event_type: Some("comet".into()),
            ..payload()
        }
        .validate()
        .unwrap_err();

        assert_matches!(err, ValidationError::InvalidEventType(t) if t == "comet");
    }

    #[test]
    fn test_invalid_date() {
        let err = SaveEventPayload {
            event_date: Some("next tuesday".into()),
            ..payload()
        }
        .validate()
        .unwrap_err();

        assert_matches!(err, ValidationError::InvalidDate(_));
    }

    #[test]
    fn test_remove_requires_event_id() {
        let payload: RemoveEventPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(
            payload.validate(),
            Err(ValidationError::MissingFields(vec!["eventId"]))
        );

        let payload: RemoveEventPayload =
            serde_json::from_str(r#"{"eventId":"guaranteed_iss"}"#).unwrap();
        assert_eq!(payload.validate().unwrap(), "guaranteed_iss");
    }

    #[test]
    fn test_wire_names() {
        let payload: SaveEventPayload = serde_json::from_str(
            r#"{"eventId":"a","eventName":"b","eventDate":"2024-01-01","type":"eclipse"}"#,
        )
        .unwrap();
        assert_eq!(payload.validate().unwrap().event_type, EventType::Eclipse);
    }
}
