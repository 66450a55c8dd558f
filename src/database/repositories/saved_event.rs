//! Saved event repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::saved_event::{NewSavedEvent, SavedEvent};
use crate::utils::errors::{is_unique_violation, StarCastError};

const SAVED_EVENT_COLUMNS: &str =
    "id, user_id, event_id, event_name, event_date, description, event_type, created_at";

#[derive(Clone, Debug)]
pub struct SavedEventRepository {
    pool: PgPool,
}

impl SavedEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store an event for a user; a second save of the same event id is a conflict
    pub async fn create(&self, user_id: i64, event: &NewSavedEvent) -> Result<SavedEvent, StarCastError> {
        let result = sqlx::query_as::<_, SavedEvent>(&format!(
            r#"
            INSERT INTO saved_events (user_id, event_id, event_name, event_date, description, event_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SAVED_EVENT_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&event.event_id)
        .bind(&event.event_name)
        .bind(event.event_date)
        .bind(&event.description)
        .bind(event.event_type.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(saved) => Ok(saved),
            Err(e) if is_unique_violation(&e) => Err(StarCastError::DuplicateSavedEvent),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find(&self, user_id: i64, event_id: &str) -> Result<Option<SavedEvent>, StarCastError> {
        let saved = sqlx::query_as::<_, SavedEvent>(&format!(
            "SELECT {SAVED_EVENT_COLUMNS} FROM saved_events WHERE user_id = $1 AND event_id = $2"
        ))
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(saved)
    }

    /// Saved events of a user, soonest first
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<SavedEvent>, StarCastError> {
        let events = sqlx::query_as::<_, SavedEvent>(&format!(
            "SELECT {SAVED_EVENT_COLUMNS} FROM saved_events WHERE user_id = $1 ORDER BY event_date ASC, id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Returns false when nothing was deleted
    pub async fn delete(&self, user_id: i64, event_id: &str) -> Result<bool, StarCastError> {
        let result = sqlx::query("DELETE FROM saved_events WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
