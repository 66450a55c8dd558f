//! Saved events for signed-in users

use crate::database::repositories::SavedEventRepository;
use crate::models::saved_event::{SaveEventPayload, SavedEvent};
use crate::models::user::User;
use crate::utils::errors::{Result, StarCastError};
use crate::utils::logging::log_saved_event_action;

#[derive(Clone, Debug)]
pub struct SavedEventService {
    repository: SavedEventRepository,
}

impl SavedEventService {
    pub fn new(repository: SavedEventRepository) -> Self {
        Self { repository }
    }

    /// Validate and store; the same event id can be saved once per user
    pub async fn save(&self, user: &User, payload: SaveEventPayload) -> Result<SavedEvent> {
        let event = payload.validate()?;

        if self.repository.find(user.id, &event.event_id).await?.is_some() {
            return Err(StarCastError::DuplicateSavedEvent);
        }

        let saved = self.repository.create(user.id, &event).await?;
        log_saved_event_action(user.id, &saved.event_id, "save");
        Ok(saved)
    }

    /// Saved events, soonest first
    pub async fn list(&self, user: &User) -> Result<Vec<SavedEvent>> {
        self.repository.list_for_user(user.id).await
    }

    pub async fn remove(&self, user: &User, event_id: &str) -> Result<()> {
        let event_id = event_id.trim();
        if event_id.is_empty() {
            return Err(crate::utils::errors::ValidationError::MissingFields(vec!["eventId"]).into());
        }

        if !self.repository.delete(user.id, event_id).await? {
            return Err(StarCastError::SavedEventNotFound {
                event_id: event_id.to_string(),
            });
        }

        log_saved_event_action(user.id, event_id, "remove");
        Ok(())
    }
}
