//! Session tokens, the current user and their saved events

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use crate::middleware::AuthUser;
use crate::models::saved_event::{RemoveEventPayload, SaveEventPayload, SavedEvent};
use crate::models::user::{User, UserIdentity};
use crate::state::AppState;
use crate::utils::errors::{Result, StarCastError};
use super::extract::ApiJson;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub user: User,
}

/// Development sign-in: trade an identity for a session token
///
/// Answers 503 unless `features.dev_login` is on. Production tokens are
/// minted by the identity provider with the same secret.
pub async fn dev_token(
    State(state): State<AppState>,
    ApiJson(identity): ApiJson<UserIdentity>,
) -> Result<Json<TokenResponse>> {
    if !state.settings.features.dev_login {
        return Err(StarCastError::FeatureDisabled("development login".to_string()));
    }

    let user = state.services.user_service.sign_in(identity).await?;
    let token = state.services.auth_service.issue(&UserIdentity {
        email: user.email.clone(),
        name: user.name.clone(),
        image: user.image.clone(),
    })?;

    Ok(Json(TokenResponse { token, user }))
}

pub async fn me(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

pub async fn saved_events(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<SavedEvent>>> {
    let events = state.services.saved_event_service.list(&user).await?;
    Ok(Json(events))
}

pub async fn save_event(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(payload): ApiJson<SaveEventPayload>,
) -> Result<Json<SavedEvent>> {
    let saved = state.services.saved_event_service.save(&user, payload).await?;
    Ok(Json(saved))
}

#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub success: bool,
}

pub async fn remove_event(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(payload): ApiJson<RemoveEventPayload>,
) -> Result<Json<RemoveResponse>> {
    let event_id = payload.validate()?;
    state
        .services
        .saved_event_service
        .remove(&user, &event_id)
        .await?;
    Ok(Json(RemoveResponse { success: true }))
}
