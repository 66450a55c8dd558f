//! Authenticated-user extractor
//!
//! Handlers that take an [`AuthUser`] only run for requests carrying a valid
//! `Authorization: Bearer <token>` header. The user row is upserted from the
//! token's identity so first-time visitors get an account.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;
use crate::models::user::User;
use crate::services::AuthService;
use crate::state::AppState;
use crate::utils::errors::StarCastError;

#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = StarCastError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(AuthService::bearer_token)
            .ok_or(StarCastError::Unauthenticated)?;

        let identity = state.services.auth_service.verify(token).map_err(|e| {
            debug!(error = %e, "Rejected session token");
            StarCastError::Unauthenticated
        })?;

        let user = state.services.user_service.resolve(identity).await?;
        Ok(AuthUser(user))
    }
}
