//! Learning catalogue and progress

use axum::extract::State;
use axum::Json;
use crate::middleware::AuthUser;
use crate::models::learning::{CompleteLessonRequest, ModuleWithLessons, UserProgress};
use crate::state::AppState;
use crate::utils::errors::Result;
use super::extract::ApiJson;

pub async fn modules(State(state): State<AppState>) -> Result<Json<Vec<ModuleWithLessons>>> {
    let catalogue = state.services.learning_service.catalogue().await?;
    Ok(Json(catalogue))
}

pub async fn progress(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserProgress>> {
    let progress = state.services.learning_service.progress(&user).await?;
    Ok(Json(progress))
}

pub async fn complete_lesson(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CompleteLessonRequest>,
) -> Result<Json<UserProgress>> {
    let progress = state
        .services
        .learning_service
        .complete_lesson(&user, request)
        .await?;
    Ok(Json(progress))
}
