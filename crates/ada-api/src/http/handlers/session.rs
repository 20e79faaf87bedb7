//! Session management endpoints.
//!
//! All operations are scoped to the authenticated user; another user's
//! session ids behave as if they do not exist.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use ada_types::error::RepositoryError;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

/// GET /api/v1/sessions — list the caller's sessions, most recent first.
pub async fn list_sessions(
    State(state): State<AppState>,
    Authenticated(user_id): Authenticated,
) -> Result<Json<Value>, AppError> {
    let sessions = state.chat_service.list_sessions(&user_id).await?;
    Ok(Json(json!({ "sessions": sessions })))
}

/// GET /api/v1/sessions/{id} — one session with its full turn log.
pub async fn get_session(
    State(state): State<AppState>,
    Authenticated(user_id): Authenticated,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let (session, turns) = state
        .chat_service
        .get_session_with_turns(&id, &user_id)
        .await?
        .ok_or(AppError::Storage(RepositoryError::NotFound))?;

    Ok(Json(json!({ "session": session, "turns": turns })))
}

/// DELETE /api/v1/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Authenticated(user_id): Authenticated,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.chat_service.delete_session(&id, &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Request body for the rename endpoint.
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub title: String,
}

/// PUT /api/v1/sessions/{id}/rename
pub async fn rename_session(
    State(state): State<AppState>,
    Authenticated(user_id): Authenticated,
    Path(id): Path<Uuid>,
    Json(body): Json<RenameRequest>,
) -> Result<Json<Value>, AppError> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }

    state
        .chat_service
        .rename_session(&id, &user_id, title)
        .await?;
    Ok(Json(json!({ "id": id, "title": title })))
}

/// Request body for the pin endpoint.
#[derive(Debug, Deserialize)]
pub struct PinRequest {
    pub pinned: bool,
}

/// PUT /api/v1/sessions/{id}/pin
pub async fn pin_session(
    State(state): State<AppState>,
    Authenticated(user_id): Authenticated,
    Path(id): Path<Uuid>,
    Json(body): Json<PinRequest>,
) -> Result<Json<Value>, AppError> {
    state
        .chat_service
        .set_pinned(&id, &user_id, body.pinned)
        .await?;
    Ok(Json(json!({ "id": id, "pinned": body.pinned })))
}
