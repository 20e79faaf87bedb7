//! Standalone title generation endpoint.
//!
//! POST /api/v1/generate-title
//!
//! Lets the client title a conversation it has not yet persisted. Provider
//! failure falls back to the default title rather than an error.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use ada_core::chat::title::generate_title;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

/// Request body for the title endpoint.
#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    pub message: String,
}

/// POST /api/v1/generate-title
pub async fn generate(
    State(state): State<AppState>,
    Authenticated(_user_id): Authenticated,
    Json(body): Json<TitleRequest>,
) -> Result<Json<Value>, AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let title = generate_title(state.llm.as_ref(), &state.title_model, &body.message).await;
    Ok(Json(json!({ "title": title })))
}
