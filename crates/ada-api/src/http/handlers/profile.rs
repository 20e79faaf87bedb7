//! User profile endpoints.
//!
//! GET  /api/v1/profile — the caller's profile, created with defaults on
//! first read.
//! PUT  /api/v1/profile — patch the editable fields; returns the updated
//! profile.

use axum::Json;
use axum::extract::State;

use ada_types::profile::{ProfileUpdate, UserProfile};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Authenticated(user_id): Authenticated,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state.profile_store.get_or_create(&user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Authenticated(user_id): Authenticated,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state.profile_store.apply_update(&user_id, update).await?;
    Ok(Json(profile))
}
