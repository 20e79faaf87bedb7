//! Bearer token authentication extractor.
//!
//! Extracts the `Authorization: Bearer <token>` header, verifies the JWT,
//! and exposes the subject claim as the caller's user id. Every protected
//! handler takes this extractor; rejection is always a uniform 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use ada_core::auth::TokenVerifier;
use ada_types::error::AuthError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated request marker carrying the verified user id.
pub struct Authenticated(pub String);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(parts)?;
        let user_id = state.verifier.verify(token)?;
        Ok(Authenticated(user_id))
    }
}

/// Extract the bearer token from the Authorization header.
fn extract_bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get("authorization")
        .ok_or(AuthError::Missing)?;
    let value = header.to_str().map_err(|_| AuthError::Malformed)?;
    let token = value.strip_prefix("Bearer ").ok_or(AuthError::Malformed)?;
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Malformed);
    }
    Ok(token)
}
