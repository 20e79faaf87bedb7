//! Token verification trait.
//!
//! The auth collaborator turns a bearer credential into a verified subject
//! identifier. Every failure variant is treated uniformly as "unauthorized"
//! by callers; the distinction exists for diagnostics only.

use ada_types::error::AuthError;

/// Verifies bearer credentials.
///
/// Implementations live in ada-infra (e.g. `JwtTokenVerifier`).
pub trait TokenVerifier: Send + Sync {
    /// Verify a bearer token and return the subject identifier it names.
    fn verify(&self, token: &str) -> Result<String, AuthError>;
}
