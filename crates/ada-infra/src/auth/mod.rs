//! JWT bearer token verification.
//!
//! Verifies HS256-signed tokens and extracts the subject claim as the
//! caller's user id. Verification is pure CPU work, so the port is sync.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use ada_core::auth::TokenVerifier;
use ada_types::error::AuthError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

/// HS256 token verifier backed by a shared secret.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    pub fn new(secret: &SecretString) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<String, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) => {
                    AuthError::Malformed
                }
                _ => AuthError::Invalid(e.to_string()),
            })?;

        Ok(data.claims.sub)
    }
}
