//! Outcome types for the single-shot provider adapters.
//!
//! Each adapter (web search, video search, image generation) performs one
//! outbound call and reports its result as an [`AdapterReply`] or an
//! [`AdapterError`]. "Provider returned nothing" is a distinct outcome from
//! a transport failure; the transport edge decides how each is rendered.

use serde::{Deserialize, Serialize};

/// Successful outcome of a provider adapter call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AdapterReply {
    /// A formatted, human-readable answer.
    Text(String),

    /// A generated image. Decoded from the provider's base64 payload once,
    /// at the adapter boundary; re-encoded once at the transport edge.
    Image { media_type: String, data: Vec<u8> },

    /// The provider responded but had no results for the query.
    NoResult,
}

/// Failure of a provider adapter call.
///
/// These never escape the transport edge as errors; they degrade to
/// user-readable apology text per the uniform "degrade, don't crash" policy.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// A required credential is not configured; no call was attempted.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// Transport-level or provider-reported failure.
    #[error("provider failure: {0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_result_is_distinct_from_error() {
        let reply = AdapterReply::NoResult;
        let err = AdapterError::Provider("timeout".to_string());
        assert_eq!(reply, AdapterReply::NoResult);
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_missing_credential_display() {
        let err = AdapterError::MissingCredential("IMAGE_API_KEY");
        assert_eq!(err.to_string(), "missing credential: IMAGE_API_KEY");
    }
}
