//! Collaborator traits for the single-shot provider adapters.
//!
//! Each adapter performs exactly one outbound call per invocation. Failures
//! stay inside the `Result`; nothing here panics or retries. The transport
//! edge renders [`AdapterReply`]/[`AdapterError`] into user-visible text
//! using the fallback strings below.

use ada_types::adapter::{AdapterError, AdapterReply};

/// Web search collaborator (first organic result only).
pub trait SearchProvider: Send + Sync {
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<AdapterReply, AdapterError>> + Send;
}

/// Video search collaborator (first video result only).
pub trait VideoSearchProvider: Send + Sync {
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<AdapterReply, AdapterError>> + Send;
}

/// Image generation collaborator.
///
/// Implementations must check for their configured credential before
/// attempting the call and short-circuit with
/// [`AdapterError::MissingCredential`] when absent.
pub trait ImageProvider: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<AdapterReply, AdapterError>> + Send;
}

/// What an adapter's reply is rendered as when the provider had no results.
pub const NO_RESULT_TEXT: &str = "No result found.";

/// Apology strings per adapter, returned as if they were normal answers.
pub const SEARCH_FAILED_TEXT: &str = "Google search failed.";
pub const VIDEO_SEARCH_FAILED_TEXT: &str = "YouTube search failed.";
pub const IMAGE_FAILED_TEXT: &str = "Image generation failed.";
pub const IMAGE_NOT_CONFIGURED_TEXT: &str = "Image generation is not configured.";
