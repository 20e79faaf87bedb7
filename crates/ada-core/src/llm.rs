//! LlmProvider trait definition.
//!
//! The core abstraction the LLM backend implements. Uses RPITIT for
//! `complete` and `Pin<Box<dyn Stream>>` for `stream` (the stream must be
//! `'static` so it can outlive the borrow of the provider inside response
//! generators).

use std::pin::Pin;

use futures_util::Stream;

use ada_types::llm::{CompletionRequest, CompletionResponse, LlmError, StreamEvent};

/// Trait for LLM provider backends.
///
/// Two capabilities are consumed by the pipeline:
/// - `complete`: synchronous single-shot generation (session titles).
/// - `stream`: open a streaming completion; yields a finite, non-restartable
///   sequence of [`StreamEvent`]s.
///
/// Implementations live in ada-infra (e.g. `GroqProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "groq").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Send a streaming completion request. Returns a stream of events.
    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;
}
