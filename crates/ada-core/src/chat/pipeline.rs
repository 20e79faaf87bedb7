//! Streaming chat pipeline.
//!
//! Drives one chat turn end to end: assemble the prompt from stored
//! history, stream the provider's reply to the caller as plain text
//! increments, and persist the completed exchange once the stream
//! finishes. Nothing is persisted when the provider stream fails.

use std::pin::Pin;
use std::sync::Arc;

use ada_types::chat::{DEFAULT_SESSION_TITLE, FileContext};
use ada_types::llm::{CompletionRequest, Message, StreamEvent};
use async_stream::stream;
use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::chat::repository::SessionRepository;
use crate::chat::service::{self, ChatService};
use crate::chat::title::generate_title;
use crate::llm::LlmProvider;
use crate::prompt::{SYSTEM_INSTRUCTIONS, build_messages};

/// Final increment emitted when the provider stream breaks mid-reply.
pub const STREAM_ERROR_TEXT: &str =
    "\n\nError: I ran into a problem while answering. Please try again.";

/// Everything one chat turn needs, resolved by the HTTP layer.
pub struct ChatParams {
    pub session_id: Uuid,
    pub user_id: String,
    pub message: String,
    pub code_context: Option<String>,
    pub file_context: Option<FileContext>,
    /// Client-supplied history, honored only when the session has no
    /// persisted turns of its own.
    pub inbound_history: Vec<Message>,
    pub model: String,
    pub title_model: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

/// Stream one chat turn as plain-text increments.
///
/// The returned stream yields the reply as it arrives. After the provider
/// signals completion, the user and assistant turns are committed in one
/// atomic append; a new session gets a generated title at that point. A
/// provider failure yields [`STREAM_ERROR_TEXT`] as the final increment
/// and commits nothing.
pub fn stream_chat<R, L>(
    service: Arc<ChatService<R>>,
    provider: Arc<L>,
    params: ChatParams,
) -> Pin<Box<dyn Stream<Item = String> + Send>>
where
    R: SessionRepository + Send + Sync + 'static,
    L: LlmProvider + 'static,
{
    Box::pin(stream! {
        let mut history = service
            .load_history(&params.session_id, &params.user_id)
            .await;
        if history.is_empty() {
            history = params
                .inbound_history
                .iter()
                .filter(|m| service::is_turn_role(&m.role))
                .cloned()
                .collect();
        }

        let messages = build_messages(
            &history,
            &params.message,
            params.code_context.as_deref(),
            params.file_context.as_ref(),
        );
        let request = CompletionRequest {
            model: params.model.clone(),
            messages,
            system: Some(SYSTEM_INSTRUCTIONS.to_string()),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            stream: true,
        };

        let mut assistant_text = String::new();
        let mut events = provider.stream(request);

        while let Some(event) = events.next().await {
            match event {
                Ok(StreamEvent::Connected) => {}
                Ok(StreamEvent::TextDelta { text }) => {
                    assistant_text.push_str(&text);
                    yield text;
                }
                Ok(StreamEvent::Done) => break,
                Err(err) => {
                    warn!(session_id = %params.session_id, error = %err, "provider stream failed");
                    yield STREAM_ERROR_TEXT.to_string();
                    return;
                }
            }
        }

        if assistant_text.is_empty() {
            debug!(session_id = %params.session_id, "empty reply, nothing to persist");
            return;
        }

        persist_exchange(
            &service,
            provider.as_ref(),
            params.session_id,
            &params.user_id,
            &params.title_model,
            params.message,
            assistant_text,
        )
        .await;
    })
}

/// Commit a completed user/assistant exchange, generating a title first
/// when the session does not exist yet.
///
/// Shared by the streaming pipeline and the single-shot adapter modes.
/// Persistence failures are logged and swallowed: the reply has already
/// been delivered.
pub async fn persist_exchange<R, L>(
    service: &ChatService<R>,
    provider: &L,
    session_id: Uuid,
    user_id: &str,
    title_model: &str,
    user_text: String,
    assistant_text: String,
) where
    R: SessionRepository + Send + Sync,
    L: LlmProvider,
{
    let title = if service.session_exists(&session_id, user_id).await {
        DEFAULT_SESSION_TITLE.to_string()
    } else {
        generate_title(provider, title_model, &user_text).await
    };

    if let Err(err) = service
        .commit_exchange(session_id, user_id, user_text, assistant_text, title)
        .await
    {
        warn!(session_id = %session_id, error = %err, "failed to persist exchange");
    }
}
