//! Session title generation via the LLM collaborator.
//!
//! A short title is requested synchronously after the first persisted
//! exchange of a session. Failure falls back to the default title and
//! never fails the overall turn.

use ada_types::chat::DEFAULT_SESSION_TITLE;
use ada_types::llm::{CompletionRequest, Message, MessageRole};
use tracing::warn;

use crate::llm::LlmProvider;

/// System prompt for the title generation call.
const TITLE_SYSTEM_PROMPT: &str = "Summarize the user's message into a 3-5 word \
conversation title. Return ONLY the title text, nothing else.";

/// Generate a 3-5 word session title from the first user message.
///
/// Trims whitespace and surrounding quotes from the response. Any provider
/// failure or empty result falls back to the default title.
pub async fn generate_title<L: LlmProvider>(
    provider: &L,
    model: &str,
    first_user_message: &str,
) -> String {
    let request = CompletionRequest {
        model: model.to_string(),
        messages: vec![Message {
            role: MessageRole::User,
            content: first_user_message.to_string(),
        }],
        system: Some(TITLE_SYSTEM_PROMPT.to_string()),
        max_tokens: 50,
        temperature: Some(0.3),
        stream: false,
    };

    match provider.complete(&request).await {
        Ok(response) => {
            let title = response
                .content
                .trim()
                .trim_matches('"')
                .trim_matches('\'')
                .trim()
                .to_string();
            if title.is_empty() {
                DEFAULT_SESSION_TITLE.to_string()
            } else {
                title
            }
        }
        Err(err) => {
            warn!(error = %err, "title generation failed, using default");
            DEFAULT_SESSION_TITLE.to_string()
        }
    }
}
