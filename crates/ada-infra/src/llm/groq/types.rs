//! Groq chat completions API types.
//!
//! Groq exposes the OpenAI chat completions wire format. These are the
//! provider-specific request/response structures; the provider-agnostic
//! LLM types live in ada-types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /openai/v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct GroqChatRequest {
    pub model: String,
    pub messages: Vec<GroqMessage>,
    pub max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    pub stream: bool,
}

/// A single message in an OpenAI-shaped conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqMessage {
    pub role: String,
    pub content: String,
}

/// Non-streaming response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GroqChatResponse {
    pub model: String,
    pub choices: Vec<GroqChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqChoice {
    pub message: GroqMessage,
}

/// One SSE chunk of a streaming response. The terminal chunk is the
/// literal string `[DONE]`, not JSON, and is handled before parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct GroqStreamChunk {
    pub choices: Vec<GroqStreamChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqStreamChoice {
    pub delta: GroqDelta,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroqDelta {
    #[serde(default)]
    pub content: Option<String>,
}
