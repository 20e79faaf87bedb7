//! GroqProvider -- concrete [`LlmProvider`] implementation for Groq.
//!
//! Sends requests to the Groq OpenAI-compatible chat completions endpoint
//! with bearer authentication. Supports both non-streaming (`complete`)
//! and streaming (`stream`) modes.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::pin::Pin;
use std::time::Duration;

use futures_util::Stream;
use secrecy::{ExposeSecret, SecretString};

use ada_core::llm::LlmProvider;
use ada_types::llm::{CompletionRequest, CompletionResponse, LlmError, StreamEvent};

use super::streaming::create_groq_stream;
use super::types::{GroqChatRequest, GroqChatResponse, GroqMessage};

/// Groq LLM provider.
///
/// Implements [`LlmProvider`] against `api.groq.com`. The `system` field
/// of a [`CompletionRequest`] becomes the leading `system` role message,
/// which is how the OpenAI wire format carries system instructions.
pub struct GroqProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GroqProvider {
    /// Create a new Groq provider.
    pub fn new(api_key: SecretString) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: "https://api.groq.com".to_string(),
        })
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic [`CompletionRequest`] into a [`GroqChatRequest`].
    fn to_groq_request(&self, request: &CompletionRequest, stream: bool) -> GroqChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(GroqMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(|m| GroqMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        }));

        GroqChatRequest {
            model: request.model.clone(),
            messages,
            max_completion_tokens: request.max_tokens,
            temperature: request.temperature,
            stream,
        }
    }
}

// GroqProvider intentionally does NOT derive Debug so the SecretString
// field can never leak through formatting.

impl LlmProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_groq_request(request, false);
        let url = self.url("/openai/v1/chat/completions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited,
                400 => LlmError::InvalidRequest(error_body),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let groq_resp: GroqChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let content = groq_resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::Deserialization("response had no choices".to_string()))?;

        Ok(CompletionResponse {
            content,
            model: groq_resp.model,
        })
    }

    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
        let body = self.to_groq_request(&request, true);
        let url = self.url("/openai/v1/chat/completions");

        create_groq_stream(&self.client, &url, body, &self.api_key)
    }
}
