//! SSE stream handling for the Groq chat completions API.
//!
//! Groq streams OpenAI-style chunks: each SSE `data:` line is a JSON
//! chunk whose `choices[0].delta.content` carries the next text fragment,
//! and the literal `data: [DONE]` line terminates the stream.

use std::pin::Pin;

use async_stream::stream;
use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};
use secrecy::{ExposeSecret, SecretString};

use ada_types::llm::{LlmError, StreamEvent};

use super::types::{GroqChatRequest, GroqStreamChunk};

/// Create a streaming SSE connection to the Groq chat completions API.
///
/// Returns a stream of provider-agnostic [`StreamEvent`]s: `Connected`
/// once the HTTP response is accepted, `TextDelta` per content fragment,
/// `Done` at `[DONE]`. Errors terminate the stream.
pub fn create_groq_stream(
    client: &reqwest::Client,
    url: &str,
    body: GroqChatRequest,
    api_key: &SecretString,
) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
    let client = client.clone();
    let url = url.to_string();
    let api_key = api_key.clone();

    Box::pin(stream! {
        let response = match client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                yield Err(LlmError::Provider {
                    message: format!("HTTP request failed: {e}"),
                });
                return;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            yield Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited,
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
            return;
        }

        yield Ok(StreamEvent::Connected);

        let mut events = response.bytes_stream().eventsource();
        while let Some(event) = events.next().await {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    yield Err(LlmError::Stream(e.to_string()));
                    return;
                }
            };

            if event.data == "[DONE]" {
                yield Ok(StreamEvent::Done);
                return;
            }

            match serde_json::from_str::<GroqStreamChunk>(&event.data) {
                Ok(chunk) => {
                    if let Some(choice) = chunk.choices.into_iter().next() {
                        if let Some(text) = choice.delta.content {
                            if !text.is_empty() {
                                yield Ok(StreamEvent::TextDelta { text });
                            }
                        }
                    }
                }
                Err(e) => {
                    yield Err(LlmError::Deserialization(format!(
                        "bad stream chunk: {e}"
                    )));
                    return;
                }
            }
        }

        // Server closed the connection without a [DONE] marker.
        yield Ok(StreamEvent::Done);
    })
}
