//! Chat endpoint: intent dispatch plus the streaming pipeline.
//!
//! POST /api/v1/chat
//!
//! Every message is classified into exactly one handling mode first.
//! Identity, name-capture, greeting, and adapter modes return a single
//! JSON reply; plain chat returns a chunked `text/plain` stream with the
//! session id echoed in the `x-session-id` header. Adapter failures
//! degrade to apology text instead of HTTP errors.

use std::convert::Infallible;

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use ada_core::adapter::{
    IMAGE_FAILED_TEXT, IMAGE_NOT_CONFIGURED_TEXT, ImageProvider, NO_RESULT_TEXT,
    SEARCH_FAILED_TEXT, SearchProvider, VIDEO_SEARCH_FAILED_TEXT, VideoSearchProvider,
};
use ada_core::chat::pipeline::{ChatParams, persist_exchange, stream_chat};
use ada_core::intent::{Intent, classify};
use ada_types::adapter::{AdapterError, AdapterReply};
use ada_types::chat::FileContext;
use ada_types::llm::Message;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user message.
    pub message: String,
    /// Existing session ID to continue; if absent, a new session is created.
    pub session_id: Option<Uuid>,
    /// Client-side history, honored only when the session has no persisted
    /// turns of its own.
    #[serde(default)]
    pub history: Vec<Message>,
    /// Current editor buffer, injected ahead of the message.
    pub code_context: Option<String>,
    /// One uploaded file, injected ahead of the message.
    pub file_context: Option<FileContext>,
}

/// POST /api/v1/chat — classify the message and answer in the matching mode.
pub async fn chat(
    State(state): State<AppState>,
    Authenticated(user_id): Authenticated,
    Json(body): Json<ChatRequest>,
) -> Result<Response, AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let privileged = state.owner_id.as_deref() == Some(user_id.as_str());
    let guest_name = state.guest_store.lookup(&user_id).await;
    let intent = classify(&body.message, privileged, guest_name.as_deref());

    // New sessions get a server-generated id, echoed back in the header.
    let session_id = body.session_id.unwrap_or_else(Uuid::now_v7);
    // Adapter and template exchanges only land in an explicitly continued
    // session; a one-off search does not create a session of its own.
    let persist_to = body.session_id;

    match intent {
        Intent::IdentityUnknown => Ok(text_reply(
            "🤔 I don't know your name yet!\nReply like this:\n`name: YourName`",
        )),
        Intent::CaptureName(name) => {
            state.guest_store.remember(&user_id, &name).await?;
            Ok(text_reply(&format!("✅ Got it! I'll remember you as {name}.")))
        }
        Intent::GreetingWelcome => {
            // classify only yields this when a name is on file
            let name = guest_name.unwrap_or_default();
            Ok(text_reply(&format!("👋 Welcome back, {name}!")))
        }
        Intent::WebSearch(query) => {
            let reply = finish_adapter_call(
                state.search.search(&query).await,
                SEARCH_FAILED_TEXT,
            );
            deliver_adapter_reply(&state, persist_to, &user_id, body.message, reply).await
        }
        Intent::VideoSearch(query) => {
            let reply = finish_adapter_call(
                state.video.search(&query).await,
                VIDEO_SEARCH_FAILED_TEXT,
            );
            deliver_adapter_reply(&state, persist_to, &user_id, body.message, reply).await
        }
        Intent::ImageGenerate(prompt) => {
            if prompt.is_empty() {
                return Err(AppError::Validation(
                    "image prompt must not be empty".to_string(),
                ));
            }
            let reply = finish_adapter_call(
                state.image.generate(&prompt).await,
                IMAGE_FAILED_TEXT,
            );
            deliver_adapter_reply(&state, persist_to, &user_id, body.message, reply).await
        }
        Intent::Chat => {
            let params = ChatParams {
                session_id,
                user_id,
                message: body.message,
                code_context: body.code_context,
                file_context: body.file_context,
                inbound_history: body.history,
                model: state.chat_model.clone(),
                title_model: state.title_model.clone(),
                max_tokens: state.max_tokens,
                temperature: None,
            };
            let stream = stream_chat(state.chat_service.clone(), state.llm.clone(), params);
            let body_stream = stream.map(|chunk| Ok::<_, Infallible>(Bytes::from(chunk)));

            let mut response = Response::new(Body::from_stream(body_stream));
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            response.headers_mut().insert(
                "x-session-id",
                HeaderValue::from_str(&session_id.to_string())
                    .map_err(|e| AppError::Internal(e.to_string()))?,
            );
            Ok(response)
        }
    }
}

/// Collapse an adapter call outcome into the reply that reaches the user.
///
/// Errors and empty results degrade to apology text; only the missing
/// image credential gets its own message so the caller knows the feature
/// is off rather than broken.
fn finish_adapter_call(
    outcome: Result<AdapterReply, AdapterError>,
    failed_text: &str,
) -> AdapterReply {
    match outcome {
        Ok(AdapterReply::NoResult) => AdapterReply::Text(NO_RESULT_TEXT.to_string()),
        Ok(reply) => reply,
        Err(AdapterError::MissingCredential("IMAGE_API_KEY")) => {
            AdapterReply::Text(IMAGE_NOT_CONFIGURED_TEXT.to_string())
        }
        Err(err) => {
            warn!(error = %err, "adapter call failed");
            AdapterReply::Text(failed_text.to_string())
        }
    }
}

/// Render an adapter reply as JSON and record the exchange in the session
/// log when the caller is continuing an existing session.
async fn deliver_adapter_reply(
    state: &AppState,
    persist_to: Option<Uuid>,
    user_id: &str,
    user_message: String,
    reply: AdapterReply,
) -> Result<Response, AppError> {
    let (response_body, logged_text) = match &reply {
        AdapterReply::Text(text) => (json!({ "kind": "text", "text": text }), text.clone()),
        AdapterReply::Image { media_type, data } => {
            let encoded = BASE64.encode(data);
            let logged = format!("data:{media_type};base64,{encoded}");
            (
                json!({ "kind": "image", "media_type": media_type, "data": encoded }),
                logged,
            )
        }
        // finish_adapter_call already rewrote NoResult
        AdapterReply::NoResult => (
            json!({ "kind": "text", "text": NO_RESULT_TEXT }),
            NO_RESULT_TEXT.to_string(),
        ),
    };

    if let Some(session_id) = persist_to {
        persist_exchange(
            state.chat_service.as_ref(),
            state.llm.as_ref(),
            session_id,
            user_id,
            &state.title_model,
            user_message,
            logged_text,
        )
        .await;
    }

    Ok(Json(response_body).into_response())
}

/// A single-shot JSON text reply, never persisted.
fn text_reply(text: &str) -> Response {
    Json(json!({ "kind": "text", "text": text })).into_response()
}
