//! OpenAI-compatible image generation adapter.
//!
//! Requests a single base64-encoded PNG from an images/generations
//! endpoint and returns it as raw bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use ada_core::adapter::ImageProvider;
use ada_types::adapter::{AdapterError, AdapterReply};

/// Image generation provider against an OpenAI-compatible images API.
pub struct OpenAiImageProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    b64_json: String,
}

impl OpenAiImageProvider {
    pub fn new(client: reqwest::Client, api_key: Option<SecretString>) -> Self {
        Self {
            client,
            api_key,
            base_url: "https://api.openai.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl ImageProvider for OpenAiImageProvider {
    async fn generate(&self, prompt: &str) -> Result<AdapterReply, AdapterError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(AdapterError::MissingCredential("IMAGE_API_KEY"))?;

        let response = self
            .client
            .post(format!("{}/v1/images/generations", self.base_url))
            .bearer_auth(api_key.expose_secret())
            .json(&json!({
                "prompt": prompt,
                "n": 1,
                "size": "1024x1024",
                "response_format": "b64_json",
            }))
            .send()
            .await
            .map_err(|e| AdapterError::Provider(format!("image request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Provider(format!(
                "image generation returned HTTP {status}"
            )));
        }

        let parsed: ImageResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Provider(format!("bad image response: {e}")))?;

        let Some(datum) = parsed.data.first() else {
            return Ok(AdapterReply::NoResult);
        };

        let data = BASE64
            .decode(&datum.b64_json)
            .map_err(|e| AdapterError::Provider(format!("invalid image payload: {e}")))?;

        Ok(AdapterReply::Image {
            media_type: "image/png".to_string(),
            data,
        })
    }
}
