//! Serper.dev web search adapter.
//!
//! POSTs the query to the Serper Google search API and renders the top
//! organic result as a three-line text reply.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use ada_core::adapter::SearchProvider;
use ada_types::adapter::{AdapterError, AdapterReply};

/// Web search provider backed by google.serper.dev.
pub struct SerperSearchProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: String,
    #[serde(default)]
    snippet: Option<String>,
    link: String,
}

impl SerperSearchProvider {
    pub fn new(client: reqwest::Client, api_key: Option<SecretString>) -> Self {
        Self {
            client,
            api_key,
            base_url: "https://google.serper.dev".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn render(result: &OrganicResult) -> String {
        let snippet = result.snippet.as_deref().unwrap_or_default();
        format!("{}\n{}\n🔗 {}", result.title, snippet, result.link)
    }
}

impl SearchProvider for SerperSearchProvider {
    async fn search(&self, query: &str) -> Result<AdapterReply, AdapterError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(AdapterError::MissingCredential("SERPER_API_KEY"))?;

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", api_key.expose_secret())
            .json(&json!({ "q": query }))
            .send()
            .await
            .map_err(|e| AdapterError::Provider(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Provider(format!(
                "search returned HTTP {status}"
            )));
        }

        let parsed: SerperResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Provider(format!("bad search response: {e}")))?;

        match parsed.organic.first() {
            Some(top) => Ok(AdapterReply::Text(Self::render(top))),
            None => Ok(AdapterReply::NoResult),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        let provider = SerperSearchProvider::new(reqwest::Client::new(), None);
        let err = provider.search("rust borrow checker").await.unwrap_err();
        assert!(matches!(
            err,
            AdapterError::MissingCredential("SERPER_API_KEY")
        ));
    }

    #[test]
    fn test_render_top_result() {
        let result = OrganicResult {
            title: "The Rust Book".to_string(),
            snippet: Some("The official guide.".to_string()),
            link: "https://doc.rust-lang.org/book/".to_string(),
        };
        assert_eq!(
            SerperSearchProvider::render(&result),
            "The Rust Book\nThe official guide.\n🔗 https://doc.rust-lang.org/book/"
        );
    }

    #[test]
    fn test_response_without_organic_results() {
        let parsed: SerperResponse = serde_json::from_str(r#"{"searchParameters": {}}"#).unwrap();
        assert!(parsed.organic.is_empty());
    }
}
