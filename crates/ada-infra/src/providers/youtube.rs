//! YouTube Data API video search adapter.
//!
//! Fetches the top video match and renders it as a title plus watch link.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use ada_core::adapter::VideoSearchProvider;
use ada_types::adapter::{AdapterError, AdapterReply};

/// Video search provider backed by the YouTube Data API v3.
pub struct YoutubeSearchProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct YoutubeSearchResponse {
    #[serde(default)]
    items: Vec<YoutubeItem>,
}

#[derive(Debug, Deserialize)]
struct YoutubeItem {
    id: YoutubeVideoId,
    snippet: YoutubeSnippet,
}

#[derive(Debug, Deserialize)]
struct YoutubeVideoId {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct YoutubeSnippet {
    title: String,
}

impl YoutubeSearchProvider {
    pub fn new(client: reqwest::Client, api_key: Option<SecretString>) -> Self {
        Self {
            client,
            api_key,
            base_url: "https://www.googleapis.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn render(item: &YoutubeItem) -> String {
        format!(
            "📺 {}\n🔗 https://www.youtube.com/watch?v={}",
            item.snippet.title, item.id.video_id
        )
    }
}

impl VideoSearchProvider for YoutubeSearchProvider {
    async fn search(&self, query: &str) -> Result<AdapterReply, AdapterError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(AdapterError::MissingCredential("YOUTUBE_API_KEY"))?;

        let response = self
            .client
            .get(format!("{}/youtube/v3/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", "1"),
                ("q", query),
                ("key", api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| AdapterError::Provider(format!("video search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Provider(format!(
                "video search returned HTTP {status}"
            )));
        }

        let parsed: YoutubeSearchResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Provider(format!("bad video search response: {e}")))?;

        match parsed.items.first() {
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
        let provider = YoutubeSearchProvider::new(reqwest::Client::new(), None);
        let err = provider.search("rust tutorial").await.unwrap_err();
        assert!(matches!(
            err,
            AdapterError::MissingCredential("YOUTUBE_API_KEY")
        ));
    }

    #[test]
    fn test_render_top_result() {
        let item = YoutubeItem {
            id: YoutubeVideoId {
                video_id: "dQw4w9WgXcQ".to_string(),
            },
            snippet: YoutubeSnippet {
                title: "Rust in 100 Seconds".to_string(),
            },
        };
        assert_eq!(
            YoutubeSearchProvider::render(&item),
            "📺 Rust in 100 Seconds\n🔗 https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_response_with_no_items() {
        let parsed: YoutubeSearchResponse = serde_json::from_str(r#"{"kind": "youtube#searchListResponse"}"#).unwrap();
        assert!(parsed.items.is_empty());
    }
}
