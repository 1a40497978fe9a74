//! AI completion relay
//!
//! Forwards a chat message (plus any extracted tracking context) to an
//! OpenAI-compatible completion API and relays the text reply. Calls are
//! stateless; no conversation history is kept between requests.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use shiptrack_common::{Error, Result};
use std::time::Duration;
use tracing::debug;

use super::CompletionProvider;

/// Default completion endpoint
const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for the demo assistant
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for completion requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Completion provider backed by an OpenAI-compatible API
pub struct CompletionClient {
    http_client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(api_key: String, url: Option<String>, model: Option<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            url: url.unwrap_or_else(|| DEFAULT_COMPLETION_URL.to_string()),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl CompletionProvider for CompletionClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        debug!(model = %self.model, "Relaying chat message to completion API");

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });

        let response = self
            .http_client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Completion API returned {}: {}",
                status, body
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse completion response: {}", e)))?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| Error::Upstream("Completion API returned no choices".to_string()))?;

        Ok(reply)
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_response_parses() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": "Hi there"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Hi there");
    }

    #[tokio::test]
    async fn unreachable_api_is_upstream_error() {
        let client = CompletionClient::new(
            "test-key".to_string(),
            Some("http://127.0.0.1:1/v1/chat/completions".to_string()),
            None,
        );
        let err = client.complete("system", "hello").await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }
}
