//! Gmail scan adapter
//!
//! Refreshes an OAuth access token against the Google token endpoint, then
//! lists recent message snippets so the ingest layer can extract candidate
//! tracking codes. Tokens are refreshed on every scan; the demo does not
//! cache them.

use reqwest::Client;
use serde::Deserialize;
use shiptrack_common::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Default OAuth token endpoint
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Default Gmail API base URL
const DEFAULT_GMAIL_API_URL: &str = "https://gmail.googleapis.com/gmail/v1";

/// Default timeout for Gmail requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// How many recent messages one scan inspects
const SCAN_MESSAGE_LIMIT: u32 = 10;

/// OAuth credentials for a Gmail account
#[derive(Debug, Clone)]
pub struct GmailCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Gmail message scanner
pub struct GmailScanner {
    http_client: Client,
    credentials: GmailCredentials,
    token_url: String,
    api_url: String,
}

impl GmailScanner {
    pub fn new(
        credentials: GmailCredentials,
        token_url: Option<String>,
        api_url: Option<String>,
    ) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            credentials,
            token_url: token_url.unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: api_url.unwrap_or_else(|| DEFAULT_GMAIL_API_URL.to_string()),
        }
    }

    /// Exchange the refresh token for a short-lived access token
    async fn refresh_access_token(&self) -> Result<String> {
        let response = self
            .http_client
            .post(&self.token_url)
            .form(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("refresh_token", self.credentials.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("OAuth token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "OAuth token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse token response: {}", e)))?;

        Ok(token.access_token)
    }

    /// Fetch snippets of the most recent shipping-related messages
    pub async fn scan_snippets(&self) -> Result<Vec<String>> {
        let token = self.refresh_access_token().await?;
        debug!("Gmail access token refreshed, listing messages");

        let list_url = format!("{}/users/me/messages", self.api_url);
        let response = self
            .http_client
            .get(&list_url)
            .bearer_auth(&token)
            .query(&[
                ("maxResults", SCAN_MESSAGE_LIMIT.to_string()),
                ("q", "shipped OR tracking OR delivery".to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Gmail list request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "Gmail API returned {}",
                response.status()
            )));
        }

        let listing: MessageList = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse Gmail listing: {}", e)))?;

        let mut snippets = Vec::new();
        for message in listing.messages.unwrap_or_default() {
            let msg_url = format!("{}/users/me/messages/{}", self.api_url, message.id);
            let response = self
                .http_client
                .get(&msg_url)
                .bearer_auth(&token)
                .query(&[("format", "minimal")])
                .send()
                .await
                .map_err(|e| Error::Upstream(format!("Gmail message fetch failed: {}", e)))?;

            if !response.status().is_success() {
                // One bad message should not sink the whole scan
                debug!(id = %message.id, "Skipping message, Gmail returned {}", response.status());
                continue;
            }

            let detail: MessageDetail = response
                .json()
                .await
                .map_err(|e| Error::Upstream(format!("Failed to parse Gmail message: {}", e)))?;
            if let Some(snippet) = detail.snippet {
                snippets.push(snippet);
            }
        }

        Ok(snippets)
    }
}

// ============================================================================
// Gmail API response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct MessageList {
    messages: Option<Vec<MessageRef>>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MessageDetail {
    snippet: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_parses() {
        let json = r#"{"access_token": "ya29.test", "expires_in": 3599, "token_type": "Bearer"}"#;
        let parsed: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "ya29.test");
    }

    #[test]
    fn empty_message_list_parses() {
        let parsed: MessageList = serde_json::from_str(r#"{"resultSizeEstimate": 0}"#).unwrap();
        assert!(parsed.messages.is_none());
    }

    #[tokio::test]
    async fn unreachable_token_endpoint_is_upstream_error() {
        let scanner = GmailScanner::new(
            GmailCredentials {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
                refresh_token: "refresh".to_string(),
            },
            Some("http://127.0.0.1:1/token".to_string()),
            None,
        );
        let err = scanner.scan_snippets().await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }
}
