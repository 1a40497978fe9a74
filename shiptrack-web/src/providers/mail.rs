//! Outbound email via a mail-relay HTTP API
//!
//! Sends plain-text mail through a Resend-compatible endpoint. The send
//! path carries a coarse timeout; callers treat failures as best-effort
//! and never fail the enclosing request over a lost email.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use shiptrack_common::{Error, Result};
use std::time::Duration;
use tracing::debug;

use super::MailSender;

/// Default mail relay endpoint
const DEFAULT_MAIL_URL: &str = "https://api.resend.com/emails";

/// Coarse timeout on the send path
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Mail sender backed by an HTTP mail relay
pub struct MailClient {
    http_client: Client,
    url: String,
    api_key: String,
    from: String,
}

impl MailClient {
    pub fn new(api_key: String, from: String, url: Option<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(SEND_TIMEOUT)
                .build()
                .unwrap_or_default(),
            url: url.unwrap_or_else(|| DEFAULT_MAIL_URL.to_string()),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl MailSender for MailClient {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        debug!(to = %to, subject = %subject, "Sending mail via relay");

        let payload = json!({
            "from": self.from,
            "to": [to],
            "subject": subject,
            "text": body,
        });

        let response = self
            .http_client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Mail relay request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Mail relay returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_relay_is_upstream_error() {
        let client = MailClient::new(
            "test-key".to_string(),
            "demo@example.com".to_string(),
            Some("http://127.0.0.1:1/emails".to_string()),
        );
        let err = client
            .send("user@example.com", "Subject", "Body")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }
}
