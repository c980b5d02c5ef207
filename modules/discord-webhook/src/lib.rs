pub mod error;
pub mod types;

pub use error::{DiscordError, Result};
pub use types::{Embed, EmbedFooter, WebhookPayload};

use std::time::Duration;

use tracing::debug;

/// Hard limit Discord enforces on the `content` field.
pub const MAX_CONTENT_CHARS: usize = 2000;

pub struct DiscordWebhookClient {
    client: reqwest::Client,
    webhook_url: String,
}

impl DiscordWebhookClient {
    pub fn new(webhook_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            webhook_url: webhook_url.to_string(),
        })
    }

    /// POST a payload to the webhook. Any status of 300 or above is an error.
    pub async fn execute(&self, payload: &WebhookPayload) -> Result<()> {
        let resp = self
            .client
            .post(&self.webhook_url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() >= 300 {
            let message = resp.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(status = status.as_u16(), "Discord webhook accepted payload");
        Ok(())
    }
}
