use std::time::Duration;

use async_trait::async_trait;
use discord_webhook::{DiscordWebhookClient, WebhookPayload};

use super::backend::Notifier;

/// Direct HTTP POST to the Discord webhook.
pub struct DiscordBackend {
    client: DiscordWebhookClient,
}

impl DiscordBackend {
    pub fn new(webhook_url: &str, timeout: Duration) -> discord_webhook::Result<Self> {
        Ok(Self {
            client: DiscordWebhookClient::new(webhook_url, timeout)?,
        })
    }
}

#[async_trait]
impl Notifier for DiscordBackend {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn send(&self, payload: &WebhookPayload) -> anyhow::Result<()> {
        self.client.execute(payload).await?;
        Ok(())
    }
}
