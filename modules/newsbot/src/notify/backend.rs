use async_trait::async_trait;
use discord_webhook::WebhookPayload;

/// Pluggable delivery of webhook payloads.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn send(&self, payload: &WebhookPayload) -> anyhow::Result<()>;
}
