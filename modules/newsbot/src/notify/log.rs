use async_trait::async_trait;
use discord_webhook::WebhookPayload;
use tracing::info;

use super::backend::Notifier;

/// Logs payloads instead of posting them. Used for dry runs.
pub struct LogBackend;

#[async_trait]
impl Notifier for LogBackend {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, payload: &WebhookPayload) -> anyhow::Result<()> {
        let body = serde_json::to_string_pretty(payload)?;
        info!("[dry-run] would post:\n{body}");
        Ok(())
    }
}
