use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use discord_webhook::WebhookPayload;
use tokio::io::AsyncWriteExt;
use tracing::info;

use super::backend::Notifier;

/// Posts by shelling out to an external `curl`, body on stdin.
pub struct CurlBackend {
    curl_bin: String,
    webhook_url: String,
    timeout: Duration,
}

impl CurlBackend {
    pub fn new(curl_bin: &str, webhook_url: &str, timeout: Duration) -> Self {
        Self {
            curl_bin: curl_bin.to_string(),
            webhook_url: webhook_url.to_string(),
            timeout,
        }
    }

    fn args(&self) -> Vec<String> {
        vec![
            "--silent".into(),
            "--show-error".into(),
            "--request".into(),
            "POST".into(),
            "--header".into(),
            "Content-Type: application/json".into(),
            "--max-time".into(),
            self.timeout.as_secs().max(1).to_string(),
            "--output".into(),
            "/dev/null".into(),
            "--write-out".into(),
            "%{http_code}".into(),
            "--data-binary".into(),
            "@-".into(),
            self.webhook_url.clone(),
        ]
    }
}

/// curl prints the status code via `--write-out`; 000 means no response.
fn check_http_code(stdout: &[u8]) -> Result<u16> {
    let raw = String::from_utf8_lossy(stdout);
    let code: u16 = raw
        .trim()
        .parse()
        .with_context(|| format!("Unexpected curl output: {raw:?}"))?;
    if code == 0 || code >= 300 {
        anyhow::bail!("Discord responded with {code} (via curl)");
    }
    Ok(code)
}

#[async_trait]
impl Notifier for CurlBackend {
    fn name(&self) -> &'static str {
        "curl"
    }

    async fn send(&self, payload: &WebhookPayload) -> Result<()> {
        let body = serde_json::to_vec(payload)?;

        let mut child = tokio::process::Command::new(&self.curl_bin)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to launch {}", self.curl_bin))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&body).await.context("Failed to write payload to curl")?;
        }

        // curl enforces --max-time itself; this bounds a hung process.
        let output = tokio::time::timeout(self.timeout + Duration::from_secs(5), child.wait_with_output())
            .await
            .context("curl timed out")??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("curl exited with {}: {}", output.status, stderr.trim());
        }

        let code = check_http_code(&output.stdout)?;
        info!(code, "Posted via curl fallback");
        Ok(())
    }
}
