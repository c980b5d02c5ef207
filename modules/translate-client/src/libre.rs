use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{check_status, Result, TranslateError};
use crate::traits::{Backend, Translator};

/// Client for a self-hosted or public LibreTranslate instance.
pub struct LibreTranslate {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

impl LibreTranslate {
    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()).map(String::from),
            http,
        })
    }
}

/// Instances disagree on the field name; newer ones use `translatedText`.
fn extract_translation(body: &serde_json::Value) -> Option<String> {
    ["translatedText", "translation"]
        .iter()
        .find_map(|key| body.get(key).and_then(|v| v.as_str()))
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[async_trait]
impl Translator for LibreTranslate {
    fn backend(&self) -> Backend {
        Backend::Libre
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let url = format!("{}/translate", self.base_url);
        let body = LibreRequest {
            q: text,
            source: "auto",
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let resp = self.http.post(&url).json(&body).send().await?;
        let payload: serde_json::Value = check_status(resp).await?.json().await?;

        extract_translation(&payload).ok_or(TranslateError::Empty)
    }
}
