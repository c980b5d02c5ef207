use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{check_status, Result, TranslateError};
use crate::traits::{Backend, Translator};

/// Paid endpoint first, then the free tier. A key only works on one of them.
const DEEPL_HOSTS: [&str; 2] = ["https://api.deepl.com", "https://api-free.deepl.com"];

pub struct DeepL {
    api_key: String,
    http: reqwest::Client,
    hosts: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: Option<String>,
}

impl DeepL {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key: api_key.to_string(),
            http,
            hosts: DEEPL_HOSTS.iter().map(|h| h.to_string()).collect(),
        })
    }

    pub fn with_hosts(mut self, hosts: Vec<String>) -> Self {
        self.hosts = hosts;
        self
    }

    async fn translate_at(&self, host: &str, text: &str, target: &str) -> Result<String> {
        let url = format!("{}/v2/translate", host.trim_end_matches('/'));
        let target_lang = target.to_ascii_uppercase();
        let form = [
            ("auth_key", self.api_key.as_str()),
            ("text", text),
            ("target_lang", target_lang.as_str()),
        ];

        let resp = self.http.post(&url).form(&form).send().await?;
        let body: DeepLResponse = check_status(resp).await?.json().await?;

        body.translations
            .into_iter()
            .next()
            .and_then(|t| t.text)
            .filter(|t| !t.is_empty())
            .ok_or(TranslateError::Empty)
    }
}

#[async_trait]
impl Translator for DeepL {
    fn backend(&self) -> Backend {
        Backend::DeepL
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let mut last_err = TranslateError::Empty;
        for host in &self.hosts {
            match self.translate_at(host, text, target).await {
                Ok(translated) => return Ok(translated),
                Err(e) => {
                    debug!(host = host.as_str(), error = %e, "DeepL host failed");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }
}
