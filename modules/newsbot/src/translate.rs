use std::time::Duration;

use tracing::{info, warn};
use translate_client::{DeepL, LibreTranslate, OpenAiTranslator, Translator, TranslatorChain};

use crate::config::TranslateConfig;
use crate::error::Result;

/// Build the translator chain. `None` when translation is off (no target
/// language) or when no backend has credentials.
pub fn chain_from_config(config: &TranslateConfig, timeout: Duration) -> Result<Option<TranslatorChain>> {
    if config.target.is_none() {
        return Ok(None);
    }

    let mut translators: Vec<Box<dyn Translator>> = Vec::new();

    if let Some(key) = &config.deepl_api_key {
        translators.push(Box::new(DeepL::new(key, timeout)?));
    }
    if let Some(url) = &config.libre_url {
        translators.push(Box::new(LibreTranslate::new(
            url,
            config.libre_api_key.as_deref(),
            timeout,
        )?));
    }
    if let Some(key) = &config.openai_api_key {
        let mut openai = OpenAiTranslator::new(key, timeout)?;
        if let Some(model) = &config.openai_model {
            openai = openai.with_model(model);
        }
        if let Some(base) = &config.openai_api_base {
            openai = openai.with_base_url(base);
        }
        translators.push(Box::new(openai));
    }

    let chain = TranslatorChain::new(config.backend, translators);
    if chain.is_empty() {
        warn!("TRANSLATE_TO is set but no translation backend is configured");
        return Ok(None);
    }

    info!(backends = ?chain.backends(), "Translation enabled");
    Ok(Some(chain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use translate_client::Backend;

    #[test]
    fn no_target_means_no_chain() {
        let config = TranslateConfig {
            openai_api_key: Some("sk".into()),
            ..Default::default()
        };
        assert!(chain_from_config(&config, Duration::from_secs(5)).unwrap().is_none());
    }

    #[test]
    fn target_without_backends_means_no_chain() {
        let config = TranslateConfig {
            target: Some("ko".into()),
            ..Default::default()
        };
        assert!(chain_from_config(&config, Duration::from_secs(5)).unwrap().is_none());
    }

    #[test]
    fn configured_backends_are_ordered_with_preference() {
        let config = TranslateConfig {
            target: Some("ko".into()),
            backend: Some(Backend::OpenAi),
            deepl_api_key: Some("dk".into()),
            openai_api_key: Some("sk".into()),
            ..Default::default()
        };
        let chain = chain_from_config(&config, Duration::from_secs(5)).unwrap().unwrap();
        assert_eq!(chain.backends(), vec![Backend::OpenAi, Backend::DeepL]);
    }
}
