use tracing::{debug, warn};

use crate::traits::{Backend, Translator};

/// Ordered set of translators.
///
/// The preferred backend (if configured) is tried first, then every other
/// configured backend in [`Backend`] order. Each backend is tried at most once
/// per call and the first non-empty translation wins.
pub struct TranslatorChain {
    preferred: Option<Backend>,
    translators: Vec<Box<dyn Translator>>,
}

impl TranslatorChain {
    pub fn new(preferred: Option<Backend>, mut translators: Vec<Box<dyn Translator>>) -> Self {
        translators.sort_by_key(|t| t.backend());
        translators.dedup_by_key(|t| t.backend());
        Self {
            preferred,
            translators,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    pub fn backends(&self) -> Vec<Backend> {
        self.ordered().map(|t| t.backend()).collect()
    }

    fn ordered(&self) -> impl Iterator<Item = &Box<dyn Translator>> + '_ {
        let preferred = self
            .preferred
            .and_then(|p| self.translators.iter().find(|t| t.backend() == p));
        let rest = self
            .translators
            .iter()
            .filter(move |t| Some(t.backend()) != self.preferred);
        preferred.into_iter().chain(rest)
    }

    /// Returns `None` when no backend produced a translation.
    pub async fn translate(&self, text: &str, target: &str) -> Option<String> {
        let target = target.trim().to_lowercase();
        if target.is_empty() {
            return None;
        }

        for translator in self.ordered() {
            match translator.translate(text, &target).await {
                Ok(translated) if !translated.trim().is_empty() => {
                    debug!(backend = %translator.backend(), "translation succeeded");
                    return Some(translated);
                }
                Ok(_) => debug!(backend = %translator.backend(), "translation was empty"),
                Err(e) => {
                    warn!(backend = %translator.backend(), error = %e, "translation failed")
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, TranslateError};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct Fake {
        backend: Backend,
        reply: Option<&'static str>,
        calls: Arc<Mutex<Vec<(Backend, String)>>>,
    }

    #[async_trait]
    impl Translator for Fake {
        fn backend(&self) -> Backend {
            self.backend
        }

        async fn translate(&self, _text: &str, target: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((self.backend, target.to_string()));
            self.reply
                .map(String::from)
                .ok_or_else(|| TranslateError::Network("down".into()))
        }
    }

    fn fake(
        backend: Backend,
        reply: Option<&'static str>,
        calls: &Arc<Mutex<Vec<(Backend, String)>>>,
    ) -> Box<dyn Translator> {
        Box::new(Fake {
            backend,
            reply,
            calls: calls.clone(),
        })
    }

    #[tokio::test]
    async fn preferred_backend_goes_first() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = TranslatorChain::new(
            Some(Backend::OpenAi),
            vec![
                fake(Backend::DeepL, Some("deepl"), &calls),
                fake(Backend::OpenAi, Some("openai"), &calls),
            ],
        );

        assert_eq!(chain.translate("hi", "KO").await.as_deref(), Some("openai"));
        assert_eq!(
            *calls.lock().unwrap(),
            vec![(Backend::OpenAi, "ko".to_string())]
        );
    }

    #[tokio::test]
    async fn failure_falls_through_without_retrying_preferred() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = TranslatorChain::new(
            Some(Backend::Libre),
            vec![
                fake(Backend::OpenAi, Some("openai"), &calls),
                fake(Backend::Libre, None, &calls),
                fake(Backend::DeepL, None, &calls),
            ],
        );

        assert_eq!(chain.backends(), vec![Backend::Libre, Backend::DeepL, Backend::OpenAi]);
        assert_eq!(chain.translate("hi", "ko").await.as_deref(), Some("openai"));
        let order: Vec<Backend> = calls.lock().unwrap().iter().map(|(b, _)| *b).collect();
        assert_eq!(order, vec![Backend::Libre, Backend::DeepL, Backend::OpenAi]);
    }

    #[tokio::test]
    async fn all_failing_yields_none() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = TranslatorChain::new(None, vec![fake(Backend::DeepL, None, &calls)]);
        assert!(chain.translate("hi", "ko").await.is_none());
    }

    #[tokio::test]
    async fn empty_reply_counts_as_failure() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = TranslatorChain::new(
            None,
            vec![
                fake(Backend::DeepL, Some("   "), &calls),
                fake(Backend::Libre, Some("libre"), &calls),
            ],
        );
        assert_eq!(chain.translate("hi", "ko").await.as_deref(), Some("libre"));
    }

    #[tokio::test]
    async fn preferred_but_unconfigured_backend_is_ignored() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = TranslatorChain::new(
            Some(Backend::DeepL),
            vec![fake(Backend::OpenAi, Some("openai"), &calls)],
        );
        assert_eq!(chain.backends(), vec![Backend::OpenAi]);
        assert_eq!(chain.translate("hi", "ko").await.as_deref(), Some("openai"));
    }
}
