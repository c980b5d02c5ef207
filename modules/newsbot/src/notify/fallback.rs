use async_trait::async_trait;
use discord_webhook::WebhookPayload;
use tracing::warn;

use super::backend::Notifier;

/// Tries the primary backend, then the fallback exactly once on error.
pub struct FallbackNotifier {
    primary: Box<dyn Notifier>,
    fallback: Option<Box<dyn Notifier>>,
}

impl FallbackNotifier {
    pub fn new(primary: Box<dyn Notifier>, fallback: Option<Box<dyn Notifier>>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl Notifier for FallbackNotifier {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    async fn send(&self, payload: &WebhookPayload) -> anyhow::Result<()> {
        let err = match self.primary.send(payload).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        let Some(fallback) = &self.fallback else {
            return Err(err);
        };

        warn!(
            primary = self.primary.name(),
            fallback = fallback.name(),
            error = %err,
            "Primary post failed, trying fallback"
        );
        fallback.send(payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        ok: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Notifier for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn send(&self, _payload: &WebhookPayload) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.ok {
                Ok(())
            } else {
                anyhow::bail!("boom")
            }
        }
    }

    fn counting(ok: bool) -> (Box<dyn Notifier>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Box::new(Counting {
                ok,
                calls: calls.clone(),
            }),
            calls,
        )
    }

    #[tokio::test]
    async fn success_skips_fallback() {
        let (primary, p_calls) = counting(true);
        let (fallback, f_calls) = counting(true);
        let notifier = FallbackNotifier::new(primary, Some(fallback));

        notifier.send(&WebhookPayload::text("x")).await.unwrap();
        assert_eq!(p_calls.load(Ordering::SeqCst), 1);
        assert_eq!(f_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_tries_fallback_once() {
        let (primary, p_calls) = counting(false);
        let (fallback, f_calls) = counting(false);
        let notifier = FallbackNotifier::new(primary, Some(fallback));

        assert!(notifier.send(&WebhookPayload::text("x")).await.is_err());
        assert_eq!(p_calls.load(Ordering::SeqCst), 1);
        assert_eq!(f_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fallback_success_is_success() {
        let (primary, _) = counting(false);
        let (fallback, _) = counting(true);
        let notifier = FallbackNotifier::new(primary, Some(fallback));
        assert!(notifier.send(&WebhookPayload::text("x")).await.is_ok());
    }

    #[tokio::test]
    async fn no_fallback_returns_primary_error() {
        let (primary, _) = counting(false);
        let notifier = FallbackNotifier::new(primary, None);
        let err = notifier.send(&WebhookPayload::text("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
