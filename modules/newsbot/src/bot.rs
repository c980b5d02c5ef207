use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{info, warn};
use translate_client::TranslatorChain;

use crate::cache::SeenCache;
use crate::collector::{collect_candidates, CollectOptions, CollectStats};
use crate::config::Config;
use crate::feed::FeedFetcher;
use crate::message::{heartbeat, render_entry, translation_input};
use crate::notify::Notifier;
use crate::sampler::sample;
use crate::sources::Source;

/// Stats from one bot run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub collect: CollectStats,
    pub candidates: usize,
    pub selected: usize,
    pub posted: usize,
    pub post_failures: usize,
    pub translated: usize,
    pub heartbeat: bool,
    pub cache_size: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sources_ok={} sources_failed={} candidates={} selected={} posted={} post_failures={} translated={} heartbeat={} cache_size={}",
            self.collect.sources_ok,
            self.collect.sources_failed,
            self.candidates,
            self.selected,
            self.posted,
            self.post_failures,
            self.translated,
            self.heartbeat,
            self.cache_size,
        )
    }
}

/// One end-to-end pass: collect, sample, post, remember.
pub struct NewsBot {
    config: Config,
    sources: Vec<Source>,
    fetcher: Box<dyn FeedFetcher>,
    notifier: Box<dyn Notifier>,
    translator: Option<TranslatorChain>,
    persist_cache: bool,
}

impl NewsBot {
    pub fn new(
        config: Config,
        sources: Vec<Source>,
        fetcher: Box<dyn FeedFetcher>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            sources,
            fetcher,
            notifier,
            translator: None,
            persist_cache: true,
        }
    }

    pub fn with_translator(mut self, translator: Option<TranslatorChain>) -> Self {
        self.translator = translator;
        self
    }

    /// Leave the seen-link cache file untouched (dry runs).
    pub fn without_cache_writes(mut self) -> Self {
        self.persist_cache = false;
        self
    }

    pub async fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> RunStats {
        self.run_at(Utc::now(), rng).await
    }

    /// Run with an explicit clock, for age-window decisions.
    pub async fn run_at<R: Rng + ?Sized>(&self, now: DateTime<Utc>, rng: &mut R) -> RunStats {
        let config = &self.config;
        let mut cache = SeenCache::load(&config.cache_path);
        let mut stats = RunStats::default();

        info!(
            profile = %config.profile,
            sources = self.sources.len(),
            cached_links = cache.len(),
            "News bot run starting"
        );

        let opts = CollectOptions {
            per_feed_limit: config.per_feed_limit,
            window_hours: config.window_hours,
        };
        let (candidates, collect) =
            collect_candidates(self.fetcher.as_ref(), &self.sources, &cache, opts, now).await;
        stats.collect = collect;
        stats.candidates = candidates.len();

        if candidates.is_empty() {
            // Nothing new: make the run visible and leave the cache alone.
            stats.heartbeat = true;
            stats.cache_size = cache.len();
            let message = heartbeat(config.profile, config.window_hours);
            let payload = message.to_payload(config.use_embeds, config.profile.embed_title());
            if let Err(e) = self.notifier.send(&payload).await {
                warn!(error = %e, "Heartbeat post failed");
            }
            return stats;
        }

        let selected = sample(candidates, config.daily_count, config.max_per_source, rng);
        stats.selected = selected.len();

        for (i, candidate) in selected.iter().enumerate() {
            if i > 0 && !config.post_delay.is_zero() {
                tokio::time::sleep(config.post_delay).await;
            }

            // Cached before posting: a failed post is not retried next run.
            cache.insert(candidate.link());

            let translation = match (&self.translator, config.translate.target.as_deref()) {
                (Some(chain), Some(target)) => {
                    chain.translate(&translation_input(&candidate.entry), target).await
                }
                _ => None,
            };
            if translation.is_some() {
                stats.translated += 1;
            }

            let message = render_entry(&candidate.source, &candidate.entry, translation.as_deref());
            let payload = message.to_payload(config.use_embeds, config.profile.embed_title());
            match self.notifier.send(&payload).await {
                Ok(()) => {
                    stats.posted += 1;
                    info!(source = candidate.source.as_str(), link = candidate.link(), "Posted item");
                }
                Err(e) => {
                    stats.post_failures += 1;
                    warn!(source = candidate.source.as_str(), link = candidate.link(), error = %e, "Discord post failed");
                }
            }
        }

        stats.cache_size = cache.len();
        if self.persist_cache {
            if let Err(e) = cache.save(&config.cache_path) {
                warn!(path = %config.cache_path.display(), error = %e, "Failed to save seen-link cache");
            }
        }

        stats
    }
}
