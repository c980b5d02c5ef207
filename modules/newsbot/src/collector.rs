use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::cache::SeenCache;
use crate::feed::{FeedEntry, FeedFetcher};
use crate::sources::Source;

/// An entry eligible for posting this run.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Entry date, or the collection time for undated entries.
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub entry: FeedEntry,
}

impl Candidate {
    /// Always present: entries without a link never become candidates.
    pub fn link(&self) -> &str {
        self.entry.link.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CollectOptions {
    pub per_feed_limit: usize,
    pub window_hours: f64,
}

/// Counts from one collection pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectStats {
    pub sources_ok: u64,
    pub sources_failed: u64,
    pub skipped_no_link: u64,
    pub skipped_seen: u64,
    pub skipped_stale: u64,
}

/// Fetch every source and keep fresh, unseen entries.
///
/// Sources are polled one at a time, in order. A failing source is logged
/// and skipped. Only the first `per_feed_limit` entries of each feed are
/// considered. Entries without a timestamp are kept.
pub async fn collect_candidates(
    fetcher: &dyn FeedFetcher,
    sources: &[Source],
    cache: &SeenCache,
    opts: CollectOptions,
    now: DateTime<Utc>,
) -> (Vec<Candidate>, CollectStats) {
    let mut stats = CollectStats::default();
    let mut candidates = Vec::new();
    let mut seen_this_run: HashSet<String> = HashSet::new();

    for source in sources {
        let entries = match fetcher.fetch(&source.url).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(source = source.name.as_str(), url = source.url.as_str(), error = %e, "Fetch failed, skipping source");
                stats.sources_failed += 1;
                continue;
            }
        };
        stats.sources_ok += 1;

        let before = candidates.len();
        for entry in entries.into_iter().take(opts.per_feed_limit) {
            let Some(link) = entry.link.clone().filter(|l| !l.is_empty()) else {
                stats.skipped_no_link += 1;
                continue;
            };
            if seen_this_run.contains(&link) || cache.contains(&link) {
                stats.skipped_seen += 1;
                continue;
            }
            if let Some(age) = entry.age_hours(now) {
                if age > opts.window_hours {
                    stats.skipped_stale += 1;
                    continue;
                }
            }

            seen_this_run.insert(link);
            candidates.push(Candidate {
                timestamp: entry.published.unwrap_or(now),
                source: source.name.clone(),
                entry,
            });
        }

        debug!(
            source = source.name.as_str(),
            kept = candidates.len() - before,
            "Collected candidates"
        );
    }

    info!(
        candidates = candidates.len(),
        sources_ok = stats.sources_ok,
        sources_failed = stats.sources_failed,
        "Candidate collection complete"
    );
    (candidates, stats)
}
