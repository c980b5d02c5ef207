// RSS/Atom/JSON feed fetching.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

/// One entry of a fetched feed, reduced to what the bot posts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub summary: Option<String>,
}

impl FeedEntry {
    /// Age in hours at `now`, if the entry carries a timestamp.
    pub fn age_hours(&self, now: DateTime<Utc>) -> Option<f64> {
        self.published
            .map(|ts| (now - ts).num_seconds() as f64 / 3600.0)
    }

    fn from_feed_rs(entry: feed_rs::model::Entry) -> Self {
        let link = entry
            .links
            .iter()
            .find(|l| l.rel.as_deref() == Some("alternate"))
            .or_else(|| entry.links.first())
            .map(|l| l.href.clone())
            .or_else(|| entry.id.starts_with("http").then(|| entry.id.clone()));

        let summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body));

        Self {
            title: entry.title.map(|t| t.content),
            link,
            published: entry.published.or(entry.updated),
            summary,
        }
    }
}

/// Source of feed entries. Entries come back in feed order.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, feed_url: &str) -> Result<Vec<FeedEntry>>;
}

/// Parse raw feed bytes (RSS 0.9x/1.0/2.0, Atom, or JSON Feed).
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedEntry>> {
    let feed = feed_rs::parser::parse(bytes).context("Failed to parse RSS/Atom feed")?;
    Ok(feed.entries.into_iter().map(FeedEntry::from_feed_rs).collect())
}

pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("newsbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build feed HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, feed_url: &str) -> Result<Vec<FeedEntry>> {
        let resp = self
            .client
            .get(feed_url)
            .send()
            .await
            .context("Feed fetch failed")?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("Feed returned {status}");
        }

        let bytes = resp.bytes().await.context("Failed to read feed body")?;
        let entries = parse_feed(&bytes[..])?;
        debug!(feed_url, entries = entries.len(), "feed: parsed successfully");
        Ok(entries)
    }
}
