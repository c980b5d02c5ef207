pub mod bot;
pub mod cache;
pub mod collector;
pub mod config;
pub mod error;
pub mod feed;
pub mod message;
pub mod notify;
pub mod profile;
pub mod sampler;
pub mod sources;
pub mod translate;

pub use bot::{NewsBot, RunStats};
pub use cache::SeenCache;
pub use collector::{Candidate, CollectOptions, CollectStats};
pub use config::{Config, TranslateConfig};
pub use error::{NewsBotError, Result};
pub use feed::{FeedEntry, FeedFetcher, HttpFeedFetcher};
pub use notify::Notifier;
pub use profile::BotProfile;
pub use sources::Source;
