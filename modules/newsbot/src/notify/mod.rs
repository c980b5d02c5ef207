// Delivery backends for webhook payloads.

pub mod backend;
pub mod curl;
pub mod discord;
pub mod fallback;
pub mod log;

pub use backend::Notifier;
pub use curl::CurlBackend;
pub use discord::DiscordBackend;
pub use fallback::FallbackNotifier;
pub use log::LogBackend;

use crate::config::Config;
use crate::error::Result;

/// Direct HTTP posting, with the curl fallback behind it when enabled.
pub fn from_config(config: &Config) -> Result<Box<dyn Notifier>> {
    let primary = Box::new(DiscordBackend::new(&config.webhook_url, config.http_timeout)?);
    let fallback = config.curl_fallback.as_deref().map(|bin| {
        Box::new(CurlBackend::new(bin, &config.webhook_url, config.http_timeout)) as Box<dyn Notifier>
    });
    Ok(Box::new(FallbackNotifier::new(primary, fallback)))
}
