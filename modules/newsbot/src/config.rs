use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;
use translate_client::Backend;

use crate::error::{NewsBotError, Result};
use crate::profile::BotProfile;

/// Run configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub profile: BotProfile,

    // Discord
    pub webhook_url: String,
    pub use_embeds: bool,
    pub curl_fallback: Option<String>,
    pub post_delay: Duration,

    // Selection
    pub window_hours: f64,
    pub daily_count: usize,
    pub max_per_source: usize,
    pub per_feed_limit: usize,

    // Files
    pub cache_path: PathBuf,
    pub sources_file: PathBuf,

    // Feeds
    pub nitter_base: Option<String>,
    pub http_timeout: Duration,

    pub translate: TranslateConfig,
}

/// Optional machine translation of each posted item.
#[derive(Debug, Clone, Default)]
pub struct TranslateConfig {
    pub target: Option<String>,
    pub backend: Option<Backend>,
    pub deepl_api_key: Option<String>,
    pub libre_url: Option<String>,
    pub libre_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub openai_api_base: Option<String>,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env(profile: BotProfile) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(profile, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(profile: BotProfile, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let webhook_url =
            get("DISCORD_WEBHOOK_URL").ok_or_else(|| NewsBotError::MissingEnv("DISCORD_WEBHOOK_URL".into()))?;

        let curl_fallback = if parse_or(&get, "DISCORD_CURL_FALLBACK", true, parse_flag)? {
            Some(get("CURL_BIN").unwrap_or_else(|| "curl".to_string()))
        } else {
            None
        };

        let translate = TranslateConfig {
            target: get("TRANSLATE_TO").map(|t| t.to_lowercase()),
            backend: get("TRANSLATE_BACKEND").and_then(|b| match b.parse::<Backend>() {
                Ok(backend) => Some(backend),
                Err(e) => {
                    warn!(error = %e, "Ignoring TRANSLATE_BACKEND");
                    None
                }
            }),
            deepl_api_key: get("DEEPL_API_KEY"),
            libre_url: get("LIBRETRANSLATE_URL"),
            libre_api_key: get("LIBRETRANSLATE_API_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL"),
            openai_api_base: get("OPENAI_API_BASE"),
        };

        let window_hours = parse_or(
            &get,
            "POST_WINDOW_HOURS",
            profile.default_window_hours(),
            parse_number::<f64>,
        )?;
        if !window_hours.is_finite() || window_hours < 0.0 {
            return Err(NewsBotError::InvalidEnv {
                key: "POST_WINDOW_HOURS".into(),
                value: window_hours.to_string(),
            });
        }

        Ok(Self {
            profile,
            webhook_url,
            use_embeds: parse_or(&get, "DISCORD_USE_EMBEDS", false, parse_flag)?,
            curl_fallback,
            post_delay: Duration::from_millis(parse_or(&get, "POST_DELAY_MS", 1200, parse_number::<u64>)?),
            window_hours,
            daily_count: parse_or(&get, "DAILY_COUNT", 3, parse_number::<usize>)?,
            max_per_source: parse_or(&get, "MAX_PER_SOURCE", 1, parse_number::<usize>)?,
            per_feed_limit: parse_or(&get, "PER_FEED_LIMIT", 5, parse_number::<usize>)?,
            cache_path: get("CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| profile.default_cache_path()),
            sources_file: get("SOURCES_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| profile.default_sources_file()),
            nitter_base: get("NITTER_BASE"),
            http_timeout: Duration::from_secs(parse_or(&get, "HTTP_TIMEOUT_SECS", 15, parse_number::<u64>)?),
            translate,
        })
    }

    /// Log the effective configuration with secrets cut down to a prefix.
    pub fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let n = val.chars().count().min(5);
            let head: String = val.chars().take(n).collect();
            format!("{}...({} chars)", head, val.chars().count())
        }
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => preview(v),
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded (profile={}):", self.profile);
        tracing::info!("  DISCORD_WEBHOOK_URL: {}", preview(&self.webhook_url));
        tracing::info!(
            "  window={}h daily_count={} max_per_source={} per_feed_limit={}",
            self.window_hours,
            self.daily_count,
            self.max_per_source,
            self.per_feed_limit
        );
        tracing::info!("  CACHE_PATH: {}", self.cache_path.display());
        tracing::info!("  SOURCES_FILE: {}", self.sources_file.display());
        tracing::info!("  embeds={} curl_fallback={:?}", self.use_embeds, self.curl_fallback);
        tracing::info!("  TRANSLATE_TO: {:?}", self.translate.target);
        tracing::info!("  DEEPL_API_KEY: {}", preview_opt(&self.translate.deepl_api_key));
        tracing::info!("  LIBRETRANSLATE_URL: {:?}", self.translate.libre_url);
        tracing::info!("  OPENAI_API_KEY: {}", preview_opt(&self.translate.openai_api_key));
    }
}

fn parse_or<G, T>(get: &G, key: &str, default: T, parse: fn(&str) -> Option<T>) -> Result<T>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => parse(&raw).ok_or_else(|| NewsBotError::InvalidEnv {
            key: key.to_string(),
            value: raw,
        }),
    }
}

fn parse_number<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
