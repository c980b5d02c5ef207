use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::Config;

/// A named feed to poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub url: String,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    #[serde(default)]
    name: Option<serde_yaml::Value>,
    #[serde(default)]
    url: Option<serde_yaml::Value>,
}

fn scalar_to_string(value: Option<serde_yaml::Value>) -> String {
    match value {
        Some(serde_yaml::Value::String(s)) => s.trim().to_string(),
        Some(serde_yaml::Value::Number(n)) => n.to_string(),
        Some(serde_yaml::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Parse a YAML list of `{name, url}`. Entries missing either field are dropped.
pub fn parse_sources(yaml: &str) -> Result<Vec<Source>, serde_yaml::Error> {
    let entries: Option<Vec<SourceEntry>> = serde_yaml::from_str(yaml)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|e| {
            let name = scalar_to_string(e.name);
            let url = scalar_to_string(e.url);
            (!name.is_empty() && !url.is_empty()).then(|| Source::new(name, url))
        })
        .collect())
}

/// Read the override file. `None` means "use the defaults": the file is
/// missing, unreadable, malformed, or lists no usable sources.
pub fn load_sources_file(path: &Path) -> Option<Vec<Source>> {
    let data = std::fs::read_to_string(path).ok()?;
    match parse_sources(&data) {
        Ok(sources) if !sources.is_empty() => Some(sources),
        Ok(_) => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read YAML sources");
            None
        }
    }
}

/// Sources for this run: the override file when usable, otherwise the profile defaults.
pub fn resolve(config: &Config) -> Vec<Source> {
    if let Some(sources) = load_sources_file(&config.sources_file) {
        info!(
            path = %config.sources_file.display(),
            count = sources.len(),
            "Using sources from override file"
        );
        return sources;
    }
    config.profile.default_sources(config.nitter_base.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::BotProfile;
    use std::io::Write;

    #[test]
    fn blank_entries_are_dropped() {
        let yaml = r#"
- name: Martin Fowler
  url: https://martinfowler.com/feed.atom
- name: ""
  url: https://example.com/feed
- name: No URL
- url: https://example.com/other
"#;
        let sources = parse_sources(yaml).unwrap();
        assert_eq!(
            sources,
            vec![Source::new("Martin Fowler", "https://martinfowler.com/feed.atom")]
        );
    }

    #[test]
    fn empty_document_parses_to_nothing() {
        assert!(parse_sources("").unwrap().is_empty());
    }

    #[test]
    fn malformed_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name: [unclosed").unwrap();
        assert!(load_sources_file(file.path()).is_none());
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_sources_file(&dir.path().join("nope.yml")).is_none());
    }

    #[test]
    fn resolve_uses_override_file_or_profile_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agile_news_sources.yml");
        let lookup = |key: &str| match key {
            "DISCORD_WEBHOOK_URL" => Some("https://hook".to_string()),
            "NITTER_BASE" => Some("https://nitter.net".to_string()),
            "SOURCES_FILE" => Some(path.display().to_string()),
            _ => None,
        };
        let config = Config::from_lookup(BotProfile::Agile, lookup).unwrap();
        let defaults = BotProfile::Agile.default_sources(Some("https://nitter.net"));
        assert!(defaults.iter().any(|s| s.url.starts_with("https://nitter.net/")));

        // Missing file
        assert_eq!(resolve(&config), defaults);

        // Blank file
        std::fs::write(&path, "   \n").unwrap();
        assert_eq!(resolve(&config), defaults);

        // Usable file replaces defaults, Nitter feeds included
        std::fs::write(&path, "- name: Mine\n  url: https://mine.example/rss\n").unwrap();
        assert_eq!(resolve(&config), vec![Source::new("Mine", "https://mine.example/rss")]);
    }

    #[test]
    fn usable_file_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "- name: Mine\n  url: https://mine.example/rss").unwrap();
        let sources = load_sources_file(file.path()).unwrap();
        assert_eq!(sources, vec![Source::new("Mine", "https://mine.example/rss")]);
    }
}
