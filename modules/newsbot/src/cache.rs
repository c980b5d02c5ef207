use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Links that have already been posted, persisted as `{"links": [...]}`.
///
/// The set only grows. Membership is exact string equality; URLs are not
/// normalised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenCache {
    #[serde(default)]
    links: BTreeSet<String>,
}

impl SeenCache {
    /// Load the cache. A missing or unreadable file is an empty cache.
    pub fn load(path: &Path) -> Self {
        let Ok(data) = std::fs::read_to_string(path) else {
            return SeenCache::default();
        };
        match serde_json::from_str(&data) {
            Ok(cache) => cache,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Seen-link cache is corrupt, starting empty");
                SeenCache::default()
            }
        }
    }

    /// Write the cache, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    /// Returns true if the link was not cached before.
    pub fn insert(&mut self, link: &str) -> bool {
        self.links.insert(link.to_string())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SeenCache::load(&dir.path().join("absent.json")).is_empty());
    }

    #[test]
    fn corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(SeenCache::load(&path).is_empty());
    }

    #[test]
    fn save_creates_parent_dirs_and_sorts_links() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cache").join("bot.json");

        let mut cache = SeenCache::default();
        cache.insert("https://b.example/2");
        cache.insert("https://a.example/1");
        cache.save(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"links":["https://a.example/1","https://b.example/2"]}"#);
        assert_eq!(SeenCache::load(&path), cache);
    }

    #[test]
    fn membership_is_exact() {
        let mut cache = SeenCache::default();
        cache.insert("https://example.com/post");
        assert!(cache.contains("https://example.com/post"));
        assert!(!cache.contains("https://example.com/post/"));
        assert!(!cache.contains("HTTPS://example.com/post"));
    }

    #[test]
    fn ignores_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, r#"{"links": ["x", "y"], "extra": 1}"#).unwrap();
        let cache = SeenCache::load(&path);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("x"));
    }
}
