use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::sources::Source;

/// Which bot this run is. A profile supplies the defaults that differ between
/// bots; everything else is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BotProfile {
    Agile,
    Growth,
}

impl fmt::Display for BotProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Agile => write!(f, "agile"),
            Self::Growth => write!(f, "growth"),
        }
    }
}

impl BotProfile {
    /// Name used as the heartbeat prefix and heartbeat embed title.
    pub fn bot_title(&self) -> &'static str {
        match self {
            Self::Agile => "Agile News Bot",
            Self::Growth => "Growth News Bot",
        }
    }

    /// Embed title used when an entry has no title of its own.
    pub fn embed_title(&self) -> &'static str {
        match self {
            Self::Agile => "Agile News",
            Self::Growth => "Growth News",
        }
    }

    pub fn default_window_hours(&self) -> f64 {
        match self {
            Self::Agile => 12.0,
            Self::Growth => 72.0,
        }
    }

    pub fn default_cache_path(&self) -> PathBuf {
        PathBuf::from(format!(".cache/{self}_news_bot.json"))
    }

    pub fn default_sources_file(&self) -> PathBuf {
        PathBuf::from(format!("config/{self}_news_sources.yml"))
    }

    /// Built-in feed list, plus X accounts via Nitter when a base URL is given.
    pub fn default_sources(&self, nitter_base: Option<&str>) -> Vec<Source> {
        let feeds: &[(&str, &str)] = match self {
            Self::Agile => &[
                ("Scrum.org", "https://www.scrum.org/resources/rss.xml"),
                ("InfoQ Agile", "https://www.infoq.com/agile/rss/"),
                ("Martin Fowler", "https://martinfowler.com/feed.atom"),
                ("Scrum Alliance", "https://resources.scrumalliance.org/feed"),
                ("Agile Alliance", "https://www.agilealliance.org/feed/"),
                (
                    "Mike Cohn (Mountain Goat)",
                    "https://www.mountaingoatsoftware.com/blog/rss",
                ),
                ("Kanban University", "https://kanban.university/blog/feed/"),
                ("r/agile", "https://www.reddit.com/r/agile/.rss"),
                ("r/scrum", "https://www.reddit.com/r/scrum/.rss"),
            ],
            Self::Growth => &[
                ("Andrew Chen", "https://andrewchen.com/feed/"),
                ("Lenny's Newsletter", "https://www.lennysnewsletter.com/feed"),
                ("Neil Patel", "https://neilpatel.com/blog/feed/"),
                ("Backlinko (Brian Dean)", "https://backlinko.com/feed"),
                ("Growth Marketing Pro", "https://www.growthmarketingpro.com/feed/"),
                ("Nir & Far (Nir Eyal)", "https://www.nirandfar.com/feed/"),
            ],
        };

        let mut sources: Vec<Source> = feeds.iter().map(|(n, u)| Source::new(*n, *u)).collect();

        if let Some(base) = nitter_base.map(str::trim).filter(|b| !b.is_empty()) {
            let base = base.trim_end_matches('/');
            for (name, handle) in self.nitter_accounts() {
                sources.push(Source::new(*name, format!("{base}/{handle}/rss")));
            }
        }

        sources
    }

    fn nitter_accounts(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Agile => &[
                ("Jeff Sutherland (X)", "jeffsutherland"),
                ("Ken Schwaber (X)", "kschwaber"),
            ],
            Self::Growth => &[
                ("Andrew Chen (X)", "andrewchen"),
                ("Sean Ellis (X)", "SeanEllis"),
            ],
        }
    }
}
