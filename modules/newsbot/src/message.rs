use discord_webhook::{Embed, WebhookPayload, MAX_CONTENT_CHARS};

use crate::feed::FeedEntry;
use crate::profile::BotProfile;

/// Posted messages stay a little under Discord's content limit.
pub const MESSAGE_LIMIT: usize = MAX_CONTENT_CHARS - 100;
pub const TRANSLATION_INPUT_LIMIT: usize = 800;
pub const TRANSLATION_LIMIT: usize = 900;

const NO_TITLE: &str = "(no title)";
const PUBLISHED_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Clamp `s` to `limit` characters, marking the cut with `...`.
pub fn ensure_len(s: &str, limit: usize) -> String {
    if s.chars().count() <= limit {
        return s.to_string();
    }
    let mut out: String = s.chars().take(limit.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// A rendered item, ready to be turned into a webhook payload.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub content: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub footer: Option<String>,
}

impl OutgoingMessage {
    /// Plain `content`, or one rich embed when `use_embeds` is set and there is
    /// a title or URL to show.
    pub fn to_payload(&self, use_embeds: bool, fallback_title: &str) -> WebhookPayload {
        if use_embeds && (self.title.is_some() || self.url.is_some()) {
            let embed = Embed::rich(self.title.clone().unwrap_or_else(|| fallback_title.to_string()))
                .url(self.url.clone())
                .description(self.content.clone())
                .footer(self.footer.clone());
            WebhookPayload::embed(embed)
        } else {
            WebhookPayload::text(self.content.clone())
        }
    }
}

/// Text sent to the translator for an entry.
pub fn translation_input(entry: &FeedEntry) -> String {
    let title = entry.title.as_deref().unwrap_or(NO_TITLE);
    let summary = entry.summary.as_deref().unwrap_or_default();
    ensure_len(&format!("{title}\n{summary}"), TRANSLATION_INPUT_LIMIT)
}

pub fn render_entry(source: &str, entry: &FeedEntry, translation: Option<&str>) -> OutgoingMessage {
    let title = entry.title.as_deref().unwrap_or(NO_TITLE);
    let link = entry.link.as_deref().unwrap_or_default();
    let published = entry
        .published
        .map(|ts| ts.format(PUBLISHED_FORMAT).to_string());

    let mut content = format!("[{source}] {title}\n{link}");
    if let Some(published) = &published {
        content.push_str(&format!("\nPublished: {published}"));
    }
    if let Some(translation) = translation.filter(|t| !t.trim().is_empty()) {
        content.push_str("\n\n[번역]\n");
        content.push_str(&ensure_len(translation, TRANSLATION_LIMIT));
    }

    let footer = match &published {
        Some(published) => format!("{source} • {published}"),
        None => source.to_string(),
    };

    OutgoingMessage {
        content: ensure_len(&content, MESSAGE_LIMIT),
        title: Some(title.to_string()),
        url: Some(link.to_string()).filter(|l| !l.is_empty()),
        footer: Some(footer),
    }
}

/// Posted when a run finds nothing, so a silent failure is visible.
pub fn heartbeat(profile: BotProfile, window_hours: f64) -> OutgoingMessage {
    let title = profile.bot_title();
    OutgoingMessage {
        content: format!(
            "[{title}] 최근 {}시간 동안 새 항목이 없습니다.",
            window_hours.trunc() as i64
        ),
        title: Some(title.to_string()),
        url: None,
        footer: Some("heartbeat".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry() -> FeedEntry {
        FeedEntry {
            title: Some("Scaling Scrum".to_string()),
            link: Some("https://example.com/scaling".to_string()),
            published: Some(Utc.with_ymd_and_hms(2025, 6, 10, 4, 5, 0).unwrap()),
            summary: Some("How teams grow".to_string()),
        }
    }

    #[test]
    fn ensure_len_counts_chars_not_bytes() {
        let korean = "가".repeat(10);
        assert_eq!(ensure_len(&korean, 10), korean);
        let cut = ensure_len(&korean, 5);
        assert_eq!(cut, "가가...");
        assert_eq!(cut.chars().count(), 5);
    }

    #[test]
    fn ensure_len_keeps_short_strings() {
        assert_eq!(ensure_len("abc", 3), "abc");
        assert_eq!(ensure_len("abcd", 3), "...");
    }

    #[test]
    fn renders_source_title_link_and_date() {
        let msg = render_entry("InfoQ Agile", &entry(), None);
        assert_eq!(
            msg.content,
            "[InfoQ Agile] Scaling Scrum\nhttps://example.com/scaling\nPublished: 2025-06-10 04:05 UTC"
        );
        assert_eq!(msg.footer.as_deref(), Some("InfoQ Agile • 2025-06-10 04:05 UTC"));
        assert_eq!(msg.url.as_deref(), Some("https://example.com/scaling"));
    }

    #[test]
    fn translation_is_appended_and_clamped() {
        let long = "번".repeat(2000);
        let msg = render_entry("S", &entry(), Some(&long));
        let translated = msg.content.split("\n\n[번역]\n").nth(1).unwrap();
        assert_eq!(translated.chars().count(), TRANSLATION_LIMIT);
        assert!(translated.ends_with("..."));
    }

    #[test]
    fn whole_message_is_clamped() {
        let mut e = entry();
        e.title = Some("T".repeat(3000));
        let msg = render_entry("S", &e, None);
        assert_eq!(msg.content.chars().count(), MESSAGE_LIMIT);
        assert!(msg.content.ends_with("..."));
    }

    #[test]
    fn undated_untitled_entry() {
        let e = FeedEntry {
            link: Some("https://example.com/x".to_string()),
            ..Default::default()
        };
        let msg = render_entry("S", &e, None);
        assert_eq!(msg.content, "[S] (no title)\nhttps://example.com/x");
        assert_eq!(msg.footer.as_deref(), Some("S"));
    }

    #[test]
    fn translation_input_is_clamped() {
        let mut e = entry();
        e.summary = Some("x".repeat(5000));
        let input = translation_input(&e);
        assert!(input.starts_with("Scaling Scrum\n"));
        assert_eq!(input.chars().count(), TRANSLATION_INPUT_LIMIT);
    }

    #[test]
    fn heartbeat_truncates_window() {
        let msg = heartbeat(BotProfile::Growth, 72.9);
        assert_eq!(msg.content, "[Growth News Bot] 최근 72시간 동안 새 항목이 없습니다.");
        assert_eq!(msg.footer.as_deref(), Some("heartbeat"));
    }

    #[test]
    fn payload_shape_depends_on_embed_flag() {
        let msg = render_entry("S", &entry(), None);

        let plain = msg.to_payload(false, "Agile News");
        assert_eq!(plain.content.as_deref(), Some(msg.content.as_str()));
        assert!(plain.embeds.is_empty());

        let rich = msg.to_payload(true, "Agile News");
        assert!(rich.content.is_none());
        assert_eq!(rich.embeds[0].title.as_deref(), Some("Scaling Scrum"));
        assert_eq!(rich.embeds[0].description.as_deref(), Some(msg.content.as_str()));
    }
}
