use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{BinderyError, Result};
use crate::domain::{Entry, Feed, FeedStatus};

/// Converts raw RSS/Atom bytes into the unified [`Feed`] model.
#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse a feed body and keep the first `max_entries` entries.
    ///
    /// Entries without a link are dropped: chapters must reference the
    /// original article. A parse failure is an error; a feed that parses to
    /// zero entries is returned with [`FeedStatus::Empty`].
    pub fn normalize(&self, url: &str, body: &[u8], max_entries: usize) -> Result<Feed> {
        let parsed = parser::parse(body).map_err(|e| BinderyError::FeedParse(e.to_string()))?;

        let title = parsed
            .title
            .map(|t| decode_html_entities(&t.content).to_string());

        let mut entries = Vec::new();
        for entry in parsed.entries.into_iter().take(max_entries) {
            let Some(link) = entry.links.first().map(|l| l.href.clone()) else {
                tracing::debug!(feed = url, "dropping entry without a link");
                continue;
            };

            entries.push(Entry {
                title: entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string())
                    .unwrap_or_default(),
                link,
                content: entry.content.and_then(|c| c.body),
                summary: entry.summary.map(|s| s.content),
                published: entry.published.or(entry.updated),
            });
        }

        let status = if entries.is_empty() {
            tracing::warn!(feed = url, "feed parsed but yielded no entries");
            FeedStatus::Empty
        } else {
            FeedStatus::Success
        };

        Ok(Feed {
            url: url.to_string(),
            title,
            entries,
            status,
        })
    }
}
