use crate::domain::Entry;

/// Outcome of one fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Fetched and parsed with at least one entry.
    Success,
    /// Fetched and parsed, but no usable entries.
    Empty,
    /// Transport, protocol, or parse failure.
    Error,
}

#[derive(Debug, Clone)]
pub struct Feed {
    pub url: String,
    pub title: Option<String>,
    pub entries: Vec<Entry>,
    pub status: FeedStatus,
}

impl Feed {
    /// A feed whose fetch failed; carries no entries and is skippable.
    pub fn error(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: None,
            entries: Vec::new(),
            status: FeedStatus::Error,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }
}
