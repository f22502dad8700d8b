use chrono::{DateTime, Utc};

/// One article from a feed.
///
/// The link is required: chapters reference the original article, so
/// normalization drops entries that carry no link at all.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Display title; may be empty if the feed omits it.
    pub title: String,
    pub link: String,
    /// Full content body, when the feed provides one.
    pub content: Option<String>,
    /// Short description, used when no content body exists.
    pub summary: Option<String>,
    /// Display-only; no timezone normalization is applied downstream.
    pub published: Option<DateTime<Utc>>,
}

impl Entry {
    /// The best available HTML for this entry: content, then summary, then
    /// a placeholder pointing the reader at the original article.
    pub fn content_html(&self) -> String {
        if let Some(content) = &self.content {
            return content.clone();
        }
        if let Some(summary) = &self.summary {
            return summary.clone();
        }
        let link = html_escape::encode_safe(&self.link);
        format!(
            "<p>Could not retrieve article content. Please visit <a href=\"{link}\">{link}</a></p>"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Entry {
        Entry {
            title: "Title".into(),
            link: "https://example.com/a".into(),
            content: None,
            summary: None,
            published: None,
        }
    }

    #[test]
    fn test_content_html_prefers_content() {
        let mut e = entry();
        e.content = Some("<p>Full</p>".into());
        e.summary = Some("<p>Short</p>".into());
        assert_eq!(e.content_html(), "<p>Full</p>");
    }

    #[test]
    fn test_content_html_falls_back_to_summary() {
        let mut e = entry();
        e.summary = Some("<p>Short</p>".into());
        assert_eq!(e.content_html(), "<p>Short</p>");
    }

    #[test]
    fn test_content_html_placeholder_links_back() {
        let e = entry();
        let html = e.content_html();
        assert!(html.contains("Could not retrieve article content"));
        assert!(html.contains("https://example.com/a"));
    }
}
