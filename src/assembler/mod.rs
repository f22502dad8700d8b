//! Document assembly.
//!
//! Builds the full document tree from the fetched feeds: metadata, shared
//! stylesheet, cover, table of contents, one section page per feed, and
//! one chapter per entry. Reading order is cover first, then the table of
//! contents, then each feed's section page followed by its chapters.
//!
//! The table of contents is accumulated while feeds are traversed but only
//! inserted (at position 1) once traversal is complete, so its content
//! covers every chapter.

use chrono::Local;
use rand::Rng;

use crate::app::Result;
use crate::book::{BookMeta, DocumentPage, OutputDocument, PackagedAsset};
use crate::config::Config;
use crate::cover::{self, CoverSpec};
use crate::domain::Feed;
use crate::localizer::Localizer;
use crate::sanitizer;

/// Compact typography for small e-reader screens, shared by every page.
const STYLESHEET: &str = "\
body {
    font-family: sans-serif;
    font-size: 0.9em;
    line-height: 1.4;
}
h1 {
    text-align: center;
    font-size: 1.1em;
    margin: 0.8em 0;
}
h2 {
    text-align: center;
    font-size: 0.9em;
    margin: 0.8em 0;
    color: #555;
}
h3 {
    font-size: 0.8em;
    margin: 0.6em 0;
}
p {
    font-size: 0.85em;
    margin: 0.5em 0;
}
img {
    max-width: 100%;
    height: auto;
}
.cover-image {
    display: block;
    margin: 0 auto;
    max-width: 100%;
}
a {
    font-size: 0.8em;
}
.image-container {
    text-align: center;
    margin: 1em 0;
}
";

pub struct Assembler<'a> {
    localizer: &'a Localizer,
    config: &'a Config,
}

impl<'a> Assembler<'a> {
    pub fn new(localizer: &'a Localizer, config: &'a Config) -> Self {
        Self { localizer, config }
    }

    /// Build the output document from all non-empty feeds.
    ///
    /// Feeds without entries are skipped entirely; they appear neither in
    /// the reading order nor in the table of contents.
    pub async fn assemble<R: Rng>(&self, feeds: &[Feed], rng: &mut R) -> Result<OutputDocument> {
        let date = Local::now().format("%Y-%m-%d").to_string();
        let title = format!("RSS Feeds {date}");
        println!("Creating EPUB titled: {title}");

        // A fresh random identifier every run; nothing downstream needs a
        // reproducible one.
        let identifier = uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string();

        let mut doc = OutputDocument::new(BookMeta {
            title,
            identifier,
            language: self.config.book.language.clone(),
            author: self.config.book.author.clone(),
            date: date.clone(),
        });

        doc.add_asset(PackagedAsset {
            id: "style_default".into(),
            href: "style/default.css".into(),
            media_type: "text/css".into(),
            data: STYLESHEET.as_bytes().to_vec(),
        })?;

        let spec = CoverSpec {
            width: self.config.cover.width,
            height: self.config.cover.height,
            block_size: self.config.cover.block_size,
            ..CoverSpec::default()
        };
        doc.add_asset(PackagedAsset {
            id: "cover_image".into(),
            href: "images/cover.png".into(),
            media_type: "image/png".into(),
            data: cover::render_png(&spec, rng)?,
        })?;

        doc.add_page(DocumentPage {
            id: "cover".into(),
            title: "Cover".into(),
            href: "cover.xhtml".into(),
            content: xhtml_page(
                "Cover",
                "<div style=\"text-align: center;\">\n\
                 <img src=\"images/cover.png\" alt=\"Cover\" style=\"max-width: 100%; height: auto;\"/>\n\
                 </div>",
            ),
        })?;

        let mut toc_body = format!("<h1>Contents</h1>\n<p>RSS Collection {date}</p>\n");
        let mut chapter_index = 0usize;

        for (feed_index, feed) in feeds.iter().enumerate() {
            if feed.entries.is_empty() {
                continue;
            }

            let feed_title = feed
                .title
                .clone()
                .unwrap_or_else(|| format!("Feed {}", feed_index + 1));
            toc_body.push_str(&format!("<h2>{}</h2>\n<ul>\n", escape(&feed_title)));

            doc.add_page(DocumentPage {
                id: format!("feed_{feed_index}"),
                title: feed_title.clone(),
                href: format!("feed_{feed_index}.xhtml"),
                content: xhtml_page(&feed_title, &format!("<h1>{}</h1>", escape(&feed_title))),
            })?;

            for (entry_index, entry) in feed.entries.iter().enumerate() {
                chapter_index += 1;
                println!("Processing article: {}", entry.title);

                let content = sanitizer::sanitize(&entry.content_html());
                let prefix = format!("{feed_index}_{entry_index}");
                let content = self.localizer.localize(&content, &mut doc, &prefix).await;

                let href = format!("chapter_{chapter_index}.xhtml");
                let mut body = format!(
                    "<h1>{}</h1>\n<h2>From: {}</h2>\n",
                    escape(&entry.title),
                    escape(&feed_title)
                );
                if let Some(published) = entry.published {
                    body.push_str(&format!(
                        "<p>Published: {}</p>\n",
                        published.format("%Y-%m-%d %H:%M")
                    ));
                }
                body.push_str(&format!(
                    "<p><a href=\"{}\">Original Link</a></p>\n<div>{content}</div>",
                    escape(&entry.link)
                ));

                doc.add_page(DocumentPage {
                    id: format!("chapter_{chapter_index}"),
                    title: entry.title.clone(),
                    href: href.clone(),
                    content: xhtml_page(&entry.title, &body),
                })?;

                toc_body.push_str(&format!(
                    "<li><a href=\"{href}\">{}</a></li>\n",
                    escape(&entry.title)
                ));
            }

            toc_body.push_str("</ul>\n");
        }

        doc.insert_page(
            1,
            DocumentPage {
                id: "toc".into(),
                title: "Contents".into(),
                href: "toc.xhtml".into(),
                content: xhtml_page("Contents", &toc_body),
            },
        )?;

        Ok(doc)
    }
}

fn xhtml_page(title: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <title>{title}</title>
  <link rel="stylesheet" type="text/css" href="style/default.css"/>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

fn escape(value: &str) -> String {
    html_escape::encode_safe(value).to_string()
}
