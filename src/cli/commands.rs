use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::warn;

use crate::app::{AppContext, BinderyError, Result};
use crate::assembler::Assembler;
use crate::book::epub;
use crate::config::{sources, Config};
use crate::domain::{Feed, FeedStatus};

/// Run the whole pipeline: read the feed list, fetch everything, assemble,
/// and write the EPUB.
pub async fn build(
    ctx: &AppContext,
    feeds_path: Option<&Path>,
    output_dir: Option<&Path>,
) -> Result<()> {
    let list_path = resolve_feeds_path(feeds_path)?;
    println!("Reading feed list from {}", list_path.display());
    let urls = sources::read_sources(&list_path)?;
    if urls.is_empty() {
        return Err(BinderyError::Other(format!(
            "no feed URLs found in {}",
            list_path.display()
        )));
    }
    println!("Found {} feed links", urls.len());

    let feeds = collect_feeds(ctx, &urls).await;
    if feeds.is_empty() {
        println!("Could not retrieve any content from the configured feeds");
        println!("Troubleshooting tips:");
        println!("1. Check your internet connection");
        println!("2. Verify the feed URLs in {}", list_path.display());
        println!("3. Try opening the feed URLs in a web browser");
        println!("4. Some websites may block automated requests");
        return Err(BinderyError::NoContent);
    }

    let mut rng = rand::thread_rng();
    let assembler = Assembler::new(&ctx.localizer, &ctx.config);
    let doc = assembler.assemble(&feeds, &mut rng).await?;

    let out_dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| ctx.config.output.dir.clone());
    std::fs::create_dir_all(&out_dir)?;

    let file_name = format!("RSSFeeds_{}.epub", Local::now().format("%Y%m%d"));
    let out_path = out_dir.join(file_name);
    println!("Writing EPUB to {}", out_path.display());
    epub::write(&doc, &out_path)?;
    restrict_permissions(&out_path);
    println!("EPUB created: {}", out_path.display());

    Ok(())
}

/// Fetch every feed in order, keeping only those that yielded entries.
pub async fn collect_feeds(ctx: &AppContext, urls: &[String]) -> Vec<Feed> {
    let mut feeds = Vec::new();
    for url in urls {
        println!("Fetching feed: {url}");
        let feed = fetch_feed(ctx, url).await;
        match feed.status {
            FeedStatus::Success => {
                println!(
                    "  {} entries from {}",
                    feed.entries.len(),
                    feed.display_title()
                );
                feeds.push(feed);
            }
            FeedStatus::Empty => println!("  Skipping empty feed: {url}"),
            FeedStatus::Error => println!("  Skipping failed feed: {url}"),
        }
    }
    feeds
}

/// Retrieve and normalize one feed. Transport, protocol, and parse failures
/// all degrade to an error-status feed; a bad feed never aborts the run.
pub async fn fetch_feed(ctx: &AppContext, url: &str) -> Feed {
    let body = match ctx.fetcher.fetch_feed(url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(%url, error = %e, "feed fetch failed");
            return Feed::error(url);
        }
    };
    match ctx
        .normalizer
        .normalize(url, &body, ctx.config.fetch.max_entries)
    {
        Ok(feed) => feed,
        Err(e) => {
            warn!(%url, error = %e, "feed parse failed");
            Feed::error(url)
        }
    }
}

pub fn list_sources(feeds_path: Option<&Path>) -> Result<()> {
    let list_path = resolve_feeds_path(feeds_path)?;
    let urls = sources::read_sources(&list_path)?;
    if urls.is_empty() {
        println!("No feed sources in {}", list_path.display());
        return Ok(());
    }
    for url in urls {
        println!("{url}");
    }
    Ok(())
}

fn resolve_feeds_path(cli_path: Option<&Path>) -> Result<PathBuf> {
    match cli_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Config::default_feeds_path()?),
    }
}

/// Owner read/write, group/other read. Best effort only.
#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644)) {
        warn!(path = %path.display(), error = %e, "could not set file permissions");
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockFetcher;
    use std::fs;

    const RSS_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Wire</title>
  <item><title>A</title><link>https://example.com/a</link><description>first</description></item>
  <item><title>B</title><link>https://example.com/b</link><description>second</description></item>
  <item><title>C</title><link>https://example.com/c</link><description>third</description></item>
</channel></rss>"#;

    fn ctx_with(fetcher: MockFetcher) -> AppContext {
        AppContext::with_fetcher(Config::default(), fetcher.into_arc())
    }

    fn write_feed_list(dir: &Path, urls: &[&str]) -> PathBuf {
        let path = dir.join("feeds.txt");
        fs::write(&path, urls.join("\n")).unwrap();
        path
    }

    #[tokio::test]
    async fn test_build_writes_epub_for_one_good_feed() {
        let tmp = tempfile::TempDir::new().unwrap();
        let list = write_feed_list(tmp.path(), &["https://wire.example/feed.xml"]);
        let out_dir = tmp.path().join("out");
        let ctx = ctx_with(
            MockFetcher::new().with("https://wire.example/feed.xml", RSS_BODY.as_bytes().to_vec()),
        );

        build(&ctx, Some(&list), Some(&out_dir)).await.unwrap();

        let entries: Vec<_> = fs::read_dir(&out_dir).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let name = entries[0].as_ref().unwrap().file_name();
        let name = name.to_string_lossy();
        assert!(name.starts_with("RSSFeeds_"));
        assert!(name.ends_with(".epub"));
    }

    #[tokio::test]
    async fn test_build_fails_without_any_usable_feed() {
        let tmp = tempfile::TempDir::new().unwrap();
        let list = write_feed_list(tmp.path(), &["https://wire.example/feed.xml"]);
        let out_dir = tmp.path().join("out");
        // No canned response: the fetch fails like an HTTP 404 would.
        let ctx = ctx_with(MockFetcher::new());

        let result = build(&ctx, Some(&list), Some(&out_dir)).await;

        assert!(matches!(result, Err(BinderyError::NoContent)));
        assert!(!out_dir.exists());
    }

    #[tokio::test]
    async fn test_build_fails_on_empty_feed_list() {
        let tmp = tempfile::TempDir::new().unwrap();
        let list = write_feed_list(tmp.path(), &["# nothing enabled"]);
        let ctx = ctx_with(MockFetcher::new());

        let result = build(&ctx, Some(&list), None).await;

        assert!(matches!(result, Err(BinderyError::Other(_))));
    }

    #[tokio::test]
    async fn test_collect_feeds_isolates_failures() {
        let ctx = ctx_with(
            MockFetcher::new().with("https://wire.example/feed.xml", RSS_BODY.as_bytes().to_vec()),
        );
        let urls = vec![
            "https://down.example/feed.xml".to_string(),
            "https://wire.example/feed.xml".to_string(),
        ];

        let feeds = collect_feeds(&ctx, &urls).await;

        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].display_title(), "Wire");
        assert_eq!(feeds[0].entries.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_feed_degrades_unparseable_body() {
        let ctx = ctx_with(
            MockFetcher::new().with("https://bad.example/feed.xml", b"<html>no feed</html>".to_vec()),
        );

        let feed = fetch_feed(&ctx, "https://bad.example/feed.xml").await;

        assert_eq!(feed.status, FeedStatus::Error);
        assert!(feed.entries.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_feed_caps_entries() {
        let mut config = Config::default();
        config.fetch.max_entries = 2;
        let ctx = AppContext::with_fetcher(
            config,
            MockFetcher::new()
                .with("https://wire.example/feed.xml", RSS_BODY.as_bytes().to_vec())
                .into_arc(),
        );

        let feed = fetch_feed(&ctx, "https://wire.example/feed.xml").await;

        assert_eq!(feed.entries.len(), 2);
    }
}
