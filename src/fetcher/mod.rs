pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// Browser-identifying header; several feed hosts reject obvious bots.
pub const FEED_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const IMAGE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const FEED_ACCEPT: &str = "application/rss+xml, application/xml, text/xml, */*";

/// Retrieval seam for feeds and embedded images.
///
/// Both methods return the raw response body; non-2xx statuses are errors.
#[async_trait]
pub trait Fetcher {
    async fn fetch_feed(&self, url: &str) -> Result<Vec<u8>>;
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}
