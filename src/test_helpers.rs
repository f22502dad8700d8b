//! Shared fixtures for the test suite.
//!
//! `MockFetcher` substitutes the network behind the `Fetcher` seam with
//! canned per-URL responses; URLs without a canned response fail the way a
//! dead host would. The image helpers build tiny real encodings in memory
//! so transcoding paths run against genuine bytes.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;

use crate::app::{BinderyError, Result};
use crate::domain::{Entry, Feed, FeedStatus};
use crate::fetcher::Fetcher;

#[derive(Default)]
pub struct MockFetcher {
    responses: HashMap<String, Vec<u8>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: Vec<u8>) -> Self {
        self.responses.insert(url.to_string(), body);
        self
    }

    pub fn into_arc(self) -> Arc<dyn Fetcher + Send + Sync> {
        Arc::new(self)
    }

    fn lookup(&self, url: &str) -> Result<Vec<u8>> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| BinderyError::Other(format!("no canned response for {url}")))
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_feed(&self, url: &str) -> Result<Vec<u8>> {
        self.lookup(url)
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        self.lookup(url)
    }
}

/// A solid-color PNG of the given size, encoded in memory.
pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
    let mut data = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
        .unwrap();
    data
}

pub fn entry(title: &str, link: &str, content: &str) -> Entry {
    Entry {
        title: title.to_string(),
        link: link.to_string(),
        content: Some(content.to_string()),
        summary: None,
        published: None,
    }
}

pub fn feed(title: &str, entries: Vec<Entry>) -> Feed {
    Feed {
        url: format!("https://example.com/{}.xml", title.to_lowercase().replace(' ', "-")),
        title: Some(title.to_string()),
        entries,
        status: FeedStatus::Success,
    }
}
