use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;

use crate::app::Result;
use crate::fetcher::{Fetcher, FEED_ACCEPT, FEED_USER_AGENT, IMAGE_USER_AGENT};

pub struct HttpFetcher {
    client: Client,
    feed_timeout: Duration,
    image_timeout: Duration,
}

impl HttpFetcher {
    pub fn new(feed_timeout: Duration, image_timeout: Duration) -> Self {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            feed_timeout,
            image_timeout,
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(30), Duration::from_secs(10))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_feed(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, FEED_USER_AGENT)
            .header(ACCEPT, FEED_ACCEPT)
            .timeout(self.feed_timeout)
            .send()
            .await?;

        tracing::debug!(%url, status = %response.status(), "feed response");
        response.error_for_status_ref()?;

        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, IMAGE_USER_AGENT)
            .timeout(self.image_timeout)
            .send()
            .await?;

        tracing::debug!(%url, status = %response.status(), "image response");
        response.error_for_status_ref()?;

        Ok(response.bytes().await?.to_vec())
    }
}
