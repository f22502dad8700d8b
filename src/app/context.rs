use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::localizer::Localizer;
use crate::normalizer::Normalizer;

/// Wires together the pipeline components for one run.
pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub normalizer: Normalizer,
    pub localizer: Localizer,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(
            Duration::from_secs(config.fetch.feed_timeout_secs),
            Duration::from_secs(config.fetch.image_timeout_secs),
        ));
        Self::with_fetcher(config, fetcher)
    }

    /// Build a context around a custom fetcher; tests substitute a mock here.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let localizer = Localizer::new(fetcher.clone());
        Self {
            config,
            fetcher,
            normalizer: Normalizer::new(),
            localizer,
        }
    }
}
