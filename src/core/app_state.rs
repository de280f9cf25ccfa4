use std::sync::Arc;

use super::cache::MemoCache;
use super::config::Settings;
use super::tools_registry::ToolRegistry;
use super::types::ResultEnvelope;
use crate::scraping::fetcher::{HttpPageFetcher, PageSource};

#[derive(Clone)]
pub struct AppState {
    /// Every outbound page request goes through here; tests swap in fixtures.
    pub pages: Arc<dyn PageSource>,
    /// Finished envelopes of `chapter_details` and `quran_research`, keyed per operation.
    pub cache: Arc<MemoCache<ResultEnvelope>>,
    pub settings: Arc<Settings>,
    pub tool_registry: Arc<ToolRegistry>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("listing_url", &self.settings.listing_url())
            .field("cache", &self.cache)
            .finish()
    }
}

impl AppState {
    /// Live state: pages are fetched over HTTP with the configured connect timeout.
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let fetcher = HttpPageFetcher::with_connect_timeout(settings.connect_timeout)?;
        Ok(Self::with_page_source(settings, Arc::new(fetcher)))
    }

    pub fn with_page_source(settings: Settings, pages: Arc<dyn PageSource>) -> Self {
        Self {
            pages,
            cache: Arc::new(MemoCache::new(settings.cache_capacity)),
            settings: Arc::new(settings),
            tool_registry: Arc::new(ToolRegistry::load()),
        }
    }
}
