use crate::error::{Result, ScanError};
use crate::index::discover_pages;
use crate::page::{ExtractStrategy, extract_page};
use crate::result::{PageExtract, PageRef, PageResult};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Called after each page finishes: (pages done, pages total, result)
pub type ProgressCallback = Arc<dyn Fn(usize, usize, &PageResult) + Send + Sync>;

pub struct Harvester {
    client: Client,
    strategy: ExtractStrategy,
    progress_callback: Option<ProgressCallback>,
}

impl Harvester {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("glerrors/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            strategy: ExtractStrategy::default(),
            progress_callback: None,
        })
    }

    pub fn with_strategy(mut self, strategy: ExtractStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Download the index page and list the function pages it links to
    pub async fn fetch_index(&self, index_url: &str) -> Result<Vec<PageRef>> {
        Url::parse(index_url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", index_url, e)))?;

        let (_, body) = self.fetch_text(index_url).await?;
        let pages = discover_pages(&body, index_url)?;
        info!("Index {} lists {} pages", index_url, pages.len());

        Ok(pages)
    }

    /// Fetch every page with at most `workers` requests in flight.
    ///
    /// Results come back in the same order as `pages`.
    pub async fn harvest_pages(&self, pages: &[PageRef], workers: usize) -> Vec<PageResult> {
        let total = pages.len();
        let workers = workers.max(1);
        debug!("Harvesting {} pages with {} workers", total, workers);

        let mut in_flight = stream::iter(pages.iter().cloned())
            .map(|page| self.fetch_page(page))
            .buffered(workers);

        let mut results = Vec::with_capacity(total);
        while let Some(result) = in_flight.next().await {
            if let Some(ref callback) = self.progress_callback {
                callback(results.len() + 1, total, &result);
            }
            results.push(result);
        }

        let failed = results.iter().filter(|r| !r.is_ok()).count();
        info!("Harvest complete. {} pages, {} failed", total, failed);
        results
    }

    /// Fetch and extract a single page. Failures are recorded on the result,
    /// never returned, so one bad page cannot stop a run.
    pub async fn fetch_page(&self, page: PageRef) -> PageResult {
        match self.fetch_and_extract(&page.url).await {
            Ok((status_code, extract)) => {
                let mut result = PageResult::new(page);
                result.status_code = status_code;
                result.extract = extract;
                result
            }
            Err(e) => {
                warn!("Skipping {}: {}", page.url, e);
                let status_code = match e {
                    ScanError::HttpError(ref http) => http.status().map(|s| s.as_u16()),
                    _ => None,
                };
                let mut result = PageResult::with_error(page, e.to_string());
                result.status_code = status_code.unwrap_or(0);
                result
            }
        }
    }

    async fn fetch_and_extract(&self, url: &str) -> Result<(u16, PageExtract)> {
        let (status_code, body) = self.fetch_text(url).await?;
        let extract = extract_page(&body, self.strategy)?;
        debug!(
            "{}: {} signatures, {} errors",
            url,
            extract.signatures.len(),
            extract.errors.len()
        );
        Ok((status_code, extract))
    }

    async fn fetch_text(&self, url: &str) -> Result<(u16, String)> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        Ok((status_code, body))
    }
}
