use glerrors_scanner::{ExtractStrategy, Harvester, PageResult, ProgressCallback, ScanError};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::info;

/// Index page of the OpenGL SDK reference pages
pub const DEFAULT_INDEX_URL: &str = "http://www.opengl.org/sdk/docs/man/xhtml/index.html";

/// Report file written when no output path is given
pub const DEFAULT_OUTPUT_FILE: &str = "GLerrors.txt";

/// Options for configuring a harvest run
pub struct HarvestOptions {
    pub index_url: String,
    pub workers: usize,
    pub timeout_secs: u64,
    pub strategy: ExtractStrategy,
    pub show_progress_bars: bool,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            workers: 4,
            timeout_secs: 10,
            strategy: ExtractStrategy::default(),
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting harvest progress messages
pub type HarvestProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Everything one run produced, in index order
#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    pub index_url: String,
    pub pages: Vec<PageResult>,
}

impl HarvestOutcome {
    pub fn failed_pages(&self) -> impl Iterator<Item = &PageResult> {
        self.pages.iter().filter(|p| !p.is_ok())
    }
}

/// Execute a harvest with the given options.
///
/// Only a failure to fetch or read the index page is returned as an error;
/// page failures are recorded on their `PageResult`.
pub async fn execute_harvest(
    options: HarvestOptions,
    progress_callback: Option<HarvestProgressCallback>,
) -> Result<HarvestOutcome, ScanError> {
    let HarvestOptions {
        index_url,
        workers,
        timeout_secs,
        strategy,
        show_progress_bars,
    } = options;

    if let Some(ref callback) = progress_callback {
        callback(format!("Connecting to: {}", index_url));
    }

    let index_harvester = Harvester::with_timeout(timeout_secs)?;
    let pages = index_harvester.fetch_index(&index_url).await?;
    let total = pages.len();
    info!("Found {} pages on {}", total, index_url);

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} Number of pages parsed: {pos}/{len} [{bar:30.cyan/blue}] {msg}")
                .map_err(|e| ScanError::Other(format!("progress template: {}", e)))?,
        );
        Some(Arc::new(pb))
    } else {
        None
    };

    // Page-level progress goes to the bar when there is one, otherwise to the caller
    let page_progress: ProgressCallback = match (&progress_bar, &progress_callback) {
        (Some(pb), _) => {
            let pb_clone = pb.clone();
            Arc::new(move |_done: usize, _total: usize, result: &PageResult| {
                pb_clone.set_message(result.page.href.clone());
                pb_clone.inc(1);
            })
        }
        (None, Some(callback)) => {
            let callback_clone = callback.clone();
            Arc::new(move |done: usize, total: usize, _result: &PageResult| {
                callback_clone(format!("Number of pages parsed: {}/{}", done, total));
            })
        }
        (None, None) => Arc::new(|_done: usize, _total: usize, _result: &PageResult| {}),
    };

    let harvester = index_harvester
        .with_strategy(strategy)
        .with_progress_callback(page_progress);
    let results = harvester.harvest_pages(&pages, workers).await;

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message("done");
    }

    Ok(HarvestOutcome {
        index_url,
        pages: results,
    })
}
