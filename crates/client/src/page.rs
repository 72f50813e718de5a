//! Batch list page: the state and intents a rendering layer binds to.

use std::sync::Arc;

use tokio::task::JoinHandle;

use stockbatch_batches::{BatchSummary, DownloadOptionsCollector, QueryState, SortOrder};
use stockbatch_core::DomainResult;

use crate::config::{ClientConfig, ConfigError};
use crate::download::{DownloadTrigger, HttpDownloader, export_batch};
use crate::fetcher::{BatchListFetcher, ListState};
use crate::navigation::{NavigableState, QueryStateController};
use crate::source::{BatchSource, HttpBatchSource};

/// Status text above the list.
pub fn summary_line(state: &ListState) -> String {
    if state.loading {
        return "Loading batches...".to_string();
    }
    let n = state.batches.len();
    format!("{} {} found", n, if n == 1 { "batch" } else { "batches" })
}

/// Wires URL state, list loading and the download dialog together.
pub struct BatchesPage {
    controller: QueryStateController,
    fetcher: BatchListFetcher,
    dialog: DownloadOptionsCollector,
    downloads: Arc<dyn DownloadTrigger>,
}

impl BatchesPage {
    pub fn new(
        nav: Arc<dyn NavigableState>,
        source: Arc<dyn BatchSource>,
        downloads: Arc<dyn DownloadTrigger>,
    ) -> Self {
        Self {
            controller: QueryStateController::new(nav),
            fetcher: BatchListFetcher::new(source),
            dialog: DownloadOptionsCollector::new(),
            downloads,
        }
    }

    /// HTTP-backed page for `config`.
    pub fn from_config(config: &ClientConfig, nav: Arc<dyn NavigableState>) -> Result<Self, ConfigError> {
        let source = HttpBatchSource::from_config(config)?;
        let downloads = HttpDownloader::from_config(config)?;
        Ok(Self::new(nav, Arc::new(source), Arc::new(downloads)))
    }

    pub fn query(&self) -> QueryState {
        self.controller.current()
    }

    pub async fn state(&self) -> ListState {
        self.fetcher.snapshot().await
    }

    pub async fn summary_line(&self) -> String {
        summary_line(&self.state().await)
    }

    /// Load the list for the current location. Call after every navigation.
    pub async fn refresh(&self) -> JoinHandle<bool> {
        self.fetcher.load(self.query()).await
    }

    pub async fn change_sort(&self, sort: SortOrder) -> JoinHandle<bool> {
        self.controller.set_sort(sort);
        self.refresh().await
    }

    pub async fn go_to_page(&self, page: u32) -> JoinHandle<bool> {
        self.controller.go_to_page(page);
        self.refresh().await
    }

    pub fn dialog(&self) -> &DownloadOptionsCollector {
        &self.dialog
    }

    pub fn open_download(&mut self, batch: &BatchSummary) {
        self.dialog.open(batch.clone());
    }

    pub fn set_items_per_row(&mut self, raw: &str) {
        self.dialog.set_items_per_row(raw);
    }

    pub fn cancel_download(&mut self) {
        self.dialog.cancel();
    }

    /// Close the dialog and start exactly one download for its target.
    pub fn confirm_download(&mut self) -> DomainResult<()> {
        let confirmed = self.dialog.confirm()?;
        export_batch(
            self.downloads.as_ref(),
            confirmed.batch_id,
            confirmed.items_per_row,
        );
        Ok(())
    }
}
