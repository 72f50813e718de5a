//! Staleness-guarded batch list loading.
//!
//! Every load gets a token from a monotonically increasing counter. Only the
//! result carrying the most recently issued token is committed; older results
//! are dropped whatever order they arrive in. Requests are never cancelled on
//! the wire.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use stockbatch_batches::{BatchSummary, QueryState};

use crate::source::{BatchSource, FetchError};

/// What the view renders for the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub batches: Vec<BatchSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
struct Inner {
    list: ListState,
    latest: u64,
}

/// Loads batch pages and commits only the latest one.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct BatchListFetcher {
    source: Arc<dyn BatchSource>,
    inner: Arc<Mutex<Inner>>,
}

impl BatchListFetcher {
    pub fn new(source: Arc<dyn BatchSource>) -> Self {
        Self {
            source,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub async fn snapshot(&self) -> ListState {
        self.inner.lock().await.list.clone()
    }

    /// Issue a new token and mark the list as loading.
    pub async fn begin(&self, query: &QueryState) -> RequestToken {
        let mut inner = self.inner.lock().await;
        inner.latest += 1;
        inner.list.loading = true;
        inner.list.error = None;

        tracing::info!(token = inner.latest, query = %query.query_string(), "loading batches");
        RequestToken(inner.latest)
    }

    /// Apply a result if `token` is still the latest. Returns whether it was applied.
    ///
    /// Success replaces the list; failure records the message and keeps
    /// whatever list was shown before.
    pub async fn commit(
        &self,
        token: RequestToken,
        result: Result<Vec<BatchSummary>, FetchError>,
    ) -> bool {
        let mut inner = self.inner.lock().await;
        if token.0 != inner.latest {
            tracing::debug!(token = token.0, latest = inner.latest, "discarding stale batch response");
            return false;
        }

        match result {
            Ok(batches) => {
                tracing::info!(token = token.0, count = batches.len(), "batches loaded");
                inner.list.batches = batches;
            }
            Err(err) => {
                tracing::warn!(token = token.0, error = %err, "failed to load batches");
                inner.list.error = Some(err.to_string());
            }
        }
        inner.list.loading = false;
        true
    }

    /// Start loading `query` in the background.
    ///
    /// The handle resolves to whether the response was committed.
    pub async fn load(&self, query: QueryState) -> JoinHandle<bool> {
        let token = self.begin(&query).await;
        let this = self.clone();
        tokio::spawn(async move {
            let result = this.source.list_batches(&query).await;
            this.commit(token, result).await
        })
    }
}
