//! Debounced search scheduling.
//!
//! Scoring is cheap but the UI fires on every keystroke, so queries are
//! settled through a short delay: each submission cancels the pending task
//! and schedules a new one, and only the final settled query is scored.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{GroupedResults, SearchIndex};

/// The results of the most recent settled query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebouncedResults {
    /// The query that was scored.
    pub query: String,
    /// The grouped results for that query.
    pub results: GroupedResults,
}

/// A cancellable scheduled search task.
///
/// Each [`submit`](Self::submit) invalidates the previous pending task
/// before scheduling a new one. Settled results are published on a watch
/// channel, so observers always see the latest state and never a stale
/// intermediate query.
#[derive(Debug)]
pub struct SearchDebouncer {
    index: Arc<SearchIndex>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    tx: watch::Sender<DebouncedResults>,
}

impl SearchDebouncer {
    /// Create a debouncer over the given index with the given settle delay.
    #[must_use]
    pub fn new(index: SearchIndex, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(DebouncedResults::default());
        Self {
            index: Arc::new(index),
            delay,
            pending: None,
            tx,
        }
    }

    /// Subscribe to settled results.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DebouncedResults> {
        self.tx.subscribe()
    }

    /// Submit a query, cancelling any pending one.
    ///
    /// The query is scored after the settle delay unless a newer submission
    /// supersedes it first.
    pub fn submit(&mut self, query: impl Into<String>) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let query = query.into();
        let index = Arc::clone(&self.index);
        let delay = self.delay;
        let tx = self.tx.clone();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("scoring settled query '{query}'");
            let results = index.search(&query);
            // Receivers may all be gone; that's fine
            let _ = tx.send(DebouncedResults { query, results });
        }));
    }

    /// Cancel any pending query without scheduling a new one.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Whether a query is currently waiting out its delay.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
