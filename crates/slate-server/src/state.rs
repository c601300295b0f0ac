//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::{Arc, RwLock};

use slate_pages::PageGraph;
use slate_storage::{PageStore, StoreError};

/// Application state shared across all handlers.
///
/// The page graph sits behind a single-writer/many-readers lock scoped to
/// the whole graph: resolution takes a read lock, a reload takes the write
/// lock. Mutations are administrative and rare relative to per-request
/// reads, so one coarse lock is the right trade.
pub(crate) struct AppState {
    /// Materialized page graph.
    pub(crate) graph: RwLock<PageGraph>,
    /// Persistence backend the graph was loaded from.
    pub(crate) store: Arc<dyn PageStore>,
    /// Locale assumed for requests that carry none.
    pub(crate) default_locale: Option<String>,
    /// Application version (for ETag computation).
    pub(crate) version: String,
}

impl AppState {
    /// Reload the graph from the store and swap it in.
    ///
    /// Readers holding the old graph finish against it; the write lock is
    /// only held for the swap itself.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub(crate) async fn reload(&self) -> Result<usize, StoreError> {
        let pages = self.store.load_pages().await?;
        let graph = PageGraph::from_pages(pages);
        let count = graph.len();
        *self.graph.write().unwrap() = graph;
        tracing::info!(pages = count, "Reloaded page graph");
        Ok(count)
    }
}
