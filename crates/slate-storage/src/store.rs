//! Store trait and error type.
//!
//! [`PageStore`] is the seam between the page engine and its persistence
//! backend. The engine only needs enough to materialize a
//! [`PageGraph`](slate_pages::PageGraph), which is a load of all non-deleted
//! pages, plus the write operations the administrative surface attaches to.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slate_pages::{Page, PageId};

/// Storage error with the backend failure as source.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A stored row could not be mapped back to a page.
    #[error("Corrupt page row {id}: {message}")]
    Corrupt {
        /// Row identifier as stored.
        id: String,
        /// What failed to parse.
        message: String,
    },
}

/// Persistence backend for pages.
///
/// `load_pages` must return every non-deleted page; row order is not part
/// of the contract ([`PageGraph::from_pages`](slate_pages::PageGraph::from_pages)
/// accepts any order). Write operations mirror the graph's mutation
/// semantics: removal orphans children rather than cascading.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Load all non-deleted pages.
    async fn load_pages(&self) -> Result<Vec<Page>, StoreError>;

    /// Insert or update a page.
    async fn save_page(&self, page: &Page) -> Result<(), StoreError>;

    /// Stamp a page as soft-deleted.
    async fn soft_delete(&self, id: PageId, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Hard-remove a page, orphaning its children.
    async fn remove_page(&self, id: PageId) -> Result<(), StoreError>;
}
