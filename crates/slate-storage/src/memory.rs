//! In-memory page store for testing.
//!
//! Provides [`MemoryStore`] so the server and graph-loading paths can be
//! exercised without a database. Use the builder methods to seed test data.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slate_pages::{Page, PageId};

use crate::store::{PageStore, StoreError};

/// In-memory store, insertion-ordered.
///
/// # Example
///
/// ```
/// use slate_pages::Page;
/// use slate_storage::MemoryStore;
///
/// let store = MemoryStore::new()
///     .with_page(Page::new("Home").enabled().as_homepage())
///     .with_page(Page::new("About").enabled());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: RwLock<Vec<Page>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, page: Page) -> Self {
        self.pages.write().unwrap().push(page);
        self
    }
}

#[async_trait]
impl PageStore for MemoryStore {
    async fn load_pages(&self) -> Result<Vec<Page>, StoreError> {
        Ok(self
            .pages
            .read()
            .unwrap()
            .iter()
            .filter(|page| page.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn save_page(&self, page: &Page) -> Result<(), StoreError> {
        let mut pages = self.pages.write().unwrap();
        if let Some(existing) = pages.iter_mut().find(|other| other.id == page.id) {
            *existing = page.clone();
        } else {
            pages.push(page.clone());
        }
        Ok(())
    }

    async fn soft_delete(&self, id: PageId, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut pages = self.pages.write().unwrap();
        if let Some(page) = pages.iter_mut().find(|page| page.id == id) {
            page.deleted_at = Some(at);
        }
        Ok(())
    }

    async fn remove_page(&self, id: PageId) -> Result<(), StoreError> {
        let mut pages = self.pages.write().unwrap();
        for page in pages.iter_mut() {
            if page.parent == Some(id) {
                page.parent = None;
            }
        }
        pages.retain(|page| page.id != id);
        Ok(())
    }
}
