//! Page persistence for Slate.
//!
//! The engine consumes storage through the [`PageStore`] trait: load the
//! non-deleted pages, hand them to
//! [`PageGraph::from_pages`](slate_pages::PageGraph::from_pages), serve from
//! the materialized graph. Two backends are provided:
//!
//! - [`SqliteStore`]: sqlx-backed SQLite storage
//! - [`MemoryStore`]: in-memory store for tests

mod memory;
mod sqlite;
mod store;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{PageStore, StoreError};
