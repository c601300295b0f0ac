//! Page tree, path resolution and homepage selection for Slate.
//!
//! This crate is the pure core of the engine: it holds pages in an
//! in-memory forest ([`PageGraph`]), resolves slug paths to pages
//! ([`resolve`]), and picks the homepage for a request context
//! ([`select_homepage`]). It performs no I/O and never suspends;
//! persistence and HTTP live in sibling crates and hand it a materialized
//! graph snapshot.
//!
//! # Concurrency
//!
//! Reads are `&self` and may run concurrently. Structural mutations are
//! `&mut self`, so exclusive access for the duration of a mutation comes
//! for free from the borrow rules; callers sharing a graph across threads
//! wrap it in a single-writer lock (see `slate-server`).
//!
//! # Example
//!
//! ```
//! use slate_pages::{Page, PageGraph, RequestContext, resolve};
//!
//! let mut graph = PageGraph::new();
//! let root = graph.insert(Page::new("Root").enabled()).unwrap();
//! graph
//!     .insert(Page::new("First level").enabled().with_parent(root))
//!     .unwrap();
//!
//! let page = resolve(&graph, &["root", "first-level"], &RequestContext::new()).unwrap();
//! assert_eq!(page.title, "First level");
//! ```

mod context;
mod error;
mod graph;
mod page;
mod resolve;
pub mod slug;

pub use context::RequestContext;
pub use error::{GraphError, ResolveError};
pub use graph::PageGraph;
pub use page::{Page, PageId};
pub use resolve::{resolve, select_homepage};
