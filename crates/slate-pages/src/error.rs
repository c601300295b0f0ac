//! Error types for graph mutation and resolution.

use crate::page::PageId;

/// Error returned when a structural mutation is rejected.
///
/// Mutations are all-or-nothing: when any of these is returned the graph is
/// unchanged. Self-parenting is deliberately absent from this enum; setting
/// a page as its own parent is a silent no-op, not an error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Reparenting would make a page its own ancestor.
    #[error("Reparenting {page} under {new_parent} would create a cycle")]
    Cycle {
        /// Page being reparented.
        page: PageId,
        /// Requested parent, a descendant of `page`.
        new_parent: PageId,
    },
    /// A sibling in the same scope already uses the slug.
    #[error("A sibling page already uses the slug {slug:?}")]
    DuplicateSlug {
        /// The colliding slug.
        slug: String,
    },
    /// The referenced page is not part of this graph.
    #[error("Unknown page: {0}")]
    UnknownPage(PageId),
}

/// Error returned when resolution produces no page.
///
/// These are expected, frequent outcomes (they map to a 404 at the HTTP
/// boundary) and are represented as result variants rather than panics.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No visible page matches the requested slug path.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// No homepage candidate matches any precedence tier.
    #[error(
        "No homepage has been configured. Please check your existing pages \
         or create a homepage in your application."
    )]
    NoHomepage,
}
