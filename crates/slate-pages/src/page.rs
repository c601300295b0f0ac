//! Page entity.
//!
//! [`Page`] is the unit of content: a titled payload addressed by a slug,
//! optionally scoped to a host and locale, and linked to a parent page.
//! Parent/child structure is owned by [`PageGraph`](crate::PageGraph);
//! a page only carries the upward pointer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug;

/// Opaque page identifier, assigned on creation and immutable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId(Uuid);

impl PageId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (e.g. one read back from storage).
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A content page.
///
/// Created disabled and without the homepage flag; both are opt-in.
/// `content`, `css` and `js` are free-form payloads the engine never
/// interprets, as are the meta fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Unique identifier, immutable after creation.
    pub id: PageId,
    /// URL-safe identifier, unique among siblings.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Main content payload.
    pub content: Option<String>,
    /// Page-specific stylesheet payload.
    pub css: Option<String>,
    /// Page-specific script payload.
    pub js: Option<String>,
    /// Meta title override.
    pub meta_title: Option<String>,
    /// Meta description.
    pub meta_description: Option<String>,
    /// Meta keywords.
    pub meta_keywords: Option<String>,
    /// Host this page is scoped to (homepage selection only).
    pub host: Option<String>,
    /// Locale this page is scoped to (homepage selection only).
    pub locale: Option<String>,
    /// Whether this page is a homepage candidate.
    pub homepage: bool,
    /// Disabled pages exist in the graph but are excluded from resolution.
    pub enabled: bool,
    /// Soft-delete timestamp; set means excluded from resolution.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Parent page, if any. The graph keeps the inverse view.
    pub parent: Option<PageId>,
    /// Creation timestamp, stamped once.
    pub created_at: DateTime<Utc>,
}

impl Page {
    /// Create a page with a fresh id and a slug derived from the title.
    ///
    /// The page starts disabled, not a homepage candidate, not deleted,
    /// and without a parent.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: PageId::new(),
            slug: slug::normalize(&title),
            title,
            content: None,
            css: None,
            js: None,
            meta_title: None,
            meta_description: None,
            meta_keywords: None,
            host: None,
            locale: None,
            homepage: false,
            enabled: false,
            deleted_at: None,
            parent: None,
            created_at: Utc::now(),
        }
    }

    /// Override the derived slug.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Set the content payload.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Scope to a host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Scope to a locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Mark as a homepage candidate.
    #[must_use]
    pub fn as_homepage(mut self) -> Self {
        self.homepage = true;
        self
    }

    /// Enable the page.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Set the parent pointer.
    ///
    /// Only meaningful before the page is inserted into a graph; afterwards
    /// use [`PageGraph::set_parent`](crate::PageGraph::set_parent) so the
    /// inverse view stays consistent.
    #[must_use]
    pub fn with_parent(mut self, parent: PageId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Whether this page participates in resolution.
    ///
    /// A page is visible when it is enabled and not soft-deleted. The
    /// predicate is applied at every traversal step.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.enabled && self.deleted_at.is_none()
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_defaults() {
        let page = Page::new("My homepage");

        assert!(!page.enabled);
        assert!(!page.homepage);
        assert!(page.deleted_at.is_none());
        assert!(page.parent.is_none());
        assert_eq!(page.slug, "my-homepage");
    }

    #[test]
    fn test_new_page_stamps_created_at() {
        let before = Utc::now();
        let page = Page::new("Stamped");

        assert!(page.created_at >= before);
        assert!(page.created_at <= Utc::now());
    }

    #[test]
    fn test_with_slug_overrides_derived_slug() {
        let page = Page::new("My homepage").with_slug("home");

        assert_eq!(page.slug, "home");
    }

    #[test]
    fn test_display_is_title() {
        let page = Page::new("My homepage");

        assert_eq!(page.to_string(), "My homepage");
    }

    #[test]
    fn test_is_visible_requires_enabled() {
        let page = Page::new("Hidden");

        assert!(!page.is_visible());
        assert!(page.clone().enabled().is_visible());
    }

    #[test]
    fn test_is_visible_excludes_soft_deleted() {
        let mut page = Page::new("Deleted").enabled();
        page.deleted_at = Some(Utc::now());

        assert!(!page.is_visible());
    }

    #[test]
    fn test_page_ids_are_unique() {
        assert_ne!(Page::new("a").id, Page::new("a").id);
    }
}
