//! In-memory page forest.
//!
//! [`PageGraph`] holds the authoritative set of pages and their structure.
//! The parent pointer stored on each [`Page`] is the single source of truth;
//! child lists and the per-scope slug index are maintained views that every
//! mutation keeps consistent.
//!
//! # Architecture
//!
//! Pages live in a `HashMap<PageId, Page>`. Two derived indices are kept in
//! step:
//! - `children`: insertion-ordered child lists per scope, where the `None`
//!   scope holds the roots
//! - `by_slug`: `(scope, slug) -> PageId` for O(1) per-segment lookups, so
//!   path resolution costs O(path length) regardless of fan-out
//!
//! Every structural mutation validates first and commits second; a rejected
//! mutation leaves the graph untouched.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::GraphError;
use crate::page::{Page, PageId};

/// Sibling scope: `None` for root pages, `Some(parent)` otherwise.
type Scope = Option<PageId>;

/// The page forest.
#[derive(Debug, Default)]
pub struct PageGraph {
    pages: HashMap<PageId, Page>,
    /// Insertion order of all pages; gives reads a stable iteration order.
    order: Vec<PageId>,
    /// Child lists per scope, insertion-ordered. `None` holds the roots.
    children: HashMap<Scope, Vec<PageId>>,
    /// Slug lookup per scope. On an invariant breach (orphaning collision)
    /// the first mapping wins; see `orphan_children`.
    by_slug: HashMap<Scope, HashMap<String, PageId>>,
}

impl PageGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages in the graph, including disabled and soft-deleted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the graph holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get a page by id.
    #[must_use]
    pub fn get(&self, id: PageId) -> Option<&Page> {
        self.pages.get(&id)
    }

    /// Root pages (no parent), in insertion order.
    #[must_use]
    pub fn roots(&self) -> Vec<&Page> {
        self.scope_members(None)
    }

    /// Children of a page, in insertion order.
    ///
    /// Unknown ids yield an empty list.
    #[must_use]
    pub fn children_of(&self, id: PageId) -> Vec<&Page> {
        self.scope_members(Some(id))
    }

    /// All pages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.order.iter().map(|id| &self.pages[id])
    }

    /// Visible homepage candidates, in insertion order.
    ///
    /// The candidate set is flat: tree position is irrelevant to homepage
    /// selection.
    #[must_use]
    pub fn homepage_candidates(&self) -> Vec<&Page> {
        self.iter()
            .filter(|page| page.homepage && page.is_visible())
            .collect()
    }

    /// Full slug path of a page, from root to the page itself.
    ///
    /// Returns `None` for unknown ids.
    #[must_use]
    pub fn tree_path(&self, id: PageId) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(i) = current {
            let page = self.pages.get(&i)?;
            segments.push(page.slug.as_str());
            current = page.parent;
        }
        segments.reverse();
        Some(segments.join("/"))
    }

    /// Walk a slug path from the roots, segment by segment.
    ///
    /// Each segment must exactly match the slug of a visible page whose
    /// parent is the page matched by the previous segment (a root for the
    /// first segment). There is no partial matching and no level skipping;
    /// an empty segment list matches nothing (homepage requests are handled
    /// by [`select_homepage`](crate::select_homepage)).
    #[must_use]
    pub fn find_by_slug_path<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Page> {
        if segments.is_empty() {
            return None;
        }

        let mut scope: Scope = None;
        let mut matched = None;
        for segment in segments {
            let id = *self.by_slug.get(&scope)?.get(segment.as_ref())?;
            let page = &self.pages[&id];
            if !page.is_visible() {
                return None;
            }
            scope = Some(id);
            matched = Some(page);
        }
        matched
    }

    /// Insert a page.
    ///
    /// The page's parent pointer, if set, must reference a page already in
    /// the graph. A parent pointer equal to the page's own id is silently
    /// cleared (self-parenting is a no-op, not an error).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPage`] if the parent is not in the graph,
    /// or [`GraphError::DuplicateSlug`] if a sibling in the target scope
    /// already uses the slug. The graph is unchanged on error.
    pub fn insert(&mut self, mut page: Page) -> Result<PageId, GraphError> {
        if page.parent == Some(page.id) {
            page.parent = None;
        }
        if let Some(parent) = page.parent
            && !self.pages.contains_key(&parent)
        {
            return Err(GraphError::UnknownPage(parent));
        }
        let scope = page.parent;
        self.check_slug_free(scope, &page.slug)?;

        let id = page.id;
        self.attach(scope, id, &page.slug);
        self.order.push(id);
        self.pages.insert(id, page);
        Ok(id)
    }

    /// Move a page under a new parent (or to the roots with `None`).
    ///
    /// Setting a page as its own parent is a silent no-op that leaves the
    /// parent unchanged. Both sides of the relation are updated together.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPage`] for unknown ids,
    /// [`GraphError::Cycle`] if the new parent is a descendant of the page,
    /// or [`GraphError::DuplicateSlug`] on a sibling collision in the target
    /// scope. The graph is unchanged on error.
    pub fn set_parent(&mut self, id: PageId, new_parent: Scope) -> Result<(), GraphError> {
        let page = self.pages.get(&id).ok_or(GraphError::UnknownPage(id))?;
        if new_parent == Some(id) {
            tracing::debug!(page = %id, "Ignoring self-parenting request");
            return Ok(());
        }
        if page.parent == new_parent {
            return Ok(());
        }
        if let Some(parent) = new_parent {
            if !self.pages.contains_key(&parent) {
                return Err(GraphError::UnknownPage(parent));
            }
            if self.is_descendant(parent, id) {
                return Err(GraphError::Cycle {
                    page: id,
                    new_parent: parent,
                });
            }
        }
        let slug = self.pages[&id].slug.clone();
        self.check_slug_free(new_parent, &slug)?;

        let old_scope = self.pages[&id].parent;
        self.detach(old_scope, id, &slug);
        self.attach(new_parent, id, &slug);
        self.pages.get_mut(&id).expect("page checked above").parent = new_parent;
        Ok(())
    }

    /// Change a page's slug.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPage`] for unknown ids or
    /// [`GraphError::DuplicateSlug`] if a sibling already uses the proposed
    /// slug. The check is scoped to the sibling set, not global.
    pub fn rename_slug(&mut self, id: PageId, slug: impl Into<String>) -> Result<(), GraphError> {
        let slug = slug.into();
        let page = self.pages.get(&id).ok_or(GraphError::UnknownPage(id))?;
        if page.slug == slug {
            return Ok(());
        }
        let scope = page.parent;
        self.check_slug_free(scope, &slug)?;

        let old_slug = self.pages[&id].slug.clone();
        let index = self.by_slug.entry(scope).or_default();
        if index.get(&old_slug) == Some(&id) {
            index.remove(&old_slug);
        }
        index.insert(slug.clone(), id);
        self.pages.get_mut(&id).expect("page checked above").slug = slug;
        Ok(())
    }

    /// Remove a page, orphaning its children.
    ///
    /// Children get their parent set to `None` and become roots; they are
    /// never cascade-deleted. The removed page is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPage`] for unknown ids.
    pub fn remove(&mut self, id: PageId) -> Result<Page, GraphError> {
        let Some(page) = self.pages.get(&id) else {
            return Err(GraphError::UnknownPage(id));
        };
        let (scope, slug) = (page.parent, page.slug.clone());

        // Detach first so an orphan may take over a slug this page held.
        self.detach(scope, id, &slug);
        self.orphan_children(id);

        let page = self.pages.remove(&id).expect("presence checked above");
        self.order.retain(|other| *other != id);
        Ok(page)
    }

    /// Soft-delete a page.
    ///
    /// Stamps `deleted_at` and nothing else: parent and children links stay
    /// intact, and the page simply stops participating in resolution.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPage`] for unknown ids.
    pub fn soft_delete(&mut self, id: PageId, at: DateTime<Utc>) -> Result<(), GraphError> {
        let page = self.pages.get_mut(&id).ok_or(GraphError::UnknownPage(id))?;
        page.deleted_at = Some(at);
        Ok(())
    }

    /// Clear a page's soft-delete stamp.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPage`] for unknown ids.
    pub fn restore(&mut self, id: PageId) -> Result<(), GraphError> {
        let page = self.pages.get_mut(&id).ok_or(GraphError::UnknownPage(id))?;
        page.deleted_at = None;
        Ok(())
    }

    /// Enable or disable a page.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPage`] for unknown ids.
    pub fn set_enabled(&mut self, id: PageId, enabled: bool) -> Result<(), GraphError> {
        let page = self.pages.get_mut(&id).ok_or(GraphError::UnknownPage(id))?;
        page.enabled = enabled;
        Ok(())
    }

    /// Set or clear the homepage flag.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownPage`] for unknown ids.
    pub fn set_homepage(&mut self, id: PageId, homepage: bool) -> Result<(), GraphError> {
        let page = self.pages.get_mut(&id).ok_or(GraphError::UnknownPage(id))?;
        page.homepage = homepage;
        Ok(())
    }

    /// Build a graph from stored pages.
    ///
    /// Rows may arrive in any order; children are inserted once their parent
    /// is present. Rows referencing a missing parent (or caught in a broken
    /// parent chain) are materialized as roots, and rows that would violate
    /// sibling slug uniqueness are skipped, in both cases with a warning,
    /// so the materialized graph always satisfies the invariants.
    #[must_use]
    pub fn from_pages(pages: Vec<Page>) -> Self {
        let mut graph = Self::new();
        let mut pending = pages;

        while !pending.is_empty() {
            let mut deferred = Vec::new();
            let mut progressed = false;

            for mut page in pending {
                let parent_known = match page.parent {
                    Some(parent) if parent != page.id => graph.pages.contains_key(&parent),
                    _ => true,
                };
                if !parent_known {
                    deferred.push(page);
                    continue;
                }
                if page.parent == Some(page.id) {
                    page.parent = None;
                }
                progressed = true;
                let (id, slug) = (page.id, page.slug.clone());
                if let Err(error) = graph.insert(page) {
                    tracing::warn!(page = %id, slug = %slug, %error, "Skipping stored page");
                }
            }

            if !progressed {
                // Remaining rows reference parents that never materialized
                // (missing rows or a stored cycle). Break the knot by
                // treating the first as a root and retrying the rest.
                let mut page = deferred.remove(0);
                tracing::warn!(page = %page.id, slug = %page.slug, "Stored parent missing; materializing as root");
                page.parent = None;
                deferred.insert(0, page);
            }
            pending = deferred;
        }

        graph
    }

    /// Whether `id` is a descendant of `ancestor` through the parent chain.
    fn is_descendant(&self, id: PageId, ancestor: PageId) -> bool {
        let mut current = self.pages.get(&id).and_then(|page| page.parent);
        while let Some(i) = current {
            if i == ancestor {
                return true;
            }
            current = self.pages.get(&i).and_then(|page| page.parent);
        }
        false
    }

    /// Reject a slug already used in the scope.
    fn check_slug_free(&self, scope: Scope, slug: &str) -> Result<(), GraphError> {
        if self
            .by_slug
            .get(&scope)
            .is_some_and(|index| index.contains_key(slug))
        {
            return Err(GraphError::DuplicateSlug {
                slug: slug.to_owned(),
            });
        }
        Ok(())
    }

    /// Add a page to a scope's child list and slug index.
    fn attach(&mut self, scope: Scope, id: PageId, slug: &str) {
        self.children.entry(scope).or_default().push(id);
        self.by_slug
            .entry(scope)
            .or_default()
            .insert(slug.to_owned(), id);
    }

    /// Remove a page from a scope's child list and slug index.
    fn detach(&mut self, scope: Scope, id: PageId, slug: &str) {
        if let Some(list) = self.children.get_mut(&scope) {
            list.retain(|other| *other != id);
        }
        if let Some(index) = self.by_slug.get_mut(&scope)
            && index.get(slug) == Some(&id)
        {
            index.remove(slug);
        }
    }

    /// Turn the children of `id` into roots.
    ///
    /// Orphaning is unconditional; if an orphan's slug collides with an
    /// existing root the first index mapping wins and resolution of that
    /// slug is undefined by design.
    fn orphan_children(&mut self, id: PageId) {
        let orphans = self.children.remove(&Some(id)).unwrap_or_default();
        for orphan in orphans {
            let slug = {
                let page = self.pages.get_mut(&orphan).expect("child list is consistent");
                page.parent = None;
                page.slug.clone()
            };
            self.children.entry(None).or_default().push(orphan);
            let index = self.by_slug.entry(None).or_default();
            if index.contains_key(&slug) {
                tracing::warn!(page = %orphan, slug = %slug, "Orphaned page collides with an existing root slug");
            } else {
                index.insert(slug, orphan);
            }
        }
        self.by_slug.remove(&Some(id));
    }

    /// Pages of a scope, in insertion order.
    fn scope_members(&self, scope: Scope) -> Vec<&Page> {
        self.children
            .get(&scope)
            .map(|ids| ids.iter().map(|id| &self.pages[id]).collect())
            .unwrap_or_default()
    }
}
