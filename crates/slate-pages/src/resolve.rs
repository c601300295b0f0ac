//! Path resolution and homepage selection.
//!
//! [`resolve`] turns an ordered list of slug segments into exactly one page,
//! or a not-found outcome. An empty segment list is a homepage request and
//! is answered by [`select_homepage`] over the flat candidate set; tree
//! position plays no role there, unlike path resolution which is purely
//! structural.

use crate::context::RequestContext;
use crate::error::ResolveError;
use crate::graph::PageGraph;
use crate::page::Page;

/// Resolve a slug path against the graph.
///
/// Each segment must exactly match (case-sensitive) a visible page at the
/// corresponding depth: the first a root, every further one a child of the
/// previous match. No segment may be skipped, no partial match is accepted,
/// and a trailing unmatched segment fails the whole path.
///
/// An empty segment list delegates to [`select_homepage`] with the graph's
/// current candidates.
///
/// # Errors
///
/// Returns [`ResolveError::PageNotFound`] when the path does not match, and
/// [`ResolveError::NoHomepage`] when an empty path finds no candidate.
pub fn resolve<'a, S: AsRef<str>>(
    graph: &'a PageGraph,
    segments: &[S],
    context: &RequestContext,
) -> Result<&'a Page, ResolveError> {
    if segments.is_empty() {
        return select_homepage(graph.homepage_candidates(), context);
    }

    graph.find_by_slug_path(segments).ok_or_else(|| {
        let path = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("/");
        ResolveError::PageNotFound(path)
    })
}

/// Pick the homepage for a request context.
///
/// Candidates are expected to be visible homepage pages (the graph's
/// [`homepage_candidates`](PageGraph::homepage_candidates) view). Precedence,
/// highest first:
///
/// 1. host and locale both match
/// 2. host matches
/// 3. locale matches
/// 4. neither host nor locale set on the page
///
/// Within a tier no secondary ordering is defined; the first candidate in
/// iteration order wins, and callers must not rely on which one that is.
/// A page scoped to a different host with no matching locale falls in no
/// tier at all and is never served.
///
/// # Errors
///
/// Returns [`ResolveError::NoHomepage`] when no candidate matches any tier.
pub fn select_homepage<'a>(
    candidates: impl IntoIterator<Item = &'a Page>,
    context: &RequestContext,
) -> Result<&'a Page, ResolveError> {
    let mut best: Option<(u8, &Page)> = None;

    for page in candidates {
        let Some(tier) = precedence_tier(page, context) else {
            continue;
        };
        if tier == 0 {
            return Ok(page);
        }
        if best.is_none_or(|(current, _)| tier < current) {
            best = Some((tier, page));
        }
    }

    best.map(|(_, page)| page).ok_or(ResolveError::NoHomepage)
}

/// Precedence tier of a candidate for a context, `None` if it matches no
/// tier.
fn precedence_tier(page: &Page, context: &RequestContext) -> Option<u8> {
    let host = scoped_match(page.host.as_deref(), context.host.as_deref());
    let locale = scoped_match(page.locale.as_deref(), context.locale.as_deref());

    match (host, locale) {
        (true, true) => Some(0),
        (true, false) => Some(1),
        (false, true) => Some(2),
        (false, false) if page.host.is_none() && page.locale.is_none() => Some(3),
        (false, false) => None,
    }
}

/// A scoping value matches only when the page sets it and the context
/// carries the same value.
fn scoped_match(page_value: Option<&str>, context_value: Option<&str>) -> bool {
    page_value.is_some() && page_value == context_value
}
