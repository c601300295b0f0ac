//! Page endpoints.
//!
//! Resolves slug paths against the page graph and returns JSON responses
//! with the page payload and meta fields. The empty path is a homepage
//! request and goes through homepage selection instead of path matching.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use slate_pages::{Page, RequestContext, resolve};

use crate::error::ServerError;
use crate::handlers::{host_without_port, split_segments};
use crate::state::AppState;

/// Response for GET /page/ and GET /page/{path}.
#[derive(Serialize)]
struct PageResponse {
    /// Page metadata.
    meta: PageMeta,
    /// Content payload.
    content: Option<String>,
    /// Page-specific stylesheet payload.
    css: Option<String>,
    /// Page-specific script payload.
    js: Option<String>,
}

/// Page metadata.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    /// Display title.
    title: String,
    /// Canonical URL path (with leading slash).
    path: String,
    /// Meta title override.
    #[serde(skip_serializing_if = "Option::is_none")]
    meta_title: Option<String>,
    /// Meta description.
    #[serde(skip_serializing_if = "Option::is_none")]
    meta_description: Option<String>,
    /// Meta keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    meta_keywords: Option<String>,
    /// Creation timestamp (RFC 3339).
    created_at: String,
}

/// Query parameters for page requests.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    /// Requested locale; falls back to the configured default.
    locale: Option<String>,
}

/// Handle GET /page/ (homepage).
pub(crate) async fn get_homepage(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(String::new(), &state, &query, &headers)
}

/// Handle GET /page/{*path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    // A trailing slash redirects to the canonical URL.
    if path.ends_with('/') {
        let canonical = format!("/page/{}", path.trim_end_matches('/'));
        return Ok(Redirect::permanent(&canonical).into_response());
    }
    get_page_impl(path, &state, &query, &headers)
}

/// Shared implementation for page requests.
fn get_page_impl(
    path: String,
    state: &AppState,
    query: &PageQuery,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let context = request_context(state, query, headers);
    let segments = split_segments(&path);

    let graph = state.graph.read().unwrap();
    let page = resolve(&graph, &segments, &context).map_err(ServerError::from)?;
    let tree_path = graph
        .tree_path(page.id)
        .unwrap_or_else(|| page.slug.clone());
    let response = page_response(page, &tree_path);
    drop(graph);

    let body = serde_json::to_string(&response).unwrap_or_default();
    let etag = compute_etag(&state.version, &body);

    // Conditional request support
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Json(response),
    )
        .into_response())
}

/// Build the request context from headers, query, and configuration.
fn request_context(state: &AppState, query: &PageQuery, headers: &HeaderMap) -> RequestContext {
    let mut context = RequestContext::new();
    if let Some(host) = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
    {
        context = context.with_host(host_without_port(host));
    }
    if let Some(locale) = query.locale.as_ref().or(state.default_locale.as_ref()) {
        context = context.with_locale(locale);
    }
    context
}

/// Build the JSON payload for a resolved page.
fn page_response(page: &Page, tree_path: &str) -> PageResponse {
    PageResponse {
        meta: PageMeta {
            title: page.title.clone(),
            path: format!("/{tree_path}"),
            meta_title: page.meta_title.clone(),
            meta_description: page.meta_description.clone(),
            meta_keywords: page.meta_keywords.clone(),
            created_at: page.created_at.to_rfc3339(),
        },
        content: page.content.clone(),
        css: page.css.clone(),
        js: page.js.clone(),
    }
}

/// Compute `ETag` from version and response body.
///
/// Uses MD5 truncated to 64 bits (16 hex chars) - sufficient for cache
/// invalidation with negligible collision probability.
fn compute_etag(version: &str, body: &str) -> String {
    let hash = Md5::digest(format!("{version}:{body}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_compute_etag_includes_version() {
        let etag1 = compute_etag("1.0.0", "content");
        let etag2 = compute_etag("1.0.1", "content");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_includes_body() {
        let etag1 = compute_etag("1.0.0", "content1");
        let etag2 = compute_etag("1.0.0", "content2");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", "content");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        // 16 hex chars + 2 quotes = 18 total
        assert_eq!(etag.len(), 18);
    }

    #[test]
    fn test_page_response_serialization() {
        let page = Page::new("Root").with_content("The root page");

        let json = serde_json::to_value(page_response(&page, "root")).unwrap();

        assert_eq!(json["meta"]["title"], "Root");
        assert_eq!(json["meta"]["path"], "/root");
        assert_eq!(json["content"], "The root page");
        // Unset meta fields are omitted
        assert!(json["meta"].get("metaTitle").is_none());
        assert!(json["meta"].get("metaDescription").is_none());
    }

    #[test]
    fn test_page_response_includes_meta_fields() {
        let mut page = Page::new("Root");
        page.meta_title = Some("this title is only in the metas".to_owned());
        page.meta_description = Some("meta description".to_owned());
        page.meta_keywords = Some("this is a meta keyword list".to_owned());
        page.css = Some("#home{color:red;}".to_owned());
        page.js = Some("alert(\"ok\");".to_owned());

        let json = serde_json::to_value(page_response(&page, "root")).unwrap();

        assert_eq!(json["meta"]["metaTitle"], "this title is only in the metas");
        assert_eq!(json["meta"]["metaDescription"], "meta description");
        assert_eq!(json["meta"]["metaKeywords"], "this is a meta keyword list");
        assert_eq!(json["css"], "#home{color:red;}");
        assert_eq!(json["js"], "alert(\"ok\");");
    }
}
