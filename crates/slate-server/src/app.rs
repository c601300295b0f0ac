//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/page/", get(handlers::pages::get_homepage))
        .route("/page/{*path}", get(handlers::pages::get_page))
        .route("/api/reload", post(handlers::reload::reload))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::RwLock;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use slate_pages::{Page, PageGraph};
    use slate_storage::MemoryStore;
    use tower::ServiceExt;

    use super::*;

    /// Build a router over an in-memory store seeded with `pages`.
    fn test_router(pages: Vec<Page>) -> Router {
        let mut store = MemoryStore::new();
        for page in &pages {
            store = store.with_page(page.clone());
        }
        let state = Arc::new(AppState {
            graph: RwLock::new(PageGraph::from_pages(pages)),
            store: Arc::new(store),
            default_locale: Some("en".to_owned()),
            version: "test".to_owned(),
        });
        create_router(state)
    }

    async fn get_status(router: Router, uri: &str) -> StatusCode {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    async fn get_json(router: Router, uri: &str) -> serde_json::Value {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn tree_fixture() -> Vec<Page> {
        let root = Page::new("Root")
            .with_slug("root")
            .with_content("The root page")
            .enabled()
            .as_homepage();
        let child = Page::new("First level")
            .with_slug("first-level")
            .with_content("This page is only available in the first level")
            .enabled()
            .with_parent(root.id);
        let disabled = Page::new("Disabled Page")
            .with_slug("second-level")
            .with_content("This page should render a 404 error")
            .with_parent(root.id);
        vec![root, child, disabled]
    }

    #[tokio::test]
    async fn test_no_homepage_is_404() {
        let status = get_status(test_router(Vec::new()), "/page/").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_slug_is_404() {
        let status = get_status(test_router(tree_fixture()), "/page/inexistent-slug").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_homepage_request_serves_candidate() {
        let json = get_json(test_router(tree_fixture()), "/page/").await;

        assert_eq!(json["meta"]["title"], "Root");
        assert_eq!(json["content"], "The root page");
    }

    #[tokio::test]
    async fn test_nested_page_resolves() {
        let json = get_json(test_router(tree_fixture()), "/page/root/first-level").await;

        assert_eq!(json["meta"]["title"], "First level");
        assert_eq!(json["meta"]["path"], "/root/first-level");
    }

    #[tokio::test]
    async fn test_disabled_page_is_404() {
        let status = get_status(test_router(tree_fixture()), "/page/root/second-level").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_trailing_slash_redirects() {
        let response = test_router(tree_fixture())
            .oneshot(Request::get("/page/root/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/page/root"
        );
    }

    #[tokio::test]
    async fn test_homepage_prefers_host_match() {
        let everywhere = Page::new("No match").with_slug("fallback").enabled().as_homepage();
        let local = Page::new("Host only")
            .with_slug("host-only")
            .with_host("localhost")
            .enabled()
            .as_homepage();

        let router = test_router(vec![everywhere, local]);
        let response = router
            .oneshot(
                Request::get("/page/")
                    .header(header::HOST, "localhost:7878")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["meta"]["title"], "Host only");
    }

    #[tokio::test]
    async fn test_etag_roundtrip_yields_304() {
        let router = test_router(tree_fixture());
        let first = router
            .clone()
            .oneshot(Request::get("/page/root").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let etag = first.headers().get(header::ETAG).unwrap().clone();

        let second = router
            .oneshot(
                Request::get("/page/root")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let response = test_router(tree_fixture())
            .oneshot(Request::get("/page/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("content-security-policy"));
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_pages() {
        let page = Page::new("Late arrival").with_slug("late").enabled();
        let store = MemoryStore::new().with_page(page);
        let state = Arc::new(AppState {
            graph: RwLock::new(PageGraph::new()),
            store: Arc::new(store),
            default_locale: None,
            version: "test".to_owned(),
        });
        let router = create_router(state);

        let before = get_status(router.clone(), "/page/late").await;
        assert_eq!(before, StatusCode::NOT_FOUND);

        let reload = router
            .clone()
            .oneshot(Request::post("/api/reload").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(reload.status(), StatusCode::OK);

        let after = get_status(router, "/page/late").await;
        assert_eq!(after, StatusCode::OK);
    }
}
