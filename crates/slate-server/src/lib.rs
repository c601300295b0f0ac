//! HTTP server for the Slate page engine.
//!
//! Serves the page tree over a small JSON API:
//! - `GET /page/` - homepage selection for the request's host and locale
//! - `GET /page/{*path}` - slug-path resolution (404 on any mismatch)
//! - `POST /api/reload` - re-materialize the graph from storage
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum router (slate-server)
//!                      │
//!                      ├─► page handlers ──► PageGraph (read lock)
//!                      │
//!                      └─► reload handler ──► PageStore ──► graph swap (write lock)
//! ```
//!
//! The graph is materialized once at startup and swapped wholesale on
//! reload; request handlers never touch storage.

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use slate_pages::PageGraph;
use slate_storage::{PageStore, SqliteStore};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// sqlx database URL.
    pub database_url: String,
    /// Locale assumed for requests that carry none.
    pub default_locale: Option<String>,
    /// Application version (for ETag computation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            database_url: "sqlite:slate.db".to_owned(),
            default_locale: None,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// Connects to the database, materializes the page graph, and serves until
/// Ctrl-C.
///
/// # Errors
///
/// Returns an error if the database connection, the initial graph load, or
/// the listener setup fails.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::connect(&config.database_url).await?;
    let store: Arc<dyn PageStore> = Arc::new(store);

    let pages = store.load_pages().await?;
    let graph = PageGraph::from_pages(pages);
    tracing::info!(pages = graph.len(), "Materialized page graph");

    let state = Arc::new(AppState {
        graph: RwLock::new(graph),
        store,
        default_locale: config.default_locale.clone(),
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Slate config.
///
/// # Arguments
///
/// * `config` - Slate configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_config(config: &slate_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        database_url: config.database.url.clone(),
        default_locale: config.site.default_locale.clone(),
        version,
    }
}
