//! Graph reload endpoint.
//!
//! `POST /api/reload` re-reads the store and swaps the materialized graph.
//! This is the operational hook for picking up out-of-band database changes
//! without restarting the server.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for POST /api/reload.
#[derive(Serialize)]
struct ReloadResponse {
    /// Number of pages in the reloaded graph.
    pages: usize,
}

/// Handle POST /api/reload.
pub(crate) async fn reload(
    State(state): State<Arc<AppState>>,
) -> Result<Json<impl Serialize>, ServerError> {
    let pages = state.reload().await?;
    Ok(Json(ReloadResponse { pages }))
}
