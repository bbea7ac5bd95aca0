//! Health check endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the document exists on disk, "degraded" otherwise.
    pub status: String,
    /// Gateway version.
    pub version: String,
    /// Configured path of the series document.
    pub database: String,
    /// Number of cached records.
    pub records: usize,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = &state.config.database_path;
    let document_present = tokio::fs::try_exists(database).await.unwrap_or(false);

    Json(HealthResponse {
        status: if document_present { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.display().to_string(),
        records: state.series.cache().count(),
    })
}
