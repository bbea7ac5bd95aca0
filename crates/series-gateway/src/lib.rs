//! Series HTTP Gateway.
//!
//! Exposes the series collection over a small REST API. All state lives in
//! [`series_core::SeriesService`]; this crate only maps requests onto service
//! calls and results onto status codes.

pub mod config;
pub mod error;
pub mod routes;

pub use config::{Args, GatewayConfig};
pub use error::AppError;

use std::sync::Arc;

use axum::Router;
use series_core::SeriesService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Series service owning the cache and the document.
    pub series: Arc<SeriesService>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new application state.
    pub fn new(series: SeriesService, config: GatewayConfig) -> Self {
        Self {
            series: Arc::new(series),
            config,
        }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::series::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
