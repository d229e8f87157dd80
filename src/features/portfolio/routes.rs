use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::portfolio::handlers::{photography, upload_media};
use crate::features::portfolio::service::PortfolioService;

/// Create routes for the portfolio feature
pub fn routes(service: Arc<PortfolioService>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/photography", get(photography))
        // Older iterations of the site linked the gallery as /portfolio
        .route("/portfolio", get(photography))
        .route(
            "/upload",
            // Allow body size up to the upload limit + buffer for multipart overhead
            post(upload_media).layer(DefaultBodyLimit::max(max_upload_bytes + 1024 * 1024)),
        )
        .with_state(service)
}
