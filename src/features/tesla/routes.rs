use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::tesla::handlers::{tesla_page, tesla_status};
use crate::features::tesla::service::TeslaService;

/// Create routes for the vehicle feature
pub fn routes(service: Arc<TeslaService>) -> Router {
    Router::new()
        .route("/tesla", get(tesla_page))
        .route("/api/tesla/status", get(tesla_status))
        .with_state(service)
}
