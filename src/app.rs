use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::config::Config;
use crate::core::middleware;
use crate::features::pages::{self, PagesState};
use crate::features::portfolio::{self, PortfolioService};
use crate::features::tesla::{self, TeslaFleetClient, TeslaService, TeslaTokenManager};
use crate::modules::storage::BunnyStorageClient;

/// Where uploads land when the storage zone is not configured
const UPLOAD_FALLBACK_DIR: &str = "static/portfolio";

/// Build the full application router from configuration.
///
/// Split out of `main` so integration tests can run the site against
/// throwaway configurations.
pub fn build_router(config: &Config) -> Router {
    // Storage + gallery
    let storage_client = Arc::new(BunnyStorageClient::new(config.bunny.clone()));
    if storage_client.is_configured() {
        tracing::info!("Bunny storage client initialized");
    } else {
        tracing::warn!("Bunny storage not configured; gallery will render empty");
    }
    let portfolio_service = Arc::new(PortfolioService::new(
        Arc::clone(&storage_client),
        PathBuf::from(UPLOAD_FALLBACK_DIR),
    ));

    // Fleet API telemetry
    let token_manager = Arc::new(TeslaTokenManager::new(config.tesla.clone()));
    let fleet_client = Arc::new(TeslaFleetClient::new(
        config.tesla.fleet_base_url.clone(),
        Arc::clone(&token_manager),
    ));
    let tesla_service = Arc::new(TeslaService::new(
        fleet_client,
        config.tesla.vehicle_name.clone(),
    ));

    let pages_state = Arc::new(PagesState {
        tesla_public_key_path: config.tesla.public_key_path.clone(),
    });

    Router::new()
        .merge(pages::routes(pages_state))
        .merge(portfolio::routes(
            portfolio_service,
            config.app.max_upload_bytes,
        ))
        .merge(tesla::routes(tesla_service))
        .nest_service("/static", ServeDir::new("static"))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
