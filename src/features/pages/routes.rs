use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::pages::handlers::{index, links, privacy_policy, tesla_partner_key};
use crate::features::pages::PagesState;

/// Create routes for the static pages and the well-known partner key
pub fn routes(state: Arc<PagesState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/links", get(links))
        .route("/privacy-policy", get(privacy_policy))
        .route(
            "/.well-known/appspecific/com.tesla.3p.public-key.pem",
            get(tesla_partner_key),
        )
        .with_state(state)
}
