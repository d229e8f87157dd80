use axum::{
    extract::State,
    http::HeaderMap,
    response::Html,
    Json,
};
use minijinja::{context, Value};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::pages::site_title;
use crate::features::tesla::models::VehicleStatus;
use crate::features::tesla::service::TeslaService;
use crate::shared::templates::render_page;

/// Render the vehicle page with the current telemetry snapshot
pub async fn tesla_page(
    State(service): State<Arc<TeslaService>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let status = service.status().await;

    let html = render_page(
        "tesla.html.jinja",
        context! {
            title => site_title(&headers),
            status => Value::from_serialize(&status),
        },
    )?;

    Ok(Html(html))
}

/// Telemetry snapshot as JSON for the page's refresh script
pub async fn tesla_status(State(service): State<Arc<TeslaService>>) -> Json<VehicleStatus> {
    Json(service.status().await)
}
