use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
};
use minijinja::context;
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::pages::site_title;
use crate::features::pages::PagesState;
use crate::shared::templates::render_page;

pub async fn index(headers: HeaderMap) -> Result<Html<String>, AppError> {
    let html = render_page(
        "index.html.jinja",
        context! { title => site_title(&headers) },
    )?;
    Ok(Html(html))
}

pub async fn links(headers: HeaderMap) -> Result<Html<String>, AppError> {
    let html = render_page(
        "links.html.jinja",
        context! { title => site_title(&headers) },
    )?;
    Ok(Html(html))
}

pub async fn privacy_policy(headers: HeaderMap) -> Result<Html<String>, AppError> {
    let html = render_page(
        "privacy_policy.html.jinja",
        context! { title => site_title(&headers) },
    )?;
    Ok(Html(html))
}

/// Serve the Fleet API partner verification key.
///
/// Tesla validates partner domains by fetching this exact well-known path.
pub async fn tesla_partner_key(
    State(state): State<Arc<PagesState>>,
) -> Result<impl IntoResponse, AppError> {
    let pem = tokio::fs::read_to_string(&state.tesla_public_key_path)
        .await
        .map_err(|_| AppError::NotFound("Partner public key not found".to_string()))?;

    Ok(([(header::CONTENT_TYPE, "application/x-pem-file")], pem))
}
