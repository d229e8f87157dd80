use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::Html,
    Json,
};
use minijinja::{context, Value};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::pages::site_title;
use crate::features::portfolio::models::MediaItem;
use crate::features::portfolio::service::PortfolioService;
use crate::shared::templates::render_page;
use crate::shared::types::ApiResponse;

/// Render the photography gallery from the current storage listing
pub async fn photography(
    State(service): State<Arc<PortfolioService>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let items = service.list_media().await;

    let html = render_page(
        "photography.html.jinja",
        context! {
            title => site_title(&headers),
            portfolio_items => Value::from_serialize(&items),
        },
    )?;

    Ok(Html(html))
}

/// Upload a media file into the gallery
///
/// Accepts multipart/form-data with:
/// - `file`: the media file (required)
/// - `description`: optional display text
pub async fn upload_media(
    State(service): State<Arc<PortfolioService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<MediaItem>>), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            "description" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read description field: {}", e))
                })?;
                if !text.is_empty() {
                    description = Some(text);
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    let item = service
        .add_media(&file_name, file_data, &content_type, description)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item),
            Some("File uploaded successfully".to_string()),
        )),
    ))
}
