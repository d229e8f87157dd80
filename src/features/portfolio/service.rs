use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::portfolio::models::{
    description_for, is_allowed_extension, media_type_for, sanitize_filename, MediaItem,
    ALLOWED_EXTENSIONS,
};
use crate::modules::storage::{BunnyStorageClient, StorageObject};

/// Service for the photography/portfolio gallery
pub struct PortfolioService {
    storage: Arc<BunnyStorageClient>,
    /// Where uploads land when the storage zone is not configured
    fallback_dir: PathBuf,
}

impl PortfolioService {
    pub fn new(storage: Arc<BunnyStorageClient>, fallback_dir: PathBuf) -> Self {
        Self {
            storage,
            fallback_dir,
        }
    }

    /// List the gallery media.
    ///
    /// Storage failures degrade to an empty listing; the gallery page renders
    /// empty rather than erroring.
    pub async fn list_media(&self) -> Vec<MediaItem> {
        if !self.storage.is_configured() {
            debug!("Storage not configured, returning empty media listing");
            return Vec::new();
        }

        match self.storage.list_objects().await {
            Ok(objects) => self.to_media_items(objects),
            Err(e) => {
                warn!("Media listing failed, rendering empty gallery: {}", e);
                Vec::new()
            }
        }
    }

    /// Map storage entries to gallery items, skipping directories and
    /// anything without an allowed media extension.
    fn to_media_items(&self, objects: Vec<StorageObject>) -> Vec<MediaItem> {
        objects
            .into_iter()
            .filter(|o| !o.is_directory)
            .filter(|o| is_allowed_extension(&o.object_name))
            .map(|o| MediaItem {
                url: self.storage.pull_url(&o.object_name),
                description: description_for(&o.object_name),
                media_type: media_type_for(&o.object_name),
                filename: o.object_name,
            })
            .collect()
    }

    /// Store an uploaded file and return its gallery entry.
    ///
    /// Goes to the storage zone when configured, otherwise to the local
    /// fallback directory under `/static`.
    pub async fn add_media(
        &self,
        original_filename: &str,
        data: Vec<u8>,
        content_type: &str,
        description: Option<String>,
    ) -> Result<MediaItem> {
        let filename = sanitize_filename(original_filename);
        if filename.is_empty() {
            return Err(AppError::BadRequest("Filename is required".to_string()));
        }
        if !is_allowed_extension(&filename) {
            return Err(AppError::BadRequest(format!(
                "File type not allowed. Allowed extensions: {}",
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        let url = if self.storage.is_configured() {
            self.storage.upload(&filename, data, content_type).await?;
            self.storage.pull_url(&filename)
        } else {
            // No storage zone: keep the file next to the other static assets
            tokio::fs::create_dir_all(&self.fallback_dir)
                .await
                .map_err(|e| {
                    AppError::Internal(format!("Failed to create upload directory: {}", e))
                })?;
            let path = self.fallback_dir.join(&filename);
            tokio::fs::write(&path, data)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to save upload: {}", e)))?;
            format!("/static/portfolio/{}", urlencoding::encode(&filename))
        };

        info!("Media uploaded: {}", filename);

        Ok(MediaItem {
            description: description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| description_for(&filename)),
            media_type: media_type_for(&filename),
            url,
            filename,
        })
    }
}
