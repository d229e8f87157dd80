//! Bunny.net storage zone client
//!
//! Talks to the Bunny storage API (list/upload/delete objects in a storage
//! zone) and builds CDN pull-zone URLs for serving the stored files.

use serde::Deserialize;
use tracing::debug;

use crate::core::config::BunnyConfig;
use crate::core::error::{AppError, Result};

/// A single object entry returned by the storage listing API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageObject {
    pub object_name: String,
    #[serde(default)]
    pub is_directory: bool,
    #[serde(default)]
    pub length: u64,
}

/// Bunny.net storage zone client
pub struct BunnyStorageClient {
    config: BunnyConfig,
    http_client: reqwest::Client,
}

impl BunnyStorageClient {
    pub fn new(config: BunnyConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Whether storage credentials are present
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        match (&self.config.storage_zone, &self.config.access_key) {
            (Some(zone), Some(key)) => Ok((zone.as_str(), key.as_str())),
            _ => Err(AppError::ExternalServiceError(
                "Bunny storage is not configured".to_string(),
            )),
        }
    }

    fn object_url(&self, zone: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.storage_url,
            zone,
            self.config.portfolio_path,
            urlencoding::encode(filename)
        )
    }

    /// List all objects in the portfolio path of the storage zone
    pub async fn list_objects(&self) -> Result<Vec<StorageObject>> {
        let (zone, key) = self.credentials()?;

        let url = format!(
            "{}/{}/{}/",
            self.config.storage_url, zone, self.config.portfolio_path
        );

        debug!("Listing storage objects: {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("AccessKey", key)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Storage list request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Storage API error: HTTP {} - {}",
                status, body
            )));
        }

        let objects = response.json::<Vec<StorageObject>>().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse storage listing: {}", e))
        })?;

        Ok(objects)
    }

    /// Upload a file into the portfolio path of the storage zone
    pub async fn upload(&self, filename: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        let (zone, key) = self.credentials()?;
        let url = self.object_url(zone, filename);

        let response = self
            .http_client
            .put(&url)
            .header("AccessKey", key)
            .header("Content-Type", content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Storage upload request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Storage upload error: HTTP {} - {}",
                status, body
            )));
        }

        debug!("Uploaded '{}' to storage zone '{}'", filename, zone);
        Ok(())
    }

    /// Delete a file from the portfolio path of the storage zone
    #[allow(dead_code)]
    pub async fn delete(&self, filename: &str) -> Result<()> {
        let (zone, key) = self.credentials()?;
        let url = self.object_url(zone, filename);

        let response = self
            .http_client
            .delete(&url)
            .header("AccessKey", key)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Storage delete request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalServiceError(format!(
                "Storage delete error: HTTP {}",
                status
            )));
        }

        debug!("Deleted '{}' from storage zone '{}'", filename, zone);
        Ok(())
    }

    /// CDN pull-zone URL for a stored file (filename is percent-escaped)
    pub fn pull_url(&self, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.pull_zone_url,
            self.config.portfolio_path,
            urlencoding::encode(filename)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> BunnyConfig {
        BunnyConfig {
            storage_url: "https://storage.bunnycdn.com".to_string(),
            storage_zone: Some("myzone".to_string()),
            access_key: Some("secret".to_string()),
            pull_zone_url: "https://cdn.example.com".to_string(),
            portfolio_path: "portfolio".to_string(),
        }
    }

    #[test]
    fn test_pull_url_escapes_filename() {
        let client = BunnyStorageClient::new(test_config());
        assert_eq!(
            client.pull_url("golden gate.jpg"),
            "https://cdn.example.com/portfolio/golden%20gate.jpg"
        );
    }

    #[test]
    fn test_pull_url_plain_filename() {
        let client = BunnyStorageClient::new(test_config());
        assert_eq!(
            client.pull_url("sunset.jpg"),
            "https://cdn.example.com/portfolio/sunset.jpg"
        );
    }

    #[test]
    fn test_unconfigured_client_reports_error() {
        let mut config = test_config();
        config.access_key = None;
        let client = BunnyStorageClient::new(config);

        assert!(!client.is_configured());
        assert!(client.credentials().is_err());
    }

    #[test]
    fn test_storage_object_deserializes_api_shape() {
        let json = r#"[
            {"ObjectName": "sunset.jpg", "IsDirectory": false, "Length": 1024},
            {"ObjectName": "albums", "IsDirectory": true}
        ]"#;
        let objects: Vec<StorageObject> = serde_json::from_str(json).unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].object_name, "sunset.jpg");
        assert!(!objects[0].is_directory);
        assert!(objects[1].is_directory);
    }
}
