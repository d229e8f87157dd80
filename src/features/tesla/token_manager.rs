use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::core::config::TeslaConfig;

/// Response from the Tesla OAuth token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Cached token with expiration tracking
struct TokenCache {
    token: TokenResponse,
    fetched_at: Instant,
}

/// Manages short-lived Fleet API access tokens with caching.
///
/// The long-lived refresh token from the environment is exchanged on demand;
/// the resulting access token is reused until close to expiry.
pub struct TeslaTokenManager {
    config: TeslaConfig,
    client: reqwest::Client,
    cache: Arc<RwLock<Option<TokenCache>>>,
    /// Refresh token this many seconds before expiration
    refresh_margin: Duration,
}

impl TeslaTokenManager {
    pub fn new(config: TeslaConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            cache: Arc::new(RwLock::new(None)),
            refresh_margin: Duration::from_secs(60),
        }
    }

    /// Get a valid access token, exchanging the refresh token if necessary
    pub async fn get_access_token(&self) -> Result<TokenResponse, TokenError> {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                let elapsed = cached.fetched_at.elapsed();
                let expires_in = Duration::from_secs(cached.token.expires_in);

                if elapsed + self.refresh_margin < expires_in {
                    tracing::debug!(
                        "Using cached Fleet API token (expires in {} seconds)",
                        (expires_in - elapsed).as_secs()
                    );
                    return Ok(cached.token.clone());
                }
            }
        }

        self.fetch_token().await
    }

    /// Exchange the refresh token for a fresh access token
    async fn fetch_token(&self) -> Result<TokenResponse, TokenError> {
        let client_id = self
            .config
            .client_id
            .as_deref()
            .ok_or(TokenError::NotConfigured)?;
        let refresh_token = self
            .config
            .refresh_token
            .as_deref()
            .ok_or(TokenError::NotConfigured)?;

        let token_url = self.config.token_url();
        tracing::debug!("Fetching new Fleet API token from {}", token_url);

        let response = self
            .client
            .post(&token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", client_id),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(|e| TokenError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TokenError::FetchError(format!(
                "Token request failed: HTTP {} - {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::ParseError(e.to_string()))?;

        tracing::info!(
            "Fetched new Fleet API token, expires in {} seconds",
            token_response.expires_in
        );

        let mut cache = self.cache.write().await;
        *cache = Some(TokenCache {
            token: token_response.clone(),
            fetched_at: Instant::now(),
        });

        Ok(token_response)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Tesla OAuth credentials are not configured")]
    NotConfigured,

    #[error("Failed to fetch token: {0}")]
    FetchError(String),

    #[error("Failed to parse token response: {0}")]
    ParseError(String),
}
