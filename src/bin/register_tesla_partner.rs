//! One-shot Fleet API partner registration.
//!
//! Obtains a client-credentials token and registers the partner domain so
//! Tesla will accept OAuth flows for this app.

use anyhow::{bail, Context};
use serde::Deserialize;

use shawsite::core::config::TeslaConfig;

#[derive(Debug, Deserialize)]
struct PartnerToken {
    access_token: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = TeslaConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let client_id = config
        .client_id
        .clone()
        .context("TESLA_CLIENT_ID is required")?;
    let client_secret = config
        .client_secret
        .clone()
        .context("TESLA_CLIENT_SECRET is required")?;

    let http_client = reqwest::Client::new();

    let token_response = http_client
        .post(config.token_url())
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("audience", config.fleet_base_url.as_str()),
        ])
        .send()
        .await?;

    if !token_response.status().is_success() {
        let status = token_response.status();
        let body = token_response.text().await.unwrap_or_default();
        bail!("Partner token request failed ({}): {}", status, body);
    }

    let token: PartnerToken = token_response
        .json()
        .await
        .context("Failed to obtain partner access token")?;

    let register_response = http_client
        .post(format!("{}/api/1/partner_accounts", config.fleet_base_url))
        .bearer_auth(&token.access_token)
        .json(&serde_json::json!({ "domain": config.partner_domain }))
        .send()
        .await?;

    let status = register_response.status();
    let body = register_response.text().await.unwrap_or_default();
    println!("register status: {}", status);
    println!("{}", truncate(&body, 1000));

    if !status.is_success() {
        bail!("Partner registration failed ({})", status);
    }

    println!("\nPartner registration complete.");
    Ok(())
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
