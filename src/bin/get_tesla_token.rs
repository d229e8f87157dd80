//! Interactive OAuth authorization-code-with-PKCE flow for the Fleet API.
//!
//! Prints the login URL, waits for the pasted callback URL, exchanges the
//! code for tokens, and writes them back into the local `.env` file.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use shawsite::core::config::TeslaConfig;
use shawsite::features::tesla::oauth::{
    make_pkce_pair, parse_callback, random_state, DEFAULT_SCOPES,
};
use shawsite::shared::env_file;

#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = TeslaConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let client_id = config
        .client_id
        .clone()
        .context("TESLA_CLIENT_ID is missing in .env")?;
    let redirect_uri = config
        .redirect_uri
        .clone()
        .context("TESLA_REDIRECT_URI is missing in .env")?;
    let mut client_secret = config.client_secret.clone();

    let pkce = make_pkce_pair();
    let state = random_state();

    let login_url = reqwest::Url::parse_with_params(
        &config.authorize_url(),
        &[
            ("response_type", "code"),
            ("client_id", client_id.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("scope", DEFAULT_SCOPES),
            ("state", state.as_str()),
            ("code_challenge", pkce.code_challenge.as_str()),
            ("code_challenge_method", "S256"),
        ],
    )?;

    println!("\nTesla Fleet OAuth setup");
    println!("1) Login at the URL below");
    println!("2) After redirect, copy the FULL callback URL and paste it here\n");
    println!("Redirect URI (must exactly match Tesla app config): {redirect_uri}");
    println!("Requested scopes: {DEFAULT_SCOPES}\n");
    println!("{login_url}");

    let callback_url = prompt("\nPaste callback URL: ")?;
    let code = parse_callback(&callback_url, &state)?;

    let http_client = reqwest::Client::new();
    let mut params: Vec<(&str, String)> = vec![
        ("grant_type", "authorization_code".to_string()),
        ("client_id", client_id.clone()),
        ("code", code.clone()),
        ("redirect_uri", redirect_uri.clone()),
        ("code_verifier", pkce.code_verifier.clone()),
        ("audience", config.fleet_base_url.clone()),
    ];
    if let Some(ref secret) = client_secret {
        params.push(("client_secret", secret.clone()));
    }

    let token_url = config.token_url();
    let response = http_client.post(&token_url).form(&params).send().await?;

    let grant: TokenGrant = if response.status().is_success() {
        response.json().await?
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !body.to_lowercase().contains("client_secret mismatch") {
            bail!("Token exchange failed ({}): {}", status, truncate(&body, 400));
        }

        // Stale secret in .env; retry with a freshly pasted one
        println!("\nTesla rejected the current client secret.");
        println!("Paste the CURRENT Client Secret from Tesla Developer App Details.");
        let fresh_secret = prompt("Client secret: ")?;
        if fresh_secret.is_empty() {
            bail!("Client secret is required");
        }

        params.retain(|(k, _)| *k != "client_secret");
        params.push(("client_secret", fresh_secret.clone()));

        let retry = http_client.post(&token_url).form(&params).send().await?;
        if !retry.status().is_success() {
            let status = retry.status();
            let body = retry.text().await.unwrap_or_default();
            bail!("Token exchange failed ({}): {}", status, truncate(&body, 400));
        }
        client_secret = Some(fresh_secret);
        retry.json().await?
    };

    let refresh_token = grant
        .refresh_token
        .context("Token response missing refresh token")?;
    if grant.access_token.is_empty() {
        bail!("Token response missing access token");
    }

    let expires_at = (chrono::Utc::now().timestamp() + grant.expires_in as i64).to_string();
    let expires_in = grant.expires_in.to_string();
    let secret_value = client_secret.unwrap_or_default();

    env_file::update_values(
        Path::new(".env"),
        &[
            ("TESLA_CLIENT_SECRET", secret_value.as_str()),
            ("TESLA_REFRESH_TOKEN", refresh_token.as_str()),
            ("TESLA_ACCESS_TOKEN", grant.access_token.as_str()),
            ("TESLA_EXPIRES_IN", expires_in.as_str()),
            ("TESLA_EXPIRES_AT", expires_at.as_str()),
        ],
    )?;

    println!("\nSuccess: Tesla tokens updated in .env");
    println!("Refresh token length: {}", refresh_token.len());
    println!("Access token length: {}", grant.access_token.len());
    println!("Restart the site after this.");

    Ok(())
}

fn prompt(message: &str) -> anyhow::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
