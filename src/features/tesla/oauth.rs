//! OAuth authorization-code helpers for the Fleet API.
//!
//! Used by the `get-tesla-token` utility binary: PKCE pair generation and
//! parsing of the pasted callback URL.

use base64::prelude::*;
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Scopes requested during the interactive token flow
pub const DEFAULT_SCOPES: &str = "openid offline_access user_data vehicle_device_data";

/// PKCE verifier/challenge pair (S256 method)
#[derive(Debug, Clone)]
pub struct PkcePair {
    pub code_verifier: String,
    pub code_challenge: String,
}

/// Generate a PKCE pair: 48 random bytes as the base64url verifier, its
/// SHA-256 digest as the base64url challenge.
pub fn make_pkce_pair() -> PkcePair {
    let mut bytes = [0u8; 48];
    rand::rng().fill_bytes(&mut bytes);
    let code_verifier = BASE64_URL_SAFE_NO_PAD.encode(bytes);

    let code_challenge = challenge_for(&code_verifier);

    PkcePair {
        code_verifier,
        code_challenge,
    }
}

fn challenge_for(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    BASE64_URL_SAFE_NO_PAD.encode(digest)
}

/// Random URL-safe state parameter
pub fn random_state() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("Invalid callback URL: {0}")]
    InvalidUrl(String),

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error(
        "You pasted the authorize URL, not the callback URL. \
         Complete login and paste the redirected URL from your configured redirect URI page."
    )]
    AuthorizeUrlPasted,

    #[error(
        "No authorization code found in callback URL. \
         Ensure TESLA_REDIRECT_URI exactly matches the Allowed Redirect URI in Tesla Developer."
    )]
    MissingCode,

    #[error("State mismatch; aborting")]
    StateMismatch,
}

/// Extract the authorization code from a pasted callback URL, checking the
/// returned state against the one we sent.
pub fn parse_callback(callback_url: &str, expected_state: &str) -> Result<String, CallbackError> {
    let url = reqwest::Url::parse(callback_url.trim())
        .map_err(|e| CallbackError::InvalidUrl(e.to_string()))?;

    let mut code = None;
    let mut returned_state = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => return Err(CallbackError::OAuth(value.into_owned())),
            "code" => code = Some(value.into_owned()),
            "state" => returned_state = Some(value.into_owned()),
            _ => {}
        }
    }

    let Some(code) = code else {
        if url.path().contains("/oauth2/v3/authorize") {
            return Err(CallbackError::AuthorizeUrlPasted);
        }
        return Err(CallbackError::MissingCode);
    };

    if returned_state.as_deref() != Some(expected_state) {
        return Err(CallbackError::StateMismatch);
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pkce_pair_shape() {
        let pair = make_pkce_pair();
        // 48 bytes -> 64 base64url chars, no padding
        assert_eq!(pair.code_verifier.len(), 64);
        assert!(!pair.code_verifier.contains('='));
        // 32-byte digest -> 43 chars
        assert_eq!(pair.code_challenge.len(), 43);
        assert_eq!(pair.code_challenge, challenge_for(&pair.code_verifier));
    }

    #[test]
    fn test_challenge_matches_known_vector() {
        // RFC 7636 appendix B
        assert_eq!(
            challenge_for("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn test_parse_callback_extracts_code() {
        let code = parse_callback(
            "https://example.com/callback?code=abc123&state=xyz",
            "xyz",
        )
        .unwrap();
        assert_eq!(code, "abc123");
    }

    #[test]
    fn test_parse_callback_rejects_state_mismatch() {
        let result = parse_callback(
            "https://example.com/callback?code=abc123&state=tampered",
            "xyz",
        );
        assert!(matches!(result, Err(CallbackError::StateMismatch)));
    }

    #[test]
    fn test_parse_callback_surfaces_oauth_error() {
        let result = parse_callback(
            "https://example.com/callback?error=access_denied&state=xyz",
            "xyz",
        );
        assert!(matches!(result, Err(CallbackError::OAuth(_))));
    }

    #[test]
    fn test_parse_callback_detects_pasted_authorize_url() {
        let result = parse_callback(
            "https://auth.tesla.com/oauth2/v3/authorize?client_id=abc",
            "xyz",
        );
        assert!(matches!(result, Err(CallbackError::AuthorizeUrlPasted)));
    }

    #[test]
    fn test_parse_callback_missing_code() {
        let result = parse_callback("https://example.com/callback?state=xyz", "xyz");
        assert!(matches!(result, Err(CallbackError::MissingCode)));
    }
}
