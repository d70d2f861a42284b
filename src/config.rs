// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The Supabase project URL and anon key are process-wide and immutable once
//! loaded.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::env;

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    /// Supabase project URL (e.g. `https://<ref>.supabase.co`)
    pub supabase_url: String,
    /// Public anon key, sent as `apikey` on every request
    pub anon_key: String,
    /// Refresh token used to restore a session at startup
    pub refresh_token: Option<String>,
    /// Emit JSON logs instead of compact text
    pub log_json: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("supabase_url", &self.supabase_url)
            .field("anon_key", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("log_json", &self.log_json)
            .finish()
    }
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            anon_key: "test_anon_key".to_string(),
            refresh_token: None,
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let supabase_url = lookup("SUPABASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_URL"))?;

        let parsed =
            reqwest::Url::parse(&supabase_url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let anon_key = lookup("SUPABASE_ANON_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;
        check_anon_key(&anon_key, chrono::Utc::now().timestamp())?;

        Ok(Self {
            supabase_url,
            anon_key,
            refresh_token: lookup("SUPABASE_REFRESH_TOKEN")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            log_json: lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        })
    }
}

/// Claims carried by a legacy JWT-style Supabase API key.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyClaims {
    pub role: String,
    #[serde(rename = "ref")]
    pub project_ref: Option<String>,
    pub exp: Option<i64>,
}

/// Read the claims of a JWT-shaped API key without checking its signature.
///
/// The client never holds the project's JWT secret, so only the payload is
/// inspected.
pub fn api_key_claims(key: &str) -> Result<ApiKeyClaims, ConfigError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<ApiKeyClaims>(key, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| ConfigError::InvalidKey(e.to_string()))
}

/// Reject keys a public client must not run with.
///
/// Non-JWT keys (the newer `sb_publishable_...` format) pass unchecked.
fn check_anon_key(key: &str, now: i64) -> Result<(), ConfigError> {
    if key.split('.').count() != 3 {
        return Ok(());
    }

    let claims = api_key_claims(key)?;
    if claims.role == "service_role" {
        return Err(ConfigError::ServiceRoleKey);
    }
    if claims.exp.is_some_and(|exp| exp <= now) {
        return Err(ConfigError::ExpiredKey);
    }

    tracing::debug!(
        role = %claims.role,
        project_ref = claims.project_ref.as_deref().unwrap_or("-"),
        "Anon key accepted"
    );
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid SUPABASE_URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid SUPABASE_ANON_KEY: {0}")]
    InvalidKey(String),

    #[error("SUPABASE_ANON_KEY is a service_role key; use the public anon key")]
    ServiceRoleKey,

    #[error("SUPABASE_ANON_KEY has expired")]
    ExpiredKey,
}
