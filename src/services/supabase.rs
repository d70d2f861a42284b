// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase HTTP client for the Auth (GoTrue) and REST (PostgREST) APIs.
//!
//! Handles:
//! - Password sign-up / sign-in and refresh-token grants
//! - Sign-out (token revocation)
//! - Row select/insert/update/delete on a single table
//! - Decoding service error bodies into verbatim messages

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{SignUpResponse, TokenResponse};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Low-level Supabase API client.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    auth_url: String,
    rest_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a new client for the configured project.
    pub fn new(config: &Config) -> Self {
        let base = config.supabase_url.trim_end_matches('/');
        Self {
            http: reqwest::Client::new(),
            auth_url: format!("{}/auth/v1", base),
            rest_url: format!("{}/rest/v1", base),
            anon_key: config.anon_key.clone(),
        }
    }

    // ─── Auth ────────────────────────────────────────────────────────────────

    /// Register a new user with email and password.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResponse, ApiError> {
        let response = self
            .auth_request(reqwest::Method::POST, "signup")
            .json(&Credentials { email, password })
            .send()
            .await?;

        check_response_json(response).await
    }

    /// Exchange email and password for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let response = self
            .auth_request(reqwest::Method::POST, "token")
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password })
            .send()
            .await?;

        check_response_json(response).await
    }

    /// Exchange a refresh token for a new session.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        let response = self
            .auth_request(reqwest::Method::POST, "token")
            .query(&[("grant_type", "refresh_token")])
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        check_response_json(response).await
    }

    /// Revoke the session behind `access_token`.
    ///
    /// POST {url}/auth/v1/logout
    /// Authorization: Bearer {access_token}
    pub async fn sign_out(&self, access_token: &str) -> Result<(), ApiError> {
        let response = self
            .auth_request(reqwest::Method::POST, "logout")
            .bearer_auth(access_token)
            .send()
            .await?;

        check_response(response).await
    }

    // ─── Tables ──────────────────────────────────────────────────────────────

    /// `GET /rest/v1/{table}` with PostgREST query parameters.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        access_token: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ApiError> {
        let response = self
            .rest_request(reqwest::Method::GET, table, access_token)
            .query(query)
            .send()
            .await?;

        check_response_json(response).await
    }

    /// `POST /rest/v1/{table}`, returning the inserted rows.
    pub async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        access_token: &str,
        body: &B,
    ) -> Result<Vec<T>, ApiError> {
        let response = self
            .rest_request(reqwest::Method::POST, table, access_token)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        check_response_json(response).await
    }

    /// `PATCH /rest/v1/{table}?{filter}`, returning the updated rows.
    pub async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        access_token: &str,
        filter: &[(&str, &str)],
        body: &B,
    ) -> Result<Vec<T>, ApiError> {
        let response = self
            .rest_request(reqwest::Method::PATCH, table, access_token)
            .query(filter)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        check_response_json(response).await
    }

    /// `DELETE /rest/v1/{table}?{filter}`, returning the deleted rows.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        table: &str,
        access_token: &str,
        filter: &[(&str, &str)],
    ) -> Result<Vec<T>, ApiError> {
        let response = self
            .rest_request(reqwest::Method::DELETE, table, access_token)
            .query(filter)
            .header("Prefer", "return=representation")
            .send()
            .await?;

        check_response_json(response).await
    }

    fn auth_request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.auth_url, path))
            .header("apikey", self.anon_key.as_str())
    }

    fn rest_request(&self, method: reqwest::Method, table: &str, access_token: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(access_token)
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Error body shapes used by GoTrue (`error_description`, `msg`) and
/// PostgREST (`message`).
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

/// Pick the human-readable message out of an error body.
fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .error_description
        .or(parsed.msg)
        .or(parsed.message)
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<(), ApiError> {
    if response.status().is_success() {
        return Ok(());
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!("Supabase rate limit hit (429)");
    }

    Err(ApiError::Status {
        status,
        message: error_message(status, &body),
    })
}

/// Check response and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Supabase rate limit hit (429)");
        }

        return Err(ApiError::Status {
            status,
            message: error_message(status, &body),
        });
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(format!("JSON parse error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gotrue_error_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Invalid login credentials"
        );
    }

    #[test]
    fn test_gotrue_msg() {
        let body = r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#;
        assert_eq!(
            error_message(StatusCode::UNPROCESSABLE_ENTITY, body),
            "User already registered"
        );
    }

    #[test]
    fn test_postgrest_message() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy for table \"tasks\""}"#;
        assert_eq!(
            error_message(StatusCode::FORBIDDEN, body),
            "new row violates row-level security policy for table \"tasks\""
        );
    }

    #[test]
    fn test_non_json_body_falls_back_to_status() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "HTTP 502 Bad Gateway: upstream down"
        );
    }

    #[test]
    fn test_urls_from_config() {
        let config = Config {
            supabase_url: "https://abc.supabase.co/".to_string(),
            ..Config::default()
        };
        let client = SupabaseClient::new(&config);
        assert_eq!(client.auth_url, "https://abc.supabase.co/auth/v1");
        assert_eq!(client.rest_url, "https://abc.supabase.co/rest/v1");
    }
}
