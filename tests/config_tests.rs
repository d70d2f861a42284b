// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Configuration tests for Supabase API key handling.
//!
//! Keys are minted here with a throwaway secret; the client only reads the
//! payload, so any signature must be accepted.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use supabase_todos::config::{api_key_claims, Config, ConfigError};

#[derive(Serialize)]
struct KeyClaims<'a> {
    iss: &'a str,
    #[serde(rename = "ref")]
    project_ref: &'a str,
    role: &'a str,
    iat: u64,
    exp: u64,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn create_test_key(role: &str, exp: u64) -> String {
    let claims = KeyClaims {
        iss: "supabase",
        project_ref: "abcdefghijklmnop",
        role,
        iat: now() - 60,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"not_the_project_secret"),
    )
    .expect("Failed to create key")
}

fn load(anon_key: &str) -> Result<Config, ConfigError> {
    let vars: HashMap<&str, String> = HashMap::from([
        ("SUPABASE_URL", "https://abcdefghijklmnop.supabase.co".to_string()),
        ("SUPABASE_ANON_KEY", anon_key.to_string()),
    ]);
    Config::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn test_anon_key_accepted() {
    let key = create_test_key("anon", now() + 86400 * 365);

    let config = load(&key).expect("anon key should load");
    assert_eq!(config.anon_key, key);
}

#[test]
fn test_claims_are_read_without_secret() {
    let key = create_test_key("anon", now() + 3600);

    let claims = api_key_claims(&key).unwrap();
    assert_eq!(claims.role, "anon");
    assert_eq!(claims.project_ref.as_deref(), Some("abcdefghijklmnop"));
    assert!(claims.exp.is_some());
}

#[test]
fn test_service_role_key_rejected() {
    let key = create_test_key("service_role", now() + 3600);

    let err = load(&key).unwrap_err();
    assert!(matches!(err, ConfigError::ServiceRoleKey));
}

#[test]
fn test_expired_key_rejected() {
    let key = create_test_key("anon", now() - 60);

    let err = load(&key).unwrap_err();
    assert!(matches!(err, ConfigError::ExpiredKey));
}

#[test]
fn test_publishable_key_passes_unchecked() {
    let config = load("sb_publishable_Xy12_ab34").unwrap();
    assert_eq!(config.anon_key, "sb_publishable_Xy12_ab34");
}

#[test]
fn test_malformed_jwt_rejected() {
    let err = load("not.a.jwt").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidKey(_)));
}

#[test]
fn test_missing_key() {
    let vars: HashMap<&str, String> =
        HashMap::from([("SUPABASE_URL", "https://x.supabase.co".to_string())]);

    let err = Config::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
    assert!(matches!(err, ConfigError::Missing("SUPABASE_ANON_KEY")));
    assert_eq!(
        err.to_string(),
        "Missing required environment variable: SUPABASE_ANON_KEY"
    );
}
