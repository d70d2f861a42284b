// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authenticated session issued by Supabase Auth.

use crate::error::ApiError;
use crate::time_utils::expiry_from;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supabase Auth user (only the fields the app reads).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Auth user UUID; owner of the user's task rows
    pub id: String,
    /// Email address (absent for phone-only users)
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session.
///
/// Tokens are only handed to the HTTP layer and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn email(&self) -> &str {
        self.user.email.as_deref().unwrap_or("")
    }

    /// True if the access token expires within `margin` of `now`.
    pub fn expires_within(&self, margin: Duration, now: DateTime<Utc>) -> bool {
        now + margin >= self.expires_at
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Token grant response from `/auth/v1/token` (and auto-confirmed sign-up).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl TokenResponse {
    pub fn into_session(self, now: DateTime<Utc>) -> Result<Session, ApiError> {
        let expires_at = expiry_from(self.expires_at, self.expires_in, now).ok_or_else(|| {
            ApiError::Decode(format!("invalid expires_in: {}", self.expires_in))
        })?;

        Ok(Session {
            expires_at,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user: self.user,
        })
    }
}

/// `/auth/v1/signup` answers with a full session when the project
/// auto-confirms, or with just the new user when e-mail verification is on.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(TokenResponse),
    User(User),
}

/// What a successful sign-up means for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Account created; a verification e-mail must be confirmed first.
    ConfirmationRequired,
    /// Account created and signed in; a `SignedIn` notification follows.
    SignedIn,
}
