// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! `AppError` is what the view surfaces to the user. Service messages are
//! carried verbatim so the alert reads exactly what Supabase said.

use reqwest::StatusCode;

/// Application error type surfaced as a user-visible alert.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Sign-up, sign-in or sign-out rejected (bad credentials, duplicate user, ...)
    #[error("{0}")]
    Auth(String),

    /// Table operation failed (network failure, permission denial, missing row)
    #[error("{0}")]
    Data(String),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Session expired, please sign in again")]
    SessionExpired,
}

/// Errors from the Supabase HTTP layer, before they are classified as auth or
/// data failures.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the service itself refused the request (4xx).
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if status.is_client_error())
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn into_auth(self) -> AppError {
        AppError::Auth(self.to_string())
    }

    pub fn into_data(self) -> AppError {
        AppError::Data(self.to_string())
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, AppError>;
