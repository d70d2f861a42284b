// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase Auth service with session and token lifecycle.
//!
//! Holds the one session of this client process, refreshes the access token
//! before it expires and announces every session change through
//! [`AuthEvents`].

use crate::error::{AppError, Result};
use crate::models::{Session, SignUpOutcome, SignUpResponse};
use crate::services::auth_events::{AuthChange, AuthEvents, Subscription};
use crate::services::remote::AuthApi;
use crate::services::supabase::SupabaseClient;
use chrono::{Duration, Utc};
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Margin before token expiration when we proactively refresh (5 minutes).
const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

struct AuthInner {
    client: SupabaseClient,
    session: RwLock<Option<Session>>,
    /// Serializes refresh-token grants so one expiry triggers one refresh.
    refresh_lock: Mutex<()>,
    events: AuthEvents,
}

/// High-level auth service shared by the session controller and the tables.
#[derive(Clone)]
pub struct AuthService {
    inner: Arc<AuthInner>,
}

impl AuthService {
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            inner: Arc::new(AuthInner {
                client,
                session: RwLock::new(None),
                refresh_lock: Mutex::new(()),
                events: AuthEvents::new(),
            }),
        }
    }

    /// Restore a session from a stored refresh token.
    ///
    /// Called once at startup, before any listener exists.
    pub async fn restore(&self, refresh_token: &str) -> Result<Session> {
        let session = self
            .inner
            .client
            .refresh_session(refresh_token)
            .await
            .and_then(|tokens| tokens.into_session(Utc::now()))
            .map_err(|e| e.into_auth())?;

        tracing::info!(user_id = %session.user_id(), "Session restored from refresh token");
        *self.inner.session.write().await = Some(session.clone());
        Ok(session)
    }

    /// Get a valid (non-expired) access token for the current session.
    ///
    /// 1. Return the cached token if it is not close to expiry
    /// 2. Otherwise take the refresh lock and re-check (another caller may
    ///    have refreshed while we waited)
    /// 3. Refresh with Supabase; a rejected refresh token ends the session
    pub async fn access_token(&self) -> Result<String> {
        let margin = Duration::seconds(TOKEN_REFRESH_MARGIN_SECS);

        match self.inner.session.read().await.as_ref() {
            None => return Err(AppError::NotSignedIn),
            Some(session) if !session.expires_within(margin, Utc::now()) => {
                return Ok(session.access_token.clone());
            }
            Some(_) => {}
        }

        let _guard = self.inner.refresh_lock.lock().await;

        let refresh_token = match self.inner.session.read().await.as_ref() {
            None => return Err(AppError::NotSignedIn),
            Some(session) if !session.expires_within(margin, Utc::now()) => {
                return Ok(session.access_token.clone());
            }
            Some(session) => session.refresh_token.clone(),
        };

        tracing::info!("Access token expiring, refreshing");

        let refreshed = self
            .inner
            .client
            .refresh_session(&refresh_token)
            .await
            .and_then(|tokens| tokens.into_session(Utc::now()));

        match refreshed {
            Ok(session) => {
                let access_token = session.access_token.clone();
                *self.inner.session.write().await = Some(session.clone());
                self.inner.events.emit(AuthChange::TokenRefreshed(session));
                tracing::info!("Token refreshed");
                Ok(access_token)
            }
            Err(e) if e.is_rejection() => {
                tracing::warn!(error = %e, "Refresh token rejected, ending session");
                *self.inner.session.write().await = None;
                self.inner.events.emit(AuthChange::SignedOut);
                Err(AppError::SessionExpired)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, keeping session");
                Err(e.into_auth())
            }
        }
    }

    /// Install a new session and announce it.
    async fn set_signed_in(&self, session: Session) {
        tracing::info!(user_id = %session.user_id(), "Signed in");
        *self.inner.session.write().await = Some(session.clone());
        self.inner.events.emit(AuthChange::SignedIn(session));
    }
}

impl AuthApi for AuthService {
    async fn current_session(&self) -> Result<Option<Session>> {
        if self.inner.session.read().await.is_none() {
            return Ok(None);
        }

        // Make sure a near-expiry session is refreshed (or dropped) first.
        match self.access_token().await {
            Ok(_) => Ok(self.inner.session.read().await.clone()),
            Err(AppError::SessionExpired) | Err(AppError::NotSignedIn) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn subscribe(&self) -> Subscription {
        self.inner.events.subscribe()
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        let response = self
            .inner
            .client
            .sign_up(email, password)
            .await
            .map_err(|e| e.into_auth())?;

        match response {
            SignUpResponse::Session(tokens) => {
                let session = tokens
                    .into_session(Utc::now())
                    .map_err(|e| e.into_auth())?;
                self.set_signed_in(session).await;
                Ok(SignUpOutcome::SignedIn)
            }
            SignUpResponse::User(user) => {
                tracing::info!(user_id = %user.id, "Sign-up pending email confirmation");
                Ok(SignUpOutcome::ConfirmationRequired)
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        let tokens = self
            .inner
            .client
            .sign_in_with_password(email, password)
            .await
            .map_err(|e| {
                tracing::info!(error = %e, "Sign-in rejected");
                e.into_auth()
            })?;

        let session = tokens
            .into_session(Utc::now())
            .map_err(|e| e.into_auth())?;
        self.set_signed_in(session).await;
        Ok(())
    }

    /// Revoke the session remotely and drop it locally.
    ///
    /// The local session is dropped even when the remote call fails; 401 and
    /// 404 mean the session was already gone and are not reported.
    async fn sign_out(&self) -> Result<()> {
        let Some(session) = self.inner.session.write().await.take() else {
            return Ok(());
        };

        let result = match self.inner.client.sign_out(&session.access_token).await {
            Ok(()) => Ok(()),
            Err(e) if matches!(e.status(), Some(StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND)) => {
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Remote sign-out failed");
                Err(e.into_auth())
            }
        };

        tracing::info!(user_id = %session.user_id(), "Signed out");
        self.inner.events.emit(AuthChange::SignedOut);
        result
    }
}
