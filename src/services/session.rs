// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session controller: the app's view of who is signed in.
//!
//! The local session is only ever written by [`SessionController::initialize`]
//! and by folding in notifications with [`SessionController::apply`]; the
//! return values of sign-in and sign-up never set it directly.

use crate::error::Result;
use crate::models::{Session, SignUpOutcome};
use crate::services::auth_events::{AuthChange, Subscription};
use crate::services::remote::{AuthApi, TaskApi};
use crate::services::task_store::TaskStore;
use std::sync::Arc;

/// Effect of a session change on dependent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTransition {
    /// A session became present (or a different user signed in): refetch.
    Started,
    /// The session went away: clear local data.
    Ended,
    /// Same user, new tokens.
    Refreshed,
    Unchanged,
}

pub struct SessionController<A> {
    auth: Arc<A>,
    session: Option<Session>,
}

impl<A: AuthApi> SessionController<A> {
    pub fn new(auth: Arc<A>) -> Self {
        Self {
            auth,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Load whatever session the backend already holds.
    pub async fn initialize(&mut self) -> Result<SessionTransition> {
        let session = self.auth.current_session().await?;
        Ok(self.replace(session))
    }

    /// Register for session-change notifications.
    pub fn subscribe(&self) -> Subscription {
        self.auth.subscribe()
    }

    /// Fold one notification into the local session.
    pub fn apply(&mut self, change: AuthChange) -> SessionTransition {
        match change {
            AuthChange::SignedIn(session) | AuthChange::TokenRefreshed(session) => {
                self.replace(Some(session))
            }
            AuthChange::SignedOut => self.replace(None),
        }
    }

    fn replace(&mut self, next: Option<Session>) -> SessionTransition {
        let transition = match (self.session.as_ref(), next.as_ref()) {
            (None, None) => SessionTransition::Unchanged,
            (Some(_), None) => SessionTransition::Ended,
            (None, Some(_)) => SessionTransition::Started,
            (Some(prev), Some(next)) if prev.user_id() != next.user_id() => {
                SessionTransition::Started
            }
            (Some(_), Some(_)) => SessionTransition::Refreshed,
        };

        self.session = next;
        transition
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        self.auth.sign_up(email, password).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        self.auth.sign_in(email, password).await
    }

    /// Sign out and clear `tasks`, whether or not the remote call succeeded,
    /// so the next user never sees the previous user's rows.
    pub async fn sign_out<T: TaskApi>(&self, tasks: &mut TaskStore<T>) -> Result<()> {
        let result = self.auth.sign_out().await;
        tasks.clear();
        result
    }
}
