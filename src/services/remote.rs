// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contract of the remote backend, split into auth and table operations.
//!
//! The app runs on a single-threaded runtime, so the futures returned here
//! are not required to be `Send`.
#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::models::{Session, SignUpOutcome, Task, TaskId};
use crate::services::auth_events::Subscription;

/// Session management offered by the backend.
pub trait AuthApi {
    /// The session the backend currently holds, if any.
    async fn current_session(&self) -> Result<Option<Session>>;

    /// Register for session-change notifications.
    fn subscribe(&self) -> Subscription;

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome>;

    /// Sign in. The new session is announced through the notification path.
    async fn sign_in(&self, email: &str, password: &str) -> Result<()>;

    async fn sign_out(&self) -> Result<()>;
}

/// Operations on the `tasks` table, scoped to the signed-in user.
pub trait TaskApi {
    /// All rows, newest first.
    async fn select_all(&self) -> Result<Vec<Task>>;

    /// Insert a row with only `text` set and return the persisted row.
    async fn insert(&self, text: &str) -> Result<Task>;

    async fn update_completion(&self, id: TaskId, is_completed: bool) -> Result<()>;

    async fn delete(&self, id: TaskId) -> Result<()>;
}
