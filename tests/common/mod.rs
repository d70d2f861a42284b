// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory stand-in for the Supabase backend.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use supabase_todos::error::{AppError, Result};
use supabase_todos::models::{Session, SignUpOutcome, Task, TaskId, User};
use supabase_todos::services::{AuthApi, AuthChange, AuthEvents, Subscription, TaskApi};
use supabase_todos::ui::App;

struct Account {
    id: String,
    password: String,
}

struct Row {
    owner: String,
    task: Task,
}

#[derive(Default)]
struct FakeState {
    accounts: HashMap<String, Account>,
    session: Option<Session>,
    rows: Vec<Row>,
    next_id: i64,
    table_calls: usize,
    fail_next: Option<String>,
    auto_confirm: bool,
}

/// Fake backend implementing both the auth and table contracts.
///
/// Rows are scoped to the signed-in user the way row-level security scopes
/// them on the real service.
#[derive(Default)]
pub struct FakeBackend {
    events: AuthEvents,
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A backend with one registered account.
    pub fn with_account(email: &str, password: &str) -> Arc<Self> {
        let backend = Self::new();
        backend.add_account(email, password);
        backend
    }

    pub fn add_account(&self, email: &str, password: &str) {
        let mut state = self.state.lock().unwrap();
        let id = format!("user-{}", state.accounts.len() + 1);
        state.accounts.insert(
            email.to_string(),
            Account {
                id,
                password: password.to_string(),
            },
        );
    }

    /// Make sign-up return a session immediately.
    pub fn set_auto_confirm(&self, auto_confirm: bool) {
        self.state.lock().unwrap().auto_confirm = auto_confirm;
    }

    /// Make the next remote call fail with `message`.
    pub fn fail_next(&self, message: &str) {
        self.state.lock().unwrap().fail_next = Some(message.to_string());
    }

    /// Number of table operations issued so far.
    pub fn table_calls(&self) -> usize {
        self.state.lock().unwrap().table_calls
    }

    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }

    /// Put a session in place without emitting a notification, as if it was
    /// restored before the app started.
    pub fn restore_session(&self, email: &str) {
        let mut state = self.state.lock().unwrap();
        let session = session_for(&state, email);
        state.session = Some(session);
    }

    /// Insert a row directly, bypassing the client (another device).
    pub fn insert_external(&self, email: &str, text: &str) -> TaskId {
        let mut state = self.state.lock().unwrap();
        let owner = state.accounts[email].id.clone();
        let task = new_row(&mut state, text);
        let id = task.id;
        state.rows.push(Row { owner, task });
        id
    }

    /// All remote rows owned by `email`.
    pub fn remote_rows(&self, email: &str) -> Vec<Task> {
        let state = self.state.lock().unwrap();
        let owner = &state.accounts[email].id;
        state
            .rows
            .iter()
            .filter(|row| &row.owner == owner)
            .map(|row| row.task.clone())
            .collect()
    }

    /// Emit a change as the real service would on token refresh or expiry.
    pub fn emit(&self, change: AuthChange) {
        if change.session().is_none() {
            self.state.lock().unwrap().session = None;
        }
        self.events.emit(change);
    }

    fn take_failure(state: &mut FakeState) -> Option<String> {
        state.fail_next.take()
    }

    fn owner(state: &FakeState) -> Result<String> {
        state
            .session
            .as_ref()
            .map(|s| s.user.id.clone())
            .ok_or(AppError::NotSignedIn)
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap()
}

fn new_row(state: &mut FakeState, text: &str) -> Task {
    state.next_id += 1;
    Task {
        id: TaskId(state.next_id),
        text: text.to_string(),
        is_completed: false,
        created_at: base_time() + Duration::seconds(state.next_id),
    }
}

fn session_for(state: &FakeState, email: &str) -> Session {
    let account = &state.accounts[email];
    Session {
        access_token: format!("access-{}", account.id),
        refresh_token: format!("refresh-{}", account.id),
        expires_at: Utc::now() + Duration::hours(1),
        user: User {
            id: account.id.clone(),
            email: Some(email.to_string()),
        },
    }
}

impl AuthApi for FakeBackend {
    async fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.state.lock().unwrap().session.clone())
    }

    fn subscribe(&self) -> Subscription {
        self.events.subscribe()
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = Self::take_failure(&mut state) {
            return Err(AppError::Auth(message));
        }
        if state.accounts.contains_key(email) {
            return Err(AppError::Auth("User already registered".to_string()));
        }

        let id = format!("user-{}", state.accounts.len() + 1);
        state.accounts.insert(
            email.to_string(),
            Account {
                id,
                password: password.to_string(),
            },
        );

        if !state.auto_confirm {
            return Ok(SignUpOutcome::ConfirmationRequired);
        }

        let session = session_for(&state, email);
        state.session = Some(session.clone());
        drop(state);
        self.events.emit(AuthChange::SignedIn(session));
        Ok(SignUpOutcome::SignedIn)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = Self::take_failure(&mut state) {
            return Err(AppError::Auth(message));
        }

        match state.accounts.get(email) {
            Some(account) if account.password == password => {}
            _ => return Err(AppError::Auth("Invalid login credentials".to_string())),
        }

        let session = session_for(&state, email);
        state.session = Some(session.clone());
        drop(state);
        self.events.emit(AuthChange::SignedIn(session));
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let failure = Self::take_failure(&mut state);
        if state.session.take().is_none() {
            return Ok(());
        }
        drop(state);

        self.events.emit(AuthChange::SignedOut);
        match failure {
            Some(message) => Err(AppError::Auth(message)),
            None => Ok(()),
        }
    }
}

impl TaskApi for FakeBackend {
    async fn select_all(&self) -> Result<Vec<Task>> {
        let mut state = self.state.lock().unwrap();
        state.table_calls += 1;
        if let Some(message) = Self::take_failure(&mut state) {
            return Err(AppError::Data(message));
        }
        let owner = Self::owner(&state)?;

        let mut tasks: Vec<Task> = state
            .rows
            .iter()
            .filter(|row| row.owner == owner)
            .map(|row| row.task.clone())
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn insert(&self, text: &str) -> Result<Task> {
        let mut state = self.state.lock().unwrap();
        state.table_calls += 1;
        if let Some(message) = Self::take_failure(&mut state) {
            return Err(AppError::Data(message));
        }
        let owner = Self::owner(&state)?;

        let task = new_row(&mut state, text);
        state.rows.push(Row {
            owner,
            task: task.clone(),
        });
        Ok(task)
    }

    async fn update_completion(&self, id: TaskId, is_completed: bool) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.table_calls += 1;
        if let Some(message) = Self::take_failure(&mut state) {
            return Err(AppError::Data(message));
        }
        let owner = Self::owner(&state)?;

        let row = state
            .rows
            .iter_mut()
            .find(|row| row.owner == owner && row.task.id == id)
            .ok_or_else(|| AppError::Data(format!("Task {} not found", id)))?;
        row.task.is_completed = is_completed;
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.table_calls += 1;
        if let Some(message) = Self::take_failure(&mut state) {
            return Err(AppError::Data(message));
        }
        let owner = Self::owner(&state)?;

        let before = state.rows.len();
        state
            .rows
            .retain(|row| !(row.owner == owner && row.task.id == id));
        if state.rows.len() == before {
            return Err(AppError::Data(format!("Task {} not found", id)));
        }
        Ok(())
    }
}

/// A mounted app wired to `backend` for both contracts.
pub async fn mounted_app(backend: &Arc<FakeBackend>) -> App<FakeBackend, FakeBackend> {
    let mut app = App::new(backend.clone(), backend.clone());
    app.mount().await;
    app
}
