// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Supabase Todos: a single-page task list backed by Supabase
//!
//! This crate provides the session and task-list synchronization over the
//! Supabase Auth and PostgREST APIs, plus a terminal view on top of it.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
pub mod ui;

use config::Config;
use db::TasksTable;
use services::{AuthService, SupabaseClient};
use std::sync::Arc;

/// Remote backend handles shared by the app.
pub struct Backend {
    pub config: Config,
    pub auth: Arc<AuthService>,
    pub tasks: Arc<TasksTable>,
}

impl Backend {
    /// Build the Supabase clients and restore a configured session, if any.
    pub async fn connect(config: Config) -> Self {
        let client = SupabaseClient::new(&config);
        let auth = AuthService::new(client.clone());
        let tasks = TasksTable::new(client, auth.clone());

        if let Some(refresh_token) = config.refresh_token.as_deref() {
            if let Err(e) = auth.restore(refresh_token).await {
                tracing::warn!(error = %e, "Could not restore session, starting signed out");
            }
        }

        tracing::info!(url = %config.supabase_url, "Supabase backend ready");

        Self {
            config,
            auth: Arc::new(auth),
            tasks: Arc::new(tasks),
        }
    }
}
