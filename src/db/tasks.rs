// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed operations on the `tasks` table.
//!
//! Row-level security scopes every request to the signed-in user; the owner
//! column is filled in by the database default, so it never appears here.

use crate::db::tables;
use crate::error::{AppError, Result};
use crate::models::{CompletionPatch, NewTask, Task, TaskId};
use crate::services::remote::TaskApi;
use crate::services::{AuthService, SupabaseClient};

/// `tasks` table client.
#[derive(Clone)]
pub struct TasksTable {
    client: SupabaseClient,
    auth: AuthService,
}

impl TasksTable {
    pub fn new(client: SupabaseClient, auth: AuthService) -> Self {
        Self { client, auth }
    }
}

/// PostgREST equality filter on the primary key.
fn id_filter(id: TaskId) -> String {
    format!("eq.{}", id)
}

impl TaskApi for TasksTable {
    async fn select_all(&self) -> Result<Vec<Task>> {
        let token = self.auth.access_token().await?;
        let tasks: Vec<Task> = self
            .client
            .select(
                tables::TASKS,
                &token,
                &[("select", "*"), ("order", "created_at.desc")],
            )
            .await
            .map_err(|e| e.into_data())?;

        tracing::debug!(count = tasks.len(), "Tasks fetched");
        Ok(tasks)
    }

    async fn insert(&self, text: &str) -> Result<Task> {
        let token = self.auth.access_token().await?;
        let rows: Vec<Task> = self
            .client
            .insert(tables::TASKS, &token, &NewTask { text })
            .await
            .map_err(|e| e.into_data())?;

        let task = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Data("Insert returned no row".to_string()))?;

        tracing::info!(task_id = %task.id, "Task inserted");
        Ok(task)
    }

    async fn update_completion(&self, id: TaskId, is_completed: bool) -> Result<()> {
        let token = self.auth.access_token().await?;
        let filter = id_filter(id);
        let rows: Vec<Task> = self
            .client
            .update(
                tables::TASKS,
                &token,
                &[("id", filter.as_str())],
                &CompletionPatch { is_completed },
            )
            .await
            .map_err(|e| e.into_data())?;

        if rows.is_empty() {
            return Err(AppError::Data(format!("Task {} not found", id)));
        }

        tracing::info!(task_id = %id, is_completed, "Task updated");
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        let token = self.auth.access_token().await?;
        let filter = id_filter(id);
        let rows: Vec<Task> = self
            .client
            .delete(tables::TASKS, &token, &[("id", filter.as_str())])
            .await
            .map_err(|e| e.into_data())?;

        if rows.is_empty() {
            return Err(AppError::Data(format!("Task {} not found", id)));
        }

        tracing::info!(task_id = %id, "Task deleted");
        Ok(())
    }
}
