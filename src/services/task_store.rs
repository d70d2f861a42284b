// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local mirror of the signed-in user's task rows.
//!
//! The remote table is the source of truth. After each successful mutation
//! the mirror is patched with the one affected row; a failed call leaves it
//! untouched. A full refetch happens only through [`TaskStore::refresh`].

use crate::error::Result;
use crate::models::{Task, TaskId};
use crate::services::remote::TaskApi;
use std::sync::Arc;

pub struct TaskStore<T> {
    api: Arc<T>,
    tasks: Vec<Task>,
}

impl<T: TaskApi> TaskStore<T> {
    pub fn new(api: Arc<T>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
        }
    }

    /// Rows in display order (newest first).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Replace the mirror with all remote rows.
    pub async fn refresh(&mut self) -> Result<()> {
        let tasks = self.api.select_all().await?;
        tracing::debug!(count = tasks.len(), "Task list refreshed");
        self.tasks = tasks;
        Ok(())
    }

    /// Insert a task and prepend the persisted row.
    ///
    /// Blank text is ignored without a remote call and yields `Ok(None)`.
    pub async fn add(&mut self, text: &str) -> Result<Option<TaskId>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let task = self.api.insert(text).await?;
        let id = task.id;
        self.tasks.insert(0, task);
        Ok(Some(id))
    }

    /// Set the completion flag of `id` to `!current`.
    ///
    /// The update is blind: the row is not re-read first.
    pub async fn toggle_complete(&mut self, id: TaskId, current: bool) -> Result<()> {
        self.api.update_completion(id, !current).await?;
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.is_completed = !current;
        }
        Ok(())
    }

    pub async fn remove(&mut self, id: TaskId) -> Result<()> {
        self.api.delete(id).await?;
        self.tasks.retain(|task| task.id != id);
        Ok(())
    }

    /// Empty the mirror without touching the remote table.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
