// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task rows of the `tasks` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned task identifier (`int8` primary key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A task row as returned by PostgREST.
///
/// The owner column is defaulted server-side from the caller's JWT and is
/// never read or sent by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Primary key
    pub id: TaskId,
    /// Task text (non-empty)
    pub text: String,
    /// Completion flag (defaults to false on insert)
    #[serde(default)]
    pub is_completed: bool,
    /// Insert time, used for newest-first ordering
    pub created_at: DateTime<Utc>,
}

/// Insert payload: only the text, everything else is assigned by the server.
#[derive(Debug, Serialize)]
pub struct NewTask<'a> {
    pub text: &'a str,
}

/// Update payload for the completion flag.
#[derive(Debug, Serialize)]
pub struct CompletionPatch {
    pub is_completed: bool,
}
