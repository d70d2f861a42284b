// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod session;
pub mod task;

pub use session::{Session, SignUpOutcome, SignUpResponse, TokenResponse, User};
pub use task::{CompletionPatch, NewTask, Task, TaskId};
