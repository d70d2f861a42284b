// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session and task logic over the Supabase client.

pub mod auth;
pub mod auth_events;
pub mod remote;
pub mod session;
pub mod supabase;
pub mod task_store;

pub use auth::AuthService;
pub use auth_events::{AuthChange, AuthEvents, Subscription};
pub use remote::{AuthApi, TaskApi};
pub use session::{SessionController, SessionTransition};
pub use supabase::SupabaseClient;
pub use task_store::TaskStore;
