// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Terminal presentation layer.

pub mod app;
pub mod command;
pub mod view;

pub use app::{App, Flow};
pub use command::{Command, CommandError, Credentials};
pub use view::{AuthForm, Notice, View};
