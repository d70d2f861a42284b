// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The two views of the app and their text rendering.

use crate::models::{Session, Task};
use crate::time_utils::format_short;
use crate::ui::command::Command;
use std::fmt::Write as _;

const STRIKE: &str = "\u{1b}[9m";
const RESET: &str = "\u{1b}[0m";

/// Which page is on screen. Determined only by session presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Credential form with sign-in / sign-up.
    Unauthenticated,
    /// Task list with add / toggle / remove / sign-out.
    Authenticated,
}

impl View {
    pub fn for_session(session: Option<&Session>) -> Self {
        match session {
            Some(_) => View::Authenticated,
            None => View::Unauthenticated,
        }
    }

    /// Whether this view offers `command`.
    pub fn allows(self, command: &Command) -> bool {
        match command {
            Command::Help | Command::Quit => true,
            Command::Email(_)
            | Command::Password(_)
            | Command::SignIn(_)
            | Command::SignUp(_) => self == View::Unauthenticated,
            Command::Add(_) | Command::Toggle(_) | Command::Remove(_) | Command::SignOut => {
                self == View::Authenticated
            }
        }
    }
}

/// Contents of the credential form.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
}

/// A message shown above the current view until the next command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Info(String),
}

fn write_notice(out: &mut String, notice: Option<&Notice>) {
    match notice {
        Some(Notice::Error(message)) => {
            let _ = writeln!(out, "!! {}", message);
        }
        Some(Notice::Info(message)) => {
            let _ = writeln!(out, "-- {}", message);
        }
        None => {}
    }
}

/// Render the credential form.
pub fn render_auth(form: &AuthForm, notice: Option<&Notice>) -> String {
    let mut out = String::new();
    write_notice(&mut out, notice);

    let email = if form.email.is_empty() {
        "Your email"
    } else {
        form.email.as_str()
    };
    let password = if form.password.is_empty() {
        "Your password".to_string()
    } else {
        "*".repeat(form.password.chars().count())
    };

    let _ = writeln!(out, "Supabase Todos");
    let _ = writeln!(out, "Sign in or create an account");
    let _ = writeln!(out);
    let _ = writeln!(out, "  email:    {}", email);
    let _ = writeln!(out, "  password: {}", password);
    let _ = writeln!(out);
    let _ = writeln!(out, "[signin] [signup]");
    out
}

/// Render the task list page.
pub fn render_tasks(email: &str, tasks: &[Task], notice: Option<&Notice>) -> String {
    let mut out = String::new();
    write_notice(&mut out, notice);

    let _ = writeln!(out, "My Supabase Todo List                [signout]");
    let _ = writeln!(out, "Welcome, {}", email);
    let _ = writeln!(out);
    let _ = writeln!(out, "add <text>  to add a new task...");
    let _ = writeln!(out);

    for (row, task) in tasks.iter().enumerate() {
        let _ = writeln!(out, "{}", render_row(row + 1, task));
    }

    if tasks.is_empty() {
        let _ = writeln!(out, "You have no tasks. Add one above!");
    }
    out
}

fn render_row(row: usize, task: &Task) -> String {
    let added = format_short(task.created_at);
    if task.is_completed {
        format!("{:>3}. [x] {}{}{}  ({})", row, STRIKE, task.text, RESET, added)
    } else {
        format!("{:>3}. [ ] {}  ({})", row, task.text, added)
    }
}

/// The overlay printed while a remote call is in flight.
pub fn render_loading(view: View) -> &'static str {
    match view {
        View::Unauthenticated => "Loading...",
        View::Authenticated => "...",
    }
}

/// Commands offered by `view`.
pub fn render_help(view: View) -> String {
    let lines: &[&str] = match view {
        View::Unauthenticated => &[
            "email <address>             fill in the email field",
            "password <password>         fill in the password field",
            "signin [<email> <password>] sign in",
            "signup [<email> <password>] create an account",
            "quit                        exit",
        ],
        View::Authenticated => &[
            "add <text>                  add a task",
            "toggle <row>                mark a task done / not done",
            "rm <row>                    delete a task",
            "signout                     sign out",
            "quit                        exit",
        ],
    };
    lines.join("\n")
}
