// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parsing of typed input lines into user actions.

/// Email and password typed inline, e.g. `signin me@example.com hunter2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fill the email field of the auth form.
    Email(String),
    /// Fill the password field of the auth form.
    Password(String),
    SignIn(Option<Credentials>),
    SignUp(Option<Credentials>),
    /// Add a task; blank text is accepted here and ignored by the store.
    Add(String),
    /// Toggle the task at the given 1-based row.
    Toggle(usize),
    /// Delete the task at the given 1-based row.
    Remove(usize),
    SignOut,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command '{0}'. Type 'help' for the list of commands")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a row number")]
    BadRow(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_start();
        // Task text is kept as typed; only the separator after the verb goes.
        let (verb, raw) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = raw.trim();

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "email" => Ok(Command::Email(rest.to_string())),
            "password" => Ok(Command::Password(rest.to_string())),
            "signin" | "login" => {
                parse_credentials(rest, "signin [<email> <password>]").map(Command::SignIn)
            }
            "signup" => parse_credentials(rest, "signup [<email> <password>]").map(Command::SignUp),
            "add" => Ok(Command::Add(raw.to_string())),
            "toggle" | "done" => parse_row(rest, "toggle <row>").map(Command::Toggle),
            "rm" | "delete" => parse_row(rest, "rm <row>").map(Command::Remove),
            "signout" | "logout" => Ok(Command::SignOut),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// True if handling this command issues a remote call.
    pub fn is_remote(&self) -> bool {
        match self {
            Command::SignIn(_)
            | Command::SignUp(_)
            | Command::SignOut
            | Command::Toggle(_)
            | Command::Remove(_) => true,
            Command::Add(text) => !text.trim().is_empty(),
            Command::Email(_) | Command::Password(_) | Command::Help | Command::Quit => false,
        }
    }
}

fn parse_credentials(
    rest: &str,
    usage: &'static str,
) -> Result<Option<Credentials>, CommandError> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => Ok(None),
        (Some(email), Some(password), None) => Ok(Some(Credentials {
            email: email.to_string(),
            password: password.to_string(),
        })),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn parse_row(rest: &str, usage: &'static str) -> Result<usize, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    match rest.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(CommandError::BadRow(rest.to_string())),
    }
}
