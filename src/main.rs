// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase Todos terminal client
//!
//! Signs in against Supabase Auth and keeps a task list in sync with the
//! project's `tasks` table.

use std::io::Write;
use supabase_todos::{
    config::Config,
    services::AuthChange,
    ui::{view, App, Command, CommandError, Flow},
    Backend,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

enum Event {
    Input(Option<String>),
    Session(AuthChange),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env()?;
    init_logging(config.log_json);
    tracing::info!(?config, "Starting Supabase Todos");

    let backend = Backend::connect(config).await;
    let mut app = App::new(backend.auth.clone(), backend.tasks.clone());
    app.mount().await;

    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    draw(&mut stdout, &app.render())?;

    loop {
        let event = tokio::select! {
            line = lines.next_line() => Event::Input(line?),
            Some(change) = app.next_session_change() => Event::Session(change),
        };

        match event {
            Event::Input(None) => break,
            Event::Input(Some(line)) => match Command::parse(&line) {
                Ok(command) => {
                    if command.is_remote() {
                        draw(&mut stdout, view::render_loading(app.view()))?;
                    }
                    if app.handle(command).await == Flow::Quit {
                        break;
                    }
                }
                Err(CommandError::Empty) => {}
                Err(e) => app.alert(e),
            },
            Event::Session(change) => app.on_session_change(change).await,
        }

        draw(&mut stdout, &app.render())?;
    }

    app.teardown();
    tracing::info!("Exiting");
    Ok(())
}

fn draw(out: &mut impl Write, screen: &str) -> std::io::Result<()> {
    writeln!(out, "\n{}", screen)?;
    write!(out, "> ")?;
    out.flush()
}

/// Initialize structured logging on stderr (stdout is the UI).
fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,supabase_todos=info"));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
