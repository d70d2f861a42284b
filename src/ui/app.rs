// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The single-page app: session controller, task store and view state wired
//! together with an explicit `mount` / `teardown` lifecycle.

use crate::error::AppError;
use crate::models::{Session, SignUpOutcome, Task, TaskId};
use crate::services::{
    AuthApi, AuthChange, SessionController, SessionTransition, Subscription, TaskApi, TaskStore,
};
use crate::ui::command::{Command, Credentials};
use crate::ui::view::{self, AuthForm, Notice, View};
use std::sync::Arc;

const SIGN_UP_CONFIRMATION: &str = "Sign up successful! Please check your email to verify.";

/// Whether the main loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<A, T> {
    session: SessionController<A>,
    tasks: TaskStore<T>,
    /// Live while mounted; dropping it unregisters the listener.
    subscription: Option<Subscription>,
    form: AuthForm,
    notice: Option<Notice>,
}

impl<A: AuthApi, T: TaskApi> App<A, T> {
    pub fn new(auth: Arc<A>, tasks: Arc<T>) -> Self {
        Self {
            session: SessionController::new(auth),
            tasks: TaskStore::new(tasks),
            subscription: None,
            form: AuthForm::default(),
            notice: None,
        }
    }

    /// Subscribe to session changes and pick up an existing session.
    pub async fn mount(&mut self) {
        self.subscription = Some(self.session.subscribe());

        match self.session.initialize().await {
            Ok(transition) => self.after_transition(transition).await,
            Err(e) => self.alert(e),
        }
    }

    /// Release the session-change subscription.
    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn view(&self) -> View {
        View::for_session(self.session.session())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.session()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn render(&self) -> String {
        match self.session.session() {
            Some(session) => view::render_tasks(session.email(), self.tasks.tasks(), self.notice()),
            None => view::render_auth(&self.form, self.notice()),
        }
    }

    /// Surface an error as the blocking alert.
    pub fn alert(&mut self, error: impl std::fmt::Display) {
        self.notice = Some(Notice::Error(error.to_string()));
    }

    /// Run one user command, then apply any session changes it caused.
    pub async fn handle(&mut self, command: Command) -> Flow {
        self.notice = None;

        if !self.view().allows(&command) {
            let help = view::render_help(self.view());
            self.alert(format!("That command is not available here.\n{}", help));
            return Flow::Continue;
        }

        match command {
            Command::Quit => return Flow::Quit,
            Command::Help => self.notice = Some(Notice::Info(view::render_help(self.view()))),
            Command::Email(email) => self.form.email = email,
            Command::Password(password) => self.form.password = password,
            Command::SignIn(credentials) => {
                self.fill_form(credentials);
                if let Err(e) = self.session.sign_in(&self.form.email, &self.form.password).await {
                    self.alert(e);
                }
            }
            Command::SignUp(credentials) => {
                self.fill_form(credentials);
                match self.session.sign_up(&self.form.email, &self.form.password).await {
                    Ok(SignUpOutcome::ConfirmationRequired) => {
                        self.notice = Some(Notice::Info(SIGN_UP_CONFIRMATION.to_string()));
                    }
                    Ok(SignUpOutcome::SignedIn) => {}
                    Err(e) => self.alert(e),
                }
            }
            Command::Add(text) => {
                if let Err(e) = self.tasks.add(&text).await {
                    self.alert(e);
                }
            }
            Command::Toggle(row) => {
                let target = self.row(row).map(|task| (task.id, task.is_completed));
                if let Some((id, current)) = target {
                    if let Err(e) = self.tasks.toggle_complete(id, current).await {
                        self.alert(e);
                    }
                }
            }
            Command::Remove(row) => {
                let target = self.row(row).map(|task| task.id);
                if let Some(id) = target {
                    self.remove(id).await;
                }
            }
            Command::SignOut => {
                if let Err(e) = self.session.sign_out(&mut self.tasks).await {
                    self.alert(e);
                }
            }
        }

        self.pump().await;
        Flow::Continue
    }

    /// Delete a task by id, surfacing a failure.
    pub async fn remove(&mut self, id: TaskId) {
        if let Err(e) = self.tasks.remove(id).await {
            self.alert(e);
        }
    }

    /// Wait for the next session change. Pending forever when not mounted.
    pub async fn next_session_change(&mut self) -> Option<AuthChange> {
        match self.subscription.as_mut() {
            Some(subscription) => subscription.recv().await,
            None => std::future::pending().await,
        }
    }

    /// Apply one session change: refetch on start, clear on end.
    pub async fn on_session_change(&mut self, change: AuthChange) {
        let transition = self.session.apply(change);
        self.after_transition(transition).await;
    }

    /// Apply every change that is already queued.
    pub async fn pump(&mut self) {
        loop {
            let Some(change) = self.subscription.as_mut().and_then(Subscription::try_recv) else {
                break;
            };
            self.on_session_change(change).await;
        }
    }

    async fn after_transition(&mut self, transition: SessionTransition) {
        match transition {
            SessionTransition::Started => {
                self.form = AuthForm::default();
                self.tasks.clear();
                if let Err(e) = self.tasks.refresh().await {
                    self.alert(e);
                }
            }
            SessionTransition::Ended => {
                self.tasks.clear();
                if self.notice.is_none() {
                    self.notice = Some(Notice::Info("Signed out".to_string()));
                }
            }
            SessionTransition::Refreshed | SessionTransition::Unchanged => {}
        }
    }

    fn fill_form(&mut self, credentials: Option<Credentials>) {
        if let Some(credentials) = credentials {
            self.form.email = credentials.email;
            self.form.password = credentials.password;
        }
    }

    /// Look up a 1-based row, alerting when it does not exist.
    fn row(&mut self, row: usize) -> Option<&Task> {
        if row == 0 || row > self.tasks.tasks().len() {
            self.alert(AppError::Data(format!("There is no row {}", row)));
            return None;
        }
        self.tasks.tasks().get(row - 1)
    }
}
