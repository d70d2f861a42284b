// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-change notifications.
//!
//! `AuthEvents` is a listener registry. Each `subscribe()` returns a
//! `Subscription` that receives every change emitted after it was created and
//! unregisters itself when dropped, so a torn-down view is never notified.

use crate::models::Session;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;

/// A change in authentication state.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthChange {
    SignedIn(Session),
    TokenRefreshed(Session),
    SignedOut,
}

impl AuthChange {
    /// The session carried by the change, `None` for sign-out.
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthChange::SignedIn(session) | AuthChange::TokenRefreshed(session) => Some(session),
            AuthChange::SignedOut => None,
        }
    }
}

#[derive(Default)]
struct Listeners {
    next_id: AtomicU64,
    senders: DashMap<u64, mpsc::UnboundedSender<AuthChange>>,
}

/// Registry of session-change listeners.
#[derive(Clone, Default)]
pub struct AuthEvents {
    listeners: Arc<Listeners>,
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener.
    pub fn subscribe(&self) -> Subscription {
        let id = self.listeners.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.senders.insert(id, tx);
        tracing::debug!(listener = id, "Auth listener registered");

        Subscription {
            id,
            rx,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Deliver `change` to every live listener.
    pub fn emit(&self, change: AuthChange) {
        // Receivers dropped without unsubscribing are pruned here.
        self.listeners
            .senders
            .retain(|_, tx| tx.send(change.clone()).is_ok());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.senders.len()
    }
}

/// Handle for one registered listener. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<AuthChange>,
    listeners: Weak<Listeners>,
}

impl Subscription {
    /// Wait for the next change.
    pub async fn recv(&mut self) -> Option<AuthChange> {
        self.rx.recv().await
    }

    /// Take a pending change without waiting.
    pub fn try_recv(&mut self) -> Option<AuthChange> {
        self.rx.try_recv().ok()
    }

    /// Explicitly release the listener (same as dropping the handle).
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.senders.remove(&self.id);
            tracing::debug!(listener = self.id, "Auth listener released");
        }
    }
}
