//! Transient, dismissible notifications.
//!
//! The tracker adds an [`Severity::Error`] notification for every runtime
//! exception. Consumers read them most-recent-first and dismiss them by id.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Message,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Message => "message",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

/// Shared notification store.
///
/// Clones share the same list. Every mutation is applied through the
/// underlying `watch` channel, so subscribers observe each change.
#[derive(Debug, Clone)]
pub struct Notifications {
    tx: Arc<watch::Sender<Vec<Notification>>>,
}

impl Default for Notifications {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx: Arc::new(tx) }
    }
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification and return its id.
    pub fn add(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            timestamp: Utc::now(),
        };
        let id = notification.id;

        tracing::debug!(%id, %severity, message = %notification.message, "notification added");
        self.tx.send_modify(|list| list.push(notification));
        id
    }

    pub fn add_message(&self, message: impl Into<String>) -> Uuid {
        self.add(message, Severity::Message)
    }

    pub fn add_warning(&self, message: impl Into<String>) -> Uuid {
        self.add(message, Severity::Warning)
    }

    pub fn add_error(&self, message: impl Into<String>) -> Uuid {
        self.add(message, Severity::Error)
    }

    /// Remove a notification. Returns false if the id was unknown.
    pub fn remove(&self, id: Uuid) -> bool {
        self.tx.send_if_modified(|list| {
            let before = list.len();
            list.retain(|n| n.id != id);
            list.len() != before
        })
    }

    /// Remove all notifications.
    pub fn clear(&self) {
        self.tx.send_if_modified(|list| {
            let had_any = !list.is_empty();
            list.clear();
            had_any
        });
    }

    /// All notifications, most recent first.
    pub fn list(&self) -> Vec<Notification> {
        self.tx.borrow().iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Observe changes. The receiver holds the list in insertion order.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.tx.subscribe()
    }
}
