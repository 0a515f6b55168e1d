//! Keyed store of tracker slots.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use super::state::ReqState;
use super::{Slot, Tracker, TrackerOptions};
use crate::client::ApiClient;
use crate::notifications::Notifications;
use crate::traits::{Invoke, JsonParser};

/// Registry of named trackers.
///
/// Construct one at startup and pass it (or clones of it) to whatever
/// issues requests. A slot is created the first time a name is referenced
/// and lives as long as the registry. Clones share slots and notifications.
///
/// # Example
///
/// ```no_run
/// use reqstate::{ApiClient, Registry};
/// use reqwest::Method;
///
/// # async fn example() -> reqstate::Result<()> {
/// let client = ApiClient::new("http://localhost:3000")?;
/// let registry = Registry::for_client(&client);
///
/// let tracker = registry.tracker(
///     "getFieldsInvalid",
///     client.endpoint(Method::GET, "/api/fields-invalid"),
/// );
/// let result = tracker.call_default().await;
/// assert!(!result.meta.success);
/// assert!(tracker.is_failed());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug)]
struct RegistryInner {
    origin: Arc<str>,
    notifications: Notifications,
    slots: Mutex<HashMap<String, Arc<Slot>>>,
}

impl Registry {
    /// Create a registry whose synthesized error types live under `origin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_notifications(origin, Notifications::new())
    }

    /// Create a registry using the client's origin.
    pub fn for_client(client: &ApiClient) -> Self {
        Self::new(client.origin())
    }

    /// Create a registry reporting to an existing notification store.
    pub fn with_notifications(origin: impl Into<String>, notifications: Notifications) -> Self {
        let origin: String = origin.into();
        Self {
            inner: Arc::new(RegistryInner {
                origin: Arc::from(origin.trim_end_matches('/')),
                notifications,
                slots: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn origin(&self) -> &str {
        &self.inner.origin
    }

    pub fn notifications(&self) -> &Notifications {
        &self.inner.notifications
    }

    /// Get or create the tracker for `name`.
    ///
    /// If the name is already registered, the existing slot (and the
    /// operation it was created with) is reused and `operation` is dropped.
    pub fn tracker<I>(&self, name: &str, operation: I) -> Tracker
    where
        I: Invoke + 'static,
    {
        self.tracker_with(name, operation, TrackerOptions::default())
    }

    /// Like [`tracker`](Self::tracker), with initial data or a custom parser.
    pub fn tracker_with<I>(&self, name: &str, operation: I, options: TrackerOptions) -> Tracker
    where
        I: Invoke + 'static,
    {
        let slot = {
            let mut slots = self.lock_slots();
            match slots.get(name) {
                Some(slot) => {
                    tracing::debug!(name, "reusing existing tracker slot");
                    slot.clone()
                }
                None => {
                    tracing::debug!(name, "creating tracker slot");
                    let (state, _rx) = watch::channel(ReqState::new(name, options.initial_data));
                    let slot = Arc::new(Slot {
                        name: name.to_string(),
                        state,
                        operation: Arc::new(operation),
                        parser: options.parser.unwrap_or_else(|| Arc::new(JsonParser)),
                    });
                    slots.insert(name.to_string(), slot.clone());
                    slot
                }
            }
        };

        self.handle(slot)
    }

    /// The tracker registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Tracker> {
        let slot = self.lock_slots().get(name).cloned()?;
        Some(self.handle(slot))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock_slots().keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshots of every slot, sorted by name.
    pub fn snapshots(&self) -> Vec<ReqState> {
        let mut states: Vec<ReqState> = self
            .lock_slots()
            .values()
            .map(|slot| slot.state.borrow().clone())
            .collect();
        states.sort_by(|a, b| a.name().cmp(b.name()));
        states
    }

    pub fn len(&self) -> usize {
        self.lock_slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_slots().is_empty()
    }

    fn handle(&self, slot: Arc<Slot>) -> Tracker {
        Tracker {
            slot,
            origin: self.inner.origin.clone(),
            notifications: self.inner.notifications.clone(),
        }
    }

    // Slot map updates never panic midway, so a poisoned lock is still consistent.
    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, Arc<Slot>>> {
        self.inner
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
