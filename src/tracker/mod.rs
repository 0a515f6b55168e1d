//! Request-state tracking.
//!
//! A [`Tracker`] wraps one named operation. Calling it moves the slot from
//! `Idle` to `Pending` before the operation starts and to `Done` once it
//! settles, storing a normalized [`ApiResult`]. Failures never escape as
//! errors: transport errors, unparseable bodies and aborted requests become
//! problem results, and unexpected ones (5xx or local failures) are flagged
//! as runtime exceptions and reported to the registry's [`Notifications`].
//!
//! Overlapping calls on one slot are resolved by generation: each call
//! records the generation it started, and only the latest call's result is
//! stored. Earlier calls still return their own result to their caller.

mod registry;
mod state;

pub use registry::Registry;
pub use state::{ReqState, ReqStatus};

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;

use crate::models::ApiResult;
use crate::notifications::Notifications;
use crate::traits::{AbortSignal, CallArgs, Invoke, ResultParser};

/// Per-tracker options applied when its slot is created.
#[derive(Clone, Default)]
pub struct TrackerOptions {
    /// Data reported by [`Tracker::data`] before the first call settles.
    pub initial_data: Option<Value>,

    /// Parser used instead of [`JsonParser`](crate::JsonParser).
    pub parser: Option<Arc<dyn ResultParser>>,
}

impl std::fmt::Debug for TrackerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerOptions")
            .field("initial_data", &self.initial_data)
            .field("custom_parser", &self.parser.is_some())
            .finish()
    }
}

impl TrackerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_data(mut self, data: Value) -> Self {
        self.initial_data = Some(data);
        self
    }

    pub fn with_parser<P>(mut self, parser: P) -> Self
    where
        P: ResultParser + 'static,
    {
        self.parser = Some(Arc::new(parser));
        self
    }
}

/// Shared state and operation behind every handle to one name.
struct Slot {
    name: String,
    state: watch::Sender<ReqState>,
    operation: Arc<dyn Invoke>,
    parser: Arc<dyn ResultParser>,
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Handle to a named request slot.
///
/// Cheaply cloneable; every handle for the same name in a [`Registry`]
/// observes the same state.
#[derive(Clone)]
pub struct Tracker {
    slot: Arc<Slot>,
    origin: Arc<str>,
    notifications: Notifications,
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.slot.state.borrow();
        f.debug_struct("Tracker")
            .field("name", &state.name())
            .field("status", &state.status())
            .field("generation", &state.generation())
            .finish_non_exhaustive()
    }
}

impl Tracker {
    /// Call with no body and no abort signal.
    pub async fn call_default(&self) -> ApiResult {
        self.call(CallArgs::default()).await
    }

    /// Invoke the wrapped operation and return its normalized result.
    ///
    /// The slot is `Pending` before the operation is first polled. When
    /// this call is still the latest one on the slot as it settles, its
    /// result is stored and the slot becomes `Done`.
    #[tracing::instrument(skip(self, args), fields(name = %self.name()))]
    pub async fn call(&self, args: CallArgs) -> ApiResult {
        let mut generation = 0;
        self.slot.state.send_modify(|state| generation = state.begin());
        tracing::debug!(generation, "request pending");
        let guard = PendingGuard {
            tracker: self,
            generation,
            settled: false,
        };

        let signal = args.signal.clone();
        let outcome = self.slot.operation.invoke(args).await;
        let aborted = signal.as_ref().is_some_and(AbortSignal::is_aborted);

        let (mut result, status, url, local_failure) = match outcome {
            Ok(response) if aborted => (
                ApiResult::request_aborted(&self.origin, self.name()),
                response.status,
                response.url,
                true,
            ),
            Ok(response) => match self.slot.parser.parse(&response) {
                Ok(result) => (result, response.status, response.url, false),
                Err(err) => {
                    let detail = match &response.content_type {
                        Some(content_type) => format!("{err} (content-type: {content_type})"),
                        None => err.to_string(),
                    };
                    (
                        ApiResult::parsing_error(&self.origin, detail),
                        response.status,
                        response.url,
                        true,
                    )
                }
            },
            Err(err) => {
                let url = self.slot.operation.url().unwrap_or_default();
                let result = if aborted {
                    ApiResult::request_aborted(&self.origin, self.name())
                } else {
                    ApiResult::parsing_error(&self.origin, err.to_string())
                };
                (result, 0, url, true)
            }
        };

        result.meta.url = url;
        result.meta.status = status;
        result.meta.catch_block_error = local_failure;
        result.meta.success = !local_failure && status == 200;
        result.meta.is_runtime_exception =
            !result.meta.success && (status >= 500 || result.is_parsing_error());

        if result.meta.is_runtime_exception {
            self.report_runtime_exception(&result);
        }

        let stored = guard.settle(result.clone());
        if stored {
            tracing::debug!(generation, status, success = result.meta.success, "request done");
        } else {
            tracing::debug!(generation, "superseded by a newer call, result not stored");
        }

        result
    }

    fn report_runtime_exception(&self, result: &ApiResult) {
        let problem_type = result.problem_type.as_deref().unwrap_or("unknown");
        let title = result.title.as_deref().unwrap_or("Unexpected error");

        tracing::error!(
            name = self.name(),
            status = result.meta.status,
            url = %result.meta.url,
            problem_type,
            detail = result.detail.as_deref().unwrap_or_default(),
            "runtime exception"
        );
        self.notifications
            .add_error(format!("{title} ({problem_type})"));
    }

    /// The registry name of this tracker.
    pub fn name(&self) -> &str {
        &self.slot.name
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> ReqState {
        self.slot.state.borrow().clone()
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ReqState> {
        self.slot.state.subscribe()
    }

    pub fn status(&self) -> ReqStatus {
        self.slot.state.borrow().status()
    }

    /// The last stored result.
    pub fn result(&self) -> Option<ApiResult> {
        self.slot.state.borrow().result().cloned()
    }

    /// Payload of the last result, or the initial data before one exists.
    pub fn data(&self) -> Option<Value> {
        self.slot.state.borrow().data().cloned()
    }

    pub fn is_idle(&self) -> bool {
        self.slot.state.borrow().is_idle()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.state.borrow().is_pending()
    }

    pub fn is_done(&self) -> bool {
        self.slot.state.borrow().is_done()
    }

    pub fn is_success(&self) -> bool {
        self.slot.state.borrow().is_success()
    }

    pub fn is_failed(&self) -> bool {
        self.slot.state.borrow().is_failed()
    }

    /// The store runtime exceptions are reported to.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }
}

/// Settles a call's generation exactly once.
///
/// If the call future is dropped before it completes (a timeout or a losing
/// `select!` branch), the generation is settled as aborted so the slot does
/// not stay `Pending`. Dropping a superseded call changes nothing.
struct PendingGuard<'a> {
    tracker: &'a Tracker,
    generation: u64,
    settled: bool,
}

impl PendingGuard<'_> {
    fn settle(mut self, result: ApiResult) -> bool {
        self.settled = true;
        let generation = self.generation;
        self.tracker
            .slot
            .state
            .send_if_modified(|state| state.settle(generation, result))
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let tracker = self.tracker;
        let mut result = ApiResult::request_aborted(&tracker.origin, tracker.name());
        result.meta.url = tracker.slot.operation.url().unwrap_or_default();

        let generation = self.generation;
        if tracker
            .slot
            .state
            .send_if_modified(|state| state.settle(generation, result))
        {
            tracing::debug!(name = tracker.name(), generation, "call dropped before settling");
        }
    }
}
