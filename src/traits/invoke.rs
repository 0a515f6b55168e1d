//! Invoke trait for the operation a tracker wraps.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use crate::client::RawResponse;
use crate::error::Result;

/// The asynchronous operation behind a tracker.
///
/// Implementations return the raw transport response; parsing and
/// classification are the tracker's job. Any error returned here is folded
/// into the tracker's result, never propagated to its caller.
///
/// Closures of the form `Fn(CallArgs) -> impl Future<Output = Result<RawResponse>>`
/// implement this trait, as does [`Endpoint`](crate::Endpoint).
///
/// # Example
///
/// ```ignore
/// use reqstate::{CallArgs, RawResponse};
///
/// let op = |_args: CallArgs| async move {
///     Ok(RawResponse::new("http://test/api/x", 200, br#"{"meta":{}}"#.to_vec()))
/// };
/// let tracker = registry.tracker("x", op);
/// ```
#[async_trait]
pub trait Invoke: Send + Sync {
    /// Run the operation once.
    async fn invoke(&self, args: CallArgs) -> Result<RawResponse>;

    /// The URL this operation targets, used when it fails before a
    /// response arrives.
    fn url(&self) -> Option<String> {
        None
    }
}

#[async_trait]
impl<F, Fut> Invoke for F
where
    F: Fn(CallArgs) -> Fut + Send + Sync,
    Fut: Future<Output = Result<RawResponse>> + Send + 'static,
{
    async fn invoke(&self, args: CallArgs) -> Result<RawResponse> {
        (self)(args).await
    }
}

/// Arguments for a single call.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    /// JSON body sent with the request, if any.
    pub body: Option<Value>,

    /// Cancellation signal checked after the operation settles.
    pub signal: Option<AbortSignal>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }
}

/// A cloneable, awaitable abort flag.
///
/// Clones share state: aborting one aborts all of them.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    inner: Arc<SignalInner>,
}

#[derive(Debug, Default)]
struct SignalInner {
    aborted: AtomicBool,
    notify: Notify,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal. Idempotent.
    pub fn abort(&self) {
        self.inner.aborted.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Whether the signal has fired.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.inner.aborted.load(Ordering::SeqCst)
    }

    /// Resolve once the signal fires.
    pub async fn aborted(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so an abort in between is not lost.
        notified.as_mut().enable();
        if self.is_aborted() {
            return;
        }
        notified.await;
    }
}
