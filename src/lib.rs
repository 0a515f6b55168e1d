//! Async request-state tracking for JSON problem-details APIs.
//!
//! Each request is wrapped in a named [`Tracker`] that moves through
//! `Idle -> Pending -> Done` and always settles to an [`ApiResult`]: success
//! payloads, domain errors (4xx with `type` / `title` / `detail` / `errors`)
//! and runtime exceptions (5xx, unparseable bodies, transport failures). Runtime
//! exceptions are also pushed to a shared [`Notifications`] store.
//!
//! # Quick Start
//!
//! ```no_run
//! use reqstate::{ApiClient, Registry};
//! use reqwest::Method;
//!
//! #[tokio::main]
//! async fn main() -> reqstate::Result<()> {
//!     // Create client from environment variables
//!     let client = ApiClient::from_env()?;
//!     let registry = Registry::for_client(&client);
//!
//!     // Track a single endpoint
//!     let tracker = registry.tracker(
//!         "getFieldsInvalid",
//!         client.endpoint(Method::GET, "/api/fields-invalid"),
//!     );
//!     let result = tracker.call_default().await;
//!     for (field, reason) in result.field_errors() {
//!         println!("{field}: {reason}");
//!     }
//!
//!     // Or register every route the API lists
//!     for tracker in reqstate::discover(&registry, &client).await? {
//!         println!("{}", tracker.name());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Invoke`] - The wrapped operation (an HTTP [`Endpoint`] or any async closure)
//! - [`ResultParser`] - Turns the raw response into an [`ApiResult`]
//! - [`Registry`] - Named tracker slots plus the notification store
//!
//! The optional `mock-server` feature (on by default) adds
//! [`mock_server`], an axum server returning every response shape the
//! tracker distinguishes.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `REQSTATE_API_URL` (optional) - Base URL (defaults to `http://localhost:3000`)

mod client;
mod discovery;
mod error;
mod models;
mod notifications;
mod slug;
mod traits;
mod tracker;

pub mod cli;
pub mod output;

#[cfg(feature = "mock-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ApiClient, Endpoint, RawResponse, DEFAULT_API_URL};
pub use error::{ReqStateError, Result};

// Re-export traits
pub use traits::{AbortSignal, CallArgs, Invoke, JsonParser, ResultParser};

// Re-export tracker types
pub use tracker::{Registry, ReqState, ReqStatus, Tracker, TrackerOptions};

// Re-export notifications
pub use notifications::{Notification, Notifications, Severity};

// Re-export models
pub use models::{
    error_type_uri, ApiResult, FieldError, Meta, Outcome, RouteInfo, ERROR_TYPE_PATH,
    FIELDS_CONFLICT, FIELDS_INVALID, REQUEST_ABORTED, RESPONSE_PARSING_ERROR,
};

// Re-export convenience functions
pub use discovery::{discover, DIRECTORY_TRACKER};
pub use slug::{hyphen_to_camel_case, slugify};
