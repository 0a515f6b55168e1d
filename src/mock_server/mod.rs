//! Mock problem-details API server.
//!
//! Serves a fixed set of routes, each returning one response shape the
//! tracker has to handle: success with and without data, validation and
//! conflict errors with field lists, forbidden, not found, a server error,
//! and a non-JSON body. `GET /api` lists the routes.
//!
//! # Example
//!
//! ```no_run
//! use reqstate::mock_server::MockServer;
//! use reqstate::{ApiClient, Registry};
//! use reqwest::Method;
//!
//! # async fn example() -> reqstate::Result<()> {
//! let server = MockServer::start().await;
//! let client = ApiClient::new(server.url())?;
//! let registry = Registry::for_client(&client);
//!
//! let tracker = registry.tracker(
//!     "divisionByZero",
//!     client.endpoint(Method::GET, "/api/division-by-zero"),
//! );
//! let result = tracker.call_default().await;
//! assert!(result.meta.is_runtime_exception);
//!
//! server.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{Developer, Fixtures};
pub use server::{router, MockServer};
pub use state::{MockState, SharedState};
