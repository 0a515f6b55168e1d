//! Mock problem-details API server.
//!
//! Provides an axum-based HTTP server with one route per response shape.

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    routing::{get, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::handlers;
use super::state::{MockState, SharedState};
use crate::error::Result;

/// A mock API server running in the background.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures on a random local port.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        Self::with_state(MockState::with_fixtures()).await
    }

    /// Start a mock server with custom state on a random local port.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        Self::bind_with_state(addr, state)
            .await
            .expect("Failed to bind to address")
    }

    /// Start a mock server with default fixtures on `addr`.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        Self::bind_with_state(addr, MockState::with_fixtures()).await
    }

    async fn bind_with_state(addr: SocketAddr, state: MockState) -> Result<Self> {
        let shared_state = state.shared();
        let app = router(shared_state.clone());

        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        tracing::info!(%addr, "mock API listening");

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(%err, "mock API server stopped");
            }
        });

        Ok(Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        })
    }

    /// Serve default fixtures on `addr` until `shutdown` resolves.
    pub async fn run<F>(addr: SocketAddr, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = router(MockState::with_fixtures().shared());
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "mock API listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("mock API shut down");
        Ok(())
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating an `ApiClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

/// Routes under `/api`, relative to it, in directory order.
///
/// Both the router and the `/api` directory are built from this table.
pub(crate) fn api_routes() -> Vec<(&'static str, MethodRouter<SharedState>)> {
    vec![
        ("/", get(handlers::route_directory)),
        // 200
        ("/success-empty", get(handlers::success_empty)),
        ("/success-data", get(handlers::success_data)),
        // 400 / 409
        ("/badrequest", get(handlers::badrequest)),
        ("/fields-invalid", get(handlers::fields_invalid)),
        ("/fields-conflict", get(handlers::fields_conflict)),
        // 403
        ("/forbidden-empty", get(handlers::forbidden_empty)),
        ("/forbidden-data", get(handlers::forbidden_data)),
        // 404
        ("/not-found-empty", get(handlers::not_found_empty)),
        ("/not-found-data", get(handlers::not_found_data)),
        // 500
        ("/division-by-zero", get(handlers::division_by_zero)),
        // 200, not JSON
        ("/non-json-result", get(handlers::non_json_result)),
    ]
}

/// Create the axum router with all routes.
pub fn router(state: SharedState) -> Router {
    let app = api_routes()
        .into_iter()
        .fold(Router::new(), |app, (path, route)| match path {
            "/" => app.route("/api", route),
            path => app.route(&format!("/api{path}"), route),
        });

    app.route("/", get(handlers::index))
        .fallback(handlers::not_routed)
        .with_state(state)
}
