//! Mock server state management.
//!
//! Provides the in-memory data the mock API serves.

use std::sync::Arc;
use tokio::sync::RwLock;

use super::fixtures::{Developer, Fixtures};
use crate::models::RouteInfo;

/// State shared between handlers.
pub type SharedState = Arc<RwLock<MockState>>;

/// Shared state for the mock server.
///
/// The problem routes are static; this holds the record returned by the
/// `*-data` routes and the listing served at `/api`.
#[derive(Debug, Default)]
pub struct MockState {
    /// Records served by `success-data`, `forbidden-data` and
    /// `not-found-data` (the first one is used).
    pub developers: Vec<Developer>,

    /// Entries served by the route directory.
    pub routes: Vec<RouteInfo>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// State with the default developer and the full route directory.
    pub fn with_fixtures() -> Self {
        Self::new()
            .with_developer(Fixtures::developer())
            .with_routes(Fixtures::route_directory())
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Add a developer record.
    pub fn with_developer(mut self, developer: Developer) -> Self {
        self.developers.push(developer);
        self
    }

    /// Replace the route directory.
    pub fn with_routes(mut self, routes: Vec<RouteInfo>) -> Self {
        self.routes = routes;
        self
    }

    /// The record served by the `*-data` routes.
    pub fn developer(&self) -> Option<&Developer> {
        self.developers.first()
    }
}
