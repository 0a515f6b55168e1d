//! Test data fixtures for the mock server.

use serde::{Deserialize, Serialize};

use super::server::api_routes;
use crate::models::RouteInfo;

/// The record served by the `*-data` routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub color: String,
    pub gender: String,
    pub league: String,
}

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// The default developer record.
    pub fn developer() -> Developer {
        Developer {
            id: 10,
            name: "Flemming Hansen".to_string(),
            age: 19,
            color: "blue".to_string(),
            gender: "male".to_string(),
            league: "mens".to_string(),
        }
    }

    /// Every route under `/api`, relative to it, in registration order.
    pub fn route_directory() -> Vec<RouteInfo> {
        api_routes()
            .into_iter()
            .map(|(path, _)| RouteInfo::get(path))
            .collect()
    }
}
