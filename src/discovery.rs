//! Route discovery.
//!
//! Reads the `/api` route directory through a tracker of its own and
//! registers one tracker per listed route.

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::{ReqStateError, Result};
use crate::models::RouteInfo;
use crate::tracker::{Registry, Tracker};

/// Tracker name used for the directory fetch itself.
pub const DIRECTORY_TRACKER: &str = "initApis";

/// Register a tracker for every route the API lists, plus two fixed probes:
/// `getTextContent` (`GET /`) and `nonExistingUrl` (`GET /flemming`).
///
/// Returns the route trackers sorted by name. The directory tracker
/// (`initApis`) stays registered but is not part of the returned list.
#[tracing::instrument(skip_all, fields(base_url = %client.base_url()))]
pub async fn discover(registry: &Registry, client: &ApiClient) -> Result<Vec<Tracker>> {
    let directory = registry.tracker(DIRECTORY_TRACKER, client.endpoint(Method::GET, "/api"));
    let result = directory.call_default().await;

    if !result.meta.success {
        let status_code = Some(result.meta.status).filter(|s| *s != 0);
        return Err(ReqStateError::RouteDirectoryUnavailable {
            message: result
                .detail
                .or(result.title)
                .unwrap_or_else(|| "request failed".to_string()),
            status_code,
        });
    }

    let routes: Vec<RouteInfo> = match result.data {
        Some(data) => serde_json::from_value(data).map_err(|err| {
            ReqStateError::RouteDirectoryUnavailable {
                message: format!("malformed route directory: {err}"),
                status_code: Some(result.meta.status),
            }
        })?,
        None => Vec::new(),
    };
    tracing::debug!(count = routes.len(), "route directory fetched");

    let mut trackers = Vec::with_capacity(routes.len() + 2);
    for route in routes.iter().filter(|r| !r.is_root()) {
        for method in route.enabled_methods() {
            let Ok(http_method) = method.to_ascii_uppercase().parse::<Method>() else {
                tracing::warn!(method, path = %route.path, "skipping route with unknown method");
                continue;
            };
            let name = route.tracker_name(method);
            let path = format!("/api{}", route.path);
            trackers.push(registry.tracker(&name, client.endpoint(http_method, &path)));
        }
    }

    trackers.push(registry.tracker("getTextContent", client.endpoint(Method::GET, "/")));
    trackers.push(registry.tracker("nonExistingUrl", client.endpoint(Method::GET, "/flemming")));

    trackers.sort_by(|a, b| a.name().cmp(b.name()));
    trackers.dedup_by(|a, b| a.name() == b.name());
    Ok(trackers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn directory_server(body: serde_json::Value, status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_registers_trackers_per_route() {
        let server = directory_server(
            json!({
                "meta": {"success": true},
                "data": [
                    {"path": "/", "methods": {"get": true}},
                    {"path": "/fields-invalid", "methods": {"get": true}},
                    {"path": "/success-data", "methods": {"get": true, "post": false}}
                ]
            }),
            200,
        )
        .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let registry = Registry::for_client(&client);
        let trackers = discover(&registry, &client).await.unwrap();

        let names: Vec<&str> = trackers.iter().map(Tracker::name).collect();
        assert_eq!(
            names,
            vec!["getFieldsInvalid", "getSuccessData", "getTextContent", "nonExistingUrl"]
        );
        assert!(trackers.iter().all(Tracker::is_idle));

        let directory = registry.get(DIRECTORY_TRACKER).unwrap();
        assert!(directory.is_success());
        assert_eq!(registry.len(), 5);
    }

    #[tokio::test]
    async fn test_failed_directory_is_an_error() {
        let server = directory_server(
            json!({"meta": {"success": false}, "title": "Forbidden", "detail": "no"}),
            403,
        )
        .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let registry = Registry::for_client(&client);
        let err = discover(&registry, &client).await.unwrap_err();

        match err {
            ReqStateError::RouteDirectoryUnavailable {
                message,
                status_code,
            } => {
                assert_eq!(message, "no");
                assert_eq!(status_code, Some(403));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(registry.get(DIRECTORY_TRACKER).unwrap().is_failed());
    }

    #[tokio::test]
    async fn test_malformed_directory_is_an_error() {
        let server = directory_server(json!({"meta": {}, "data": {"path": 3}}), 200).await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let registry = Registry::for_client(&client);
        let err = discover(&registry, &client).await.unwrap_err();

        assert!(matches!(
            err,
            ReqStateError::RouteDirectoryUnavailable {
                status_code: Some(200),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_directory_has_no_status() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let registry = Registry::for_client(&client);
        let err = discover(&registry, &client).await.unwrap_err();

        assert!(matches!(
            err,
            ReqStateError::RouteDirectoryUnavailable {
                status_code: None,
                ..
            }
        ));
        assert_eq!(registry.notifications().len(), 1);
    }
}
