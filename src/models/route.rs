//! Route directory model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::slug::{hyphen_to_camel_case, slugify};

/// One entry of the `/api` route directory.
///
/// `methods` mirrors the `{"get": true}` map the directory serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Path relative to `/api` (e.g. `/fields-invalid`).
    pub path: String,

    /// Lowercase HTTP methods the route answers.
    #[serde(default)]
    pub methods: BTreeMap<String, bool>,
}

impl RouteInfo {
    /// A route answering GET only.
    pub fn get(path: &str) -> Self {
        Self {
            path: path.to_string(),
            methods: BTreeMap::from([("get".to_string(), true)]),
        }
    }

    /// Whether this is the directory itself.
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }

    /// Methods enabled on this route.
    pub fn enabled_methods(&self) -> impl Iterator<Item = &str> {
        self.methods
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(m, _)| m.as_str())
    }

    /// Tracker name for a method on this route (`get` + `/success-data` ->
    /// `getSuccessData`).
    pub fn tracker_name(&self, method: &str) -> String {
        hyphen_to_camel_case(&format!("{}-{}", method, slugify(&self.path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_info_wire_format() {
        let route = RouteInfo::get("/badrequest");
        let value = serde_json::to_value(&route).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"path": "/badrequest", "methods": {"get": true}})
        );
    }

    #[test]
    fn test_tracker_name() {
        assert_eq!(
            RouteInfo::get("/fields-invalid").tracker_name("get"),
            "getFieldsInvalid"
        );
        assert_eq!(
            RouteInfo::get("/badrequest").tracker_name("get"),
            "getBadrequest"
        );
    }

    #[test]
    fn test_enabled_methods_skips_disabled() {
        let mut route = RouteInfo::get("/x");
        route.methods.insert("post".to_string(), false);
        assert_eq!(route.enabled_methods().collect::<Vec<_>>(), vec!["get"]);
        assert!(!route.is_root());
        assert!(RouteInfo::get("/").is_root());
    }
}
