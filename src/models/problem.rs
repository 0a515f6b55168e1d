//! Problem-details result model.
//!
//! The same shape is produced by the mock server and parsed by the tracker:
//! a `meta` block plus either a `data` payload or the RFC 7807 style
//! `type` / `title` / `detail` / `errors` fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::slug::slugify;

/// Path segment under which error-type URIs live.
pub const ERROR_TYPE_PATH: &str = "error-type";

/// Error type for a request cancelled through its abort signal.
pub const REQUEST_ABORTED: &str = "request-aborted";

/// Error type for a local failure: transport error or unparseable body.
pub const RESPONSE_PARSING_ERROR: &str = "response-parsing-error";

/// Error type for a validation failure carrying field errors.
pub const FIELDS_INVALID: &str = "fields-invalid";

/// Error type for conflicting field values.
pub const FIELDS_CONFLICT: &str = "fields-conflict";

/// Build the absolute error-type URI for a problem kind.
///
/// ```
/// let uri = reqstate::error_type_uri("http://localhost:3000", "Division by zero");
/// assert_eq!(uri, "http://localhost:3000/error-type/division-by-zero");
/// ```
pub fn error_type_uri(origin: &str, kind: &str) -> String {
    format!(
        "{}/{}/{}",
        origin.trim_end_matches('/'),
        ERROR_TYPE_PATH,
        slugify(kind)
    )
}

/// The parsed outcome of a tracked request.
///
/// Deserializing never fails on valid JSON: fields with an unexpected shape
/// fall back to their defaults, and a body that is not an object becomes
/// `data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct ApiResult {
    /// Transport and classification metadata.
    #[serde(default)]
    pub meta: Meta,

    /// Absolute error-type URI (`{origin}/error-type/{slug}`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,

    /// Short human-readable summary of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Longer explanation of this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Field-level validation errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,

    /// Success payload, or extra context on some problems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Metadata attached to every result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// True iff the HTTP status was 200 and no local failure occurred.
    #[serde(default)]
    pub success: bool,

    /// HTTP status of the transport response; 0 when none was received.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub status: u16,

    /// URL the request was sent to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// Set for 5xx responses and local failures.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_runtime_exception: bool,

    /// Set when the result was synthesized after a local failure.
    #[serde(default, skip_serializing_if = "is_false")]
    pub catch_block_error: bool,
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub name: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Read an `errors` entry. `field` is accepted for `name` and `message`
    /// for `reason`; entries without a field name are skipped.
    fn from_value(item: &Value) -> Option<Self> {
        let text = |keys: [&str; 2]| {
            keys.iter()
                .find_map(|k| item.get(*k).and_then(Value::as_str))
                .map(str::to_string)
        };
        Some(Self {
            name: text(["name", "field"])?,
            reason: text(["reason", "message"]).unwrap_or_default(),
        })
    }
}

/// Coarse classification of a settled result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Status 200 with a parseable body.
    Success,
    /// Expected failure (4xx) the caller should handle, e.g. validation.
    DomainError,
    /// The caller aborted the request.
    Cancelled,
    /// Unexpected failure (5xx or local), surfaced as a notification.
    RuntimeException,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Outcome::Success => "success",
            Outcome::DomainError => "domain-error",
            Outcome::Cancelled => "cancelled",
            Outcome::RuntimeException => "runtime-exception",
        };
        f.write_str(s)
    }
}

impl ApiResult {
    /// A successful result, with or without a payload.
    pub fn success(data: Option<Value>) -> Self {
        Self {
            meta: Meta {
                success: true,
                ..Default::default()
            },
            data,
            ..Default::default()
        }
    }

    /// A problem of the given kind.
    ///
    /// The kind becomes the title, the default detail, and (slugified) the
    /// error-type URI under `origin`.
    pub fn problem(origin: &str, kind: &str) -> Self {
        Self {
            problem_type: Some(error_type_uri(origin, kind)),
            title: Some(kind.to_string()),
            detail: Some(format!(
                "A(n) {} thing happened",
                kind.to_lowercase()
            )),
            ..Default::default()
        }
    }

    /// Result for a request cancelled through its abort signal.
    pub fn request_aborted(origin: &str, name: &str) -> Self {
        Self::problem(origin, REQUEST_ABORTED)
            .with_title("Request was cancelled")
            .with_detail(format!("Request for ({name}) was aborted by signal"))
            .caught()
    }

    /// Result for a local failure (transport error or unparseable body).
    pub fn parsing_error(origin: &str, detail: impl Into<String>) -> Self {
        Self::problem(origin, RESPONSE_PARSING_ERROR)
            .with_title("Client side parsing error")
            .with_detail(detail)
            .caught()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    fn caught(mut self) -> Self {
        self.meta.catch_block_error = true;
        self
    }

    /// Whether the request succeeded (`meta.success`).
    pub fn is_success(&self) -> bool {
        self.meta.success
    }

    /// Whether the result was flagged as a runtime exception.
    pub fn is_runtime_exception(&self) -> bool {
        self.meta.is_runtime_exception
    }

    /// Last path segment of the error-type URI (e.g. `fields-invalid`).
    pub fn error_type(&self) -> Option<&str> {
        self.problem_type
            .as_deref()
            .and_then(|t| t.rsplit('/').next())
            .filter(|s| !s.is_empty())
    }

    /// Whether this is a local parsing (or transport) failure.
    pub fn is_parsing_error(&self) -> bool {
        self.problem_type
            .as_deref()
            .is_some_and(|t| t.ends_with(RESPONSE_PARSING_ERROR))
    }

    /// Whether the request was aborted by the caller.
    pub fn is_aborted(&self) -> bool {
        self.error_type() == Some(REQUEST_ABORTED)
    }

    /// Whether this problem carries field errors meant for a form.
    pub fn is_field_error(&self) -> bool {
        matches!(self.error_type(), Some(FIELDS_INVALID | FIELDS_CONFLICT))
    }

    /// Field errors keyed by field name.
    ///
    /// When a field appears twice the last reason wins.
    pub fn field_errors(&self) -> BTreeMap<&str, &str> {
        self.errors
            .iter()
            .map(|e| (e.name.as_str(), e.reason.as_str()))
            .collect()
    }

    /// Classify the result.
    pub fn outcome(&self) -> Outcome {
        if self.meta.success {
            Outcome::Success
        } else if self.meta.is_runtime_exception {
            Outcome::RuntimeException
        } else if self.is_aborted() {
            Outcome::Cancelled
        } else {
            Outcome::DomainError
        }
    }
}

impl From<Value> for ApiResult {
    fn from(value: Value) -> Self {
        let mut body = match value {
            Value::Object(body) => body,
            Value::Null => return Self::default(),
            other => {
                return Self {
                    data: Some(other),
                    ..Default::default()
                }
            }
        };

        let string = |v: Option<Value>| match v {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        Self {
            meta: body
                .remove("meta")
                .and_then(|m| serde_json::from_value(m).ok())
                .unwrap_or_default(),
            problem_type: string(body.remove("type")),
            title: string(body.remove("title")),
            detail: string(body.remove("detail")),
            errors: match body.remove("errors") {
                Some(Value::Array(items)) => items.iter().filter_map(FieldError::from_value).collect(),
                _ => Vec::new(),
            },
            data: body.remove("data").filter(|d| !d.is_null()),
        }
    }
}

fn is_zero(v: &u16) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}
