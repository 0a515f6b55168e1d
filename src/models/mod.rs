//! Data models shared by the mock server and the tracker.

mod problem;
mod route;

pub use problem::{
    error_type_uri, ApiResult, FieldError, Meta, Outcome, ERROR_TYPE_PATH, FIELDS_CONFLICT,
    FIELDS_INVALID, REQUEST_ABORTED, RESPONSE_PARSING_ERROR,
};
pub use route::RouteInfo;
