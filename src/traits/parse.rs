//! ResultParser trait for turning a raw response into an [`ApiResult`].

use serde_json::Value;

use crate::client::RawResponse;
use crate::error::Result;
use crate::models::ApiResult;

/// Parse a raw response body.
///
/// The tracker uses [`JsonParser`] unless a custom parser is supplied.
/// A parser error is reported as a `response-parsing-error` result.
pub trait ResultParser: Send + Sync {
    fn parse(&self, response: &RawResponse) -> Result<ApiResult>;
}

impl<F> ResultParser for F
where
    F: Fn(&RawResponse) -> Result<ApiResult> + Send + Sync,
{
    fn parse(&self, response: &RawResponse) -> Result<ApiResult> {
        (self)(response)
    }
}

/// Parse the body as a JSON problem-details object.
///
/// Only a body that is not JSON is an error. Fields of an unexpected shape
/// are read leniently (see [`ApiResult`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl ResultParser for JsonParser {
    fn parse(&self, response: &RawResponse) -> Result<ApiResult> {
        let body: Value = response.json()?;
        Ok(ApiResult::from(body))
    }
}
