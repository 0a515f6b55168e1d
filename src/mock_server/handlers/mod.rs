//! HTTP request handlers for the mock server.

pub mod problems;
pub mod success;

pub use problems::*;
pub use success::*;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Scheme and host the request was addressed to, e.g. `http://127.0.0.1:3000`.
///
/// Error-type URIs are built under this origin. Requests without a usable
/// `Host` header fall back to `http://localhost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|h| !h.is_empty())
            .unwrap_or("localhost");
        Ok(Self(format!("http://{host}")))
    }
}
