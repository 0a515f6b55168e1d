//! HTTP client for the mock API.
//!
//! Low-level client that sends requests and hands back the raw response
//! (URL, status, body) without interpreting the status code. Interpretation
//! is the tracker's job.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{ReqStateError, Result};
use crate::traits::{CallArgs, Invoke};

/// Base URL used when `REQSTATE_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";
const USER_AGENT: &str = concat!("reqstate/", env!("CARGO_PKG_VERSION"));

/// Low-level API client.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use reqstate::ApiClient;
///
/// # async fn example() -> reqstate::Result<()> {
/// // Create from environment variables
/// let client = ApiClient::from_env()?;
///
/// // Or configure manually
/// let client = ApiClient::new("http://localhost:3000")?;
/// let response = client.get("/api/success-data").await?;
/// assert_eq!(response.status, 200);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Arc<Url>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from environment variables.
    ///
    /// Uses `REQSTATE_API_URL` for the base URL (defaults to
    /// `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("REQSTATE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&base_url)
    }

    /// Create a new client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or has no host.
    pub fn new(base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;
        if base_url.host_str().is_none() {
            return Err(ReqStateError::ConfigMissing(format!(
                "base URL '{base_url}' has no host"
            )));
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ReqStateError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Scheme, host and port of the base URL, used for error-type URIs.
    pub fn origin(&self) -> String {
        self.base_url.origin().ascii_serialization()
    }

    /// Resolve a path against the base URL.
    ///
    /// Leading slashes are ignored so a base URL with a path prefix is kept.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Make a GET request.
    pub async fn get(&self, path: &str) -> Result<RawResponse> {
        self.send(Method::GET, path, None).await
    }

    /// Send a request with an optional JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RawResponse> {
        let url = self.url_for(path)?;
        self.send_url(method, url, body).await
    }

    async fn send_url(&self, method: Method, url: Url, body: Option<&Value>) -> Result<RawResponse> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ReqStateError::HttpError)?;

        let url = response.url().to_string();
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(ReqStateError::HttpError)?;

        tracing::debug!(%url, status, len = body.len(), "response received");

        Ok(RawResponse {
            url,
            status,
            content_type,
            body: body.to_vec(),
        })
    }

    /// An operation calling `path` with `method`, for use with a tracker.
    pub fn endpoint(&self, method: Method, path: &str) -> Endpoint {
        Endpoint {
            client: self.clone(),
            method,
            path: path.to_string(),
        }
    }
}

/// A raw, uninterpreted HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Final URL of the request.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, if present.
    pub content_type: Option<String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(url: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            status,
            content_type: None,
            body,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A fixed request against an [`ApiClient`].
///
/// The JSON body from [`CallArgs`] is sent when present. If the call's
/// [`AbortSignal`](crate::AbortSignal) fires first, the in-flight request is
/// dropped and [`ReqStateError::Aborted`] returned.
#[derive(Debug, Clone)]
pub struct Endpoint {
    client: ApiClient,
    method: Method,
    path: String,
}

impl Endpoint {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl Invoke for Endpoint {
    async fn invoke(&self, args: CallArgs) -> Result<RawResponse> {
        let url = self.client.url_for(&self.path)?;
        let send = self
            .client
            .send_url(self.method.clone(), url.clone(), args.body.as_ref());

        match args.signal {
            Some(signal) => tokio::select! {
                response = send => response,
                _ = signal.aborted() => Err(ReqStateError::Aborted { url: url.to_string() }),
            },
            None => send.await,
        }
    }

    fn url(&self) -> Option<String> {
        self.client.url_for(&self.path).ok().map(String::from)
    }
}
