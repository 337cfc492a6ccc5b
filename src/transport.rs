// transport.rs - HTTP capability used by the bootstrapper and action handlers

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::HttpConfig;
use crate::error::{ErrorBody, TransportError};

/// HTTP methods the page controller issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One request to a PageContext-provided endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

impl ActionRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Attach a JSON body (sent with `Content-Type: application/json`)
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A settled response: status plus raw body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub status: u16,
    pub body: String,
}

impl ActionResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Success is any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// The `detail` string of a failure body, if the body carries one
    pub fn error_detail(&self) -> Option<String> {
        self.json::<ErrorBody>().ok().map(|body| body.detail)
    }
}

/// Capability for issuing HTTP requests.
///
/// Implementations resolve to `Ok` for every response that arrives, whatever its
/// status, and to `Err` only when the request could not complete.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ActionRequest) -> Result<ActionResponse, TransportError>;
}

/// reqwest-backed transport. Relative endpoint URLs resolve against `base_url`
/// and cookies persist for the lifetime of the transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::build(base_url, None, None)
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, TransportError> {
        Self::build(
            &config.base_url,
            config.request_timeout_secs.map(Duration::from_secs),
            Some(&config.user_agent),
        )
    }

    fn build(
        base_url: &str,
        timeout: Option<Duration>,
        user_agent: Option<&str>,
    ) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint URL; absolute URLs pass through unchanged
    pub fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        self.base_url.join(url).map_err(|e| TransportError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ActionRequest) -> Result<ActionResponse, TransportError> {
        let url = self.resolve(&request.url)?;

        tracing::debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.into(), url.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        // An unreadable body still settles the request; callers that parse it
        // treat an empty body like any other unparseable one.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read response body from {}: {}", url, e);
                String::new()
            }
        };

        tracing::debug!("{} {} -> {}", request.method, url, status);

        Ok(ActionResponse { status, body })
    }
}
