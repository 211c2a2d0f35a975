//! HTTP client configuration and the shared admin API call.
//!
//! This module provides:
//! - Environment-based configuration (base URL, credentials, timeout)
//! - `AdminApi`, the one place where outbound requests are constructed
//! - Tracing integration for every outbound request

use std::{env, sync::LazyLock, time::Duration};

use anyhow::{Result, anyhow};
use http::{Extensions, header::CONTENT_TYPE};
use reqwest::{Body, Method, Request, Response, Url};
use reqwest_middleware::{ClientBuilder, Result as MiddlewareResult};
use reqwest_tracing::{
    ReqwestOtelSpanBackend, TracingMiddleware, default_on_request_end, reqwest_otel_span,
};
use serde_json::Value;
use tracing::{Span, debug};

use crate::mcp::{error::AdminError, http::auth::Credentials};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// `ADMIN_API_BASE_URL`, falling back to the web app's own
/// `NEXT_PUBLIC_APP_URL`, then the local dev server.
///
/// Blank values count as unset at every step.
#[must_use]
pub fn resolve_base_url<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    var("ADMIN_API_BASE_URL")
        .or_else(|| var("NEXT_PUBLIC_APP_URL"))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim()
        .trim_end_matches('/')
        .to_string()
}

/// Parses `ADMIN_API_TIMEOUT_SECS`. Unset or blank means the client default.
///
/// # Errors
/// `MissingConfig` when the value is zero or not a whole number of seconds.
pub fn parse_timeout_secs(raw: Option<&str>) -> Result<Option<Duration>, AdminError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(AdminError::MissingConfig(
            "ADMIN_API_TIMEOUT_SECS must be greater than zero".to_string(),
        )),
        Ok(secs) => Ok(Some(Duration::from_secs(secs))),
        Err(e) => Err(AdminError::MissingConfig(format!(
            "ADMIN_API_TIMEOUT_SECS must be a whole number of seconds: {e}"
        ))),
    }
}

// Load configuration from environment variables
pub static ADMIN_API_BASE_URL: LazyLock<String> = LazyLock::new(|| resolve_base_url(env_lookup));

pub static ADMIN_API_TIMEOUT: LazyLock<Result<Option<Duration>>> = LazyLock::new(|| {
    parse_timeout_secs(env_lookup("ADMIN_API_TIMEOUT_SECS").as_deref())
        .map_err(|e| anyhow!(e.to_string()))
});

pub static ADMIN_CREDENTIALS: LazyLock<Result<Credentials>> =
    LazyLock::new(|| Credentials::from_lookup(env_lookup).map_err(|e| anyhow!(e.to_string())));

// Custom Tracing Backend for Reqwest
// Note: This struct is used via TracingMiddleware<CustomTracing>, but Rust can't
// detect this usage statically, hence the dead_code attribute.
#[allow(dead_code)]
struct CustomTracing;

impl ReqwestOtelSpanBackend for CustomTracing {
    fn on_request_start(req: &Request, _extension: &mut Extensions) -> Span {
        reqwest_otel_span!(
            name = "admin-api-request",
            req,
            request_body = req.body().and_then(|b| b.as_bytes()).map(String::from_utf8_lossy).as_deref(),
        )
    }

    fn on_request_end(
        span: &Span,
        outcome: &MiddlewareResult<Response>,
        _extension: &mut Extensions,
    ) {
        default_on_request_end(span, outcome);
    }
}

/// Handle on the SASA admin HTTP API.
///
/// Cheap to clone. Holds configuration only: every call builds and drops its
/// own HTTP client, so nothing is pooled across calls or across a batch.
#[derive(Clone, Debug)]
pub struct AdminApi {
    base_url: String,
    credentials: Credentials,
    timeout: Option<Duration>,
}

impl AdminApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            timeout: None,
        }
    }

    /// Builds the API handle from the environment.
    ///
    /// # Errors
    /// `MissingConfig` when no credentials are set, the timeout is malformed
    /// or the base URL cannot be parsed.
    pub fn from_env() -> Result<Self, AdminError> {
        let credentials = ADMIN_CREDENTIALS
            .as_ref()
            .map_err(|e| AdminError::MissingConfig(e.to_string()))?
            .clone();
        let timeout = *ADMIN_API_TIMEOUT
            .as_ref()
            .map_err(|e| AdminError::MissingConfig(e.to_string()))?;

        let api = Self::new(ADMIN_API_BASE_URL.as_str(), credentials).with_timeout(timeout);
        // Reject an unparsable base URL now rather than on the first tool call.
        api.endpoint(&[])?;
        Ok(api)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Joins `segments` onto the base URL, percent-encoding each one.
    ///
    /// # Errors
    /// `MissingConfig` when the base URL is unparsable or cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, AdminError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            AdminError::MissingConfig(format!("invalid admin API base URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                AdminError::MissingConfig(format!(
                    "admin API base URL cannot take a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Makes an authenticated request to the admin API.
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST and DELETE are supported)
    /// * `url` - Complete endpoint URL, usually from [`AdminApi::endpoint`]
    /// * `body` - Optional JSON body, sent as `application/json`
    ///
    /// # Returns
    /// The decoded JSON body, unmodified, whatever the HTTP status. The
    /// backend reports its own failures in the body (`{"error": ...}`).
    ///
    /// # Errors
    /// * `InvalidParams` - Unsupported HTTP method
    /// * `Http` / `HttpMiddleware` - Transport failures or an undecodable body
    /// * `Serialization` - The request body could not be encoded
    pub async fn call(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Value, AdminError> {
        let mut client_builder = reqwest::Client::builder();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = ClientBuilder::new(client_builder.build()?)
            .with(TracingMiddleware::<CustomTracing>::new())
            .build();

        let target = url.to_string();
        let mut request_builder = match method {
            Method::GET => client.get(url),
            Method::POST => client.post(url),
            Method::DELETE => client.delete(url),
            _ => {
                return Err(AdminError::InvalidParams(format!(
                    "Unsupported HTTP method: {method}"
                )));
            }
        };

        request_builder = self.credentials.apply(request_builder);

        if let Some(body) = body {
            request_builder = request_builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(body)?));
        }

        let response = request_builder.send().await?;
        let status = response.status();
        debug!(%method, url = %target, %status, "admin API responded");

        let json_value = response.json().await?;
        Ok(json_value)
    }
}
