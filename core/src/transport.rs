//! The HTTP transport an `ApiMethod` request is executed through.
//!
//! # Design
//! `Transport` is the only seam between the request descriptors and the
//! network. `UreqTransport` is the default blocking implementation; tests
//! substitute an in-memory transport that records what it was given.
//! A transport never retries and never interprets status codes: non-2xx
//! responses come back as data and only connection-level failures are
//! errors.

use std::time::Duration;

use tracing::debug;
use ureq::http::Response;
use ureq::typestate::WithBody;
use ureq::{Agent, Body, RequestBuilder};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::method::DOMAIN;

/// Executes one `HttpRequest` and returns the server's response.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Settings for `UreqTransport`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportConfig {
    /// Replaces the API domain of every request URL, e.g. `http://127.0.0.1:3000`.
    pub origin: Option<String>,
    /// Upper bound on a whole request, connect included.
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    pub const ORIGIN_ENV: &'static str = "WOWCHER_ORIGIN";
    pub const TIMEOUT_ENV: &'static str = "WOWCHER_TIMEOUT_SECS";

    /// Read `WOWCHER_ORIGIN` and `WOWCHER_TIMEOUT_SECS`. Unset or unparsable
    /// values leave the corresponding setting at its default.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(Self::ORIGIN_ENV).ok().as_deref(),
            std::env::var(Self::TIMEOUT_ENV).ok().as_deref(),
        )
    }

    fn from_vars(origin: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(origin) = origin.map(str::trim).filter(|s| !s.is_empty()) {
            config = config.with_origin(origin);
        }
        if let Some(secs) = timeout_secs.and_then(|s| s.trim().parse::<u64>().ok()) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = Some(origin.trim_end_matches('/').to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Apply the origin override to a URL built against `DOMAIN`.
    fn resolve(&self, url: &str) -> String {
        match (&self.origin, url.strip_prefix(DOMAIN)) {
            (Some(origin), Some(rest)) => format!("{origin}{rest}"),
            _ => url.to_string(),
        }
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    config: TransportConfig,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    pub fn with_config(config: TransportConfig) -> Self {
        // Status codes are handed back to the endpoint rather than raised here.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self { agent, config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.config.resolve(&request.url);
        debug!(method = %request.method, url = %url, "sending request");

        let mut response = match request.method {
            HttpMethod::Get => {
                let builder = decorate(self.agent.get(&url), &request);
                match request.body.as_deref() {
                    // The orders listing sends its filters as a JSON body on GET.
                    Some(body) => send_body(builder.force_send_body(), body)?,
                    None => builder.call()?,
                }
            }
            HttpMethod::Post => send(decorate(self.agent.post(&url), &request), &request)?,
            HttpMethod::Put => send(decorate(self.agent.put(&url), &request), &request)?,
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string()?;
        debug!(status, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn decorate<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(builder: RequestBuilder<WithBody>, request: &HttpRequest) -> Result<Response<Body>, ureq::Error> {
    match request.body.as_deref() {
        Some(body) => send_body(builder, body),
        None => builder.send_empty(),
    }
}

fn send_body(builder: RequestBuilder<WithBody>, body: &str) -> Result<Response<Body>, ureq::Error> {
    builder.send(body.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_override_replaces_domain() {
        let config = TransportConfig::default().with_origin("http://127.0.0.1:3000/");
        assert_eq!(
            config.resolve(&format!("{DOMAIN}/v1/orders")),
            "http://127.0.0.1:3000/v1/orders"
        );
    }

    #[test]
    fn no_origin_leaves_url_untouched() {
        let config = TransportConfig::default();
        let url = format!("{DOMAIN}/v1/orders");
        assert_eq!(config.resolve(&url), url);
    }

    #[test]
    fn origin_override_ignores_foreign_urls() {
        let config = TransportConfig::default().with_origin("http://127.0.0.1:3000");
        assert_eq!(config.resolve("http://elsewhere/x"), "http://elsewhere/x");
    }

    #[test]
    fn with_timeout_sets_timeout() {
        let config = TransportConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn vars_origin_trailing_slash_is_trimmed() {
        let config = TransportConfig::from_vars(Some("http://127.0.0.1:3000/"), Some("30"));
        assert_eq!(
            config.resolve(&format!("{DOMAIN}/v1/orders")),
            "http://127.0.0.1:3000/v1/orders"
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn vars_unset_or_invalid_fall_back_to_defaults() {
        assert_eq!(TransportConfig::from_vars(None, None), TransportConfig::default());

        let config = TransportConfig::from_vars(Some(""), Some("soon"));
        assert_eq!(config, TransportConfig::default());
    }

    #[test]
    fn from_env_reads_both_variables() {
        std::env::set_var(TransportConfig::ORIGIN_ENV, "http://127.0.0.1:3000/");
        std::env::set_var(TransportConfig::TIMEOUT_ENV, "not-a-number");
        let config = TransportConfig::from_env();
        std::env::remove_var(TransportConfig::ORIGIN_ENV);
        std::env::remove_var(TransportConfig::TIMEOUT_ENV);

        assert_eq!(config.origin.as_deref(), Some("http://127.0.0.1:3000"));
        assert_eq!(config.timeout, None);
        assert_eq!(
            config.resolve(&format!("{DOMAIN}/v1/orders")),
            "http://127.0.0.1:3000/v1/orders"
        );
    }
}
