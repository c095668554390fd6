//! The contract every Wowcher API endpoint implements.
//!
//! # Design
//! An endpoint is a type implementing `ApiMethod`. Its `ENDPOINT` constant
//! fixes the URI and verb; `get_data` and `get_params` shape the caller's
//! arguments into a JSON body and query string; `process_response` turns the
//! raw response into the value handed back to the caller.
//!
//! `Request<M>` is one invocation of an endpoint. Data and params are
//! computed once in `Request::build`, before any I/O, and `call` can be
//! repeated without recomputing them. Each `call` is exactly one round-trip
//! through the supplied `Transport`.

use std::marker::PhantomData;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Scheme and host prefixed to every endpoint URI.
pub const DOMAIN: &str = "https://api.wowcher.co.uk";

/// The fixed path and verb identifying one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub uri: &'static str,
    pub method: HttpMethod,
}

impl Endpoint {
    pub const fn new(uri: &'static str, method: HttpMethod) -> Self {
        Self { uri, method }
    }

    pub fn url(&self) -> String {
        format!("{DOMAIN}{}", self.uri)
    }
}

/// A remote operation: how its arguments become a request and how its
/// response becomes a result.
pub trait ApiMethod {
    const ENDPOINT: Endpoint;

    /// Arguments supplied by the caller.
    type Args;

    /// Value returned to the caller by `Request::call`.
    type Output;

    fn url() -> String {
        Self::ENDPOINT.url()
    }

    /// JSON body fields. Defaults to an empty object.
    fn get_data(_args: &Self::Args) -> Result<Map<String, Value>, ApiError> {
        Ok(Map::new())
    }

    /// Query string fields. Defaults to none.
    fn get_params(_args: &Self::Args) -> Vec<(String, String)> {
        Vec::new()
    }

    fn process_response(response: HttpResponse) -> Result<Self::Output, ApiError>;
}

/// One invocation of `M` with concrete arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Request<M: ApiMethod> {
    data: Map<String, Value>,
    params: Vec<(String, String)>,
    method: PhantomData<M>,
}

impl<M: ApiMethod> Request<M> {
    /// Shape `args` into the request body and query string.
    ///
    /// Fails before any I/O if the arguments are incomplete.
    pub fn build(args: M::Args) -> Result<Self, ApiError> {
        let data = M::get_data(&args)?;
        let params = M::get_params(&args);
        Ok(Self {
            data,
            params,
            method: PhantomData,
        })
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// The request as plain data, ready for a `Transport`.
    ///
    /// The body is omitted when `data` is empty.
    pub fn to_http_request(&self) -> Result<HttpRequest, ApiError> {
        let (headers, body) = if self.data.is_empty() {
            (Vec::new(), None)
        } else {
            let body = serde_json::to_string(&self.data).map_err(|e| ApiError::SerializationError(e.to_string()))?;
            (
                vec![("content-type".to_string(), "application/json".to_string())],
                Some(body),
            )
        };
        Ok(HttpRequest {
            method: M::ENDPOINT.method,
            url: M::url(),
            query: self.params.clone(),
            headers,
            body,
        })
    }

    /// Send the request once and process the response.
    pub fn call<T: Transport>(&self, transport: &T) -> Result<M::Output, ApiError> {
        let request = self.to_http_request()?;
        debug!(method = %request.method, url = %request.url, "calling api method");
        let response = transport.execute(request)?;
        M::process_response(response)
    }
}

/// Map a non-2xx response to `ApiError::HttpError`.
pub(crate) fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "api method returned non-success status");
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
