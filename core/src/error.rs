//! Error types for the Wowcher API client.
//!
//! # Design
//! Argument problems (`MissingArgument`, `MissingDate`) are raised while a
//! request is being built, before any I/O. Everything else comes from the
//! round-trip itself: the transport failing outright, the server answering
//! with a non-2xx status, or a body that does not decode.

use thiserror::Error;

/// Errors returned while building, sending or processing an API request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument was not supplied to the request builder.
    #[error("missing required argument `{0}`")]
    MissingArgument(&'static str),

    /// A date field without a default was absent when shaping the payload.
    #[error("date field `{0}` is required and has no default")]
    MissingDate(&'static str),

    /// The server returned a non-2xx status to an endpoint that expects success.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The HTTP round-trip itself failed (DNS, connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] Box<ureq::Error>),
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::Transport(Box::new(err))
    }
}
