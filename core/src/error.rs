//! Error types for the discussion API client.
//!
//! # Design
//! Transport failures are never wrapped here: `DiscussionClient::send` hands
//! back the transport's own future, so its error type reaches the caller
//! untouched. `ApiError` only covers what this crate does itself: resolving
//! configuration, encoding payloads, unwrapping JSONP, and decoding typed
//! response views.

use thiserror::Error;

/// Errors produced by configuration, wire helpers and response views.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required configuration field is missing or the page origin is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A JSONP response was not wrapped in the expected callback.
    #[error("malformed JSONP response: {0}")]
    Jsonp(String),

    /// The payload could not be urlencoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The server returned a non-2xx status where a typed body was expected.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The bundled transport failed before a response was received.
    #[error("transport failed: {0}")]
    Transport(String),
}
