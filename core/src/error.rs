//! Error types for the AzuraCast client.
//!
//! # Design
//! The taxonomy follows how the upstream API actually fails. Local argument
//! checks produce `Client` before any request is made. Each status the API
//! uses meaningfully gets its own variant; anything the dispatcher cannot
//! classify lands in `Unexpected` with the URL and raw body for debugging.
//!
//! A parsed response carrying `"success": false` is not an error: it is
//! returned to the caller as data.

use crate::http::HttpMethod;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller passed an invalid argument. Raised locally, never retried.
    #[error("invalid argument: {0}")]
    Client(String),

    /// The server returned 404.
    #[error("Requested resource not found")]
    NotFound,

    /// The server returned 403, or answered 200 with its login page.
    #[error("access denied: invalid or missing API key")]
    AccessDenied,

    /// The server returned 405. This is a defect in the client, not a runtime
    /// condition to recover from.
    #[error("method {method} is not allowed for {url}")]
    MethodNotAllowed { method: HttpMethod, url: String },

    /// The server reported an exception, either as JSON or as an HTML error
    /// page.
    #[error("{kind}: {message}")]
    Api { kind: String, message: String },

    /// The response could not be classified.
    #[error("unexpected response from {url}")]
    Unexpected { url: String, body: String },

    /// No HTTP response was obtained at all.
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A well-formed payload did not match the expected model.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// An endpoint template was rendered without one of its placeholders.
    #[error("placeholder {{{placeholder}}} of template {template} has no value")]
    UnresolvedPlaceholder {
        template: &'static str,
        placeholder: String,
    },

    /// A local file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn client(msg: impl Into<String>) -> Self {
        Self::Client(msg.into())
    }

    pub fn api(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn unexpected(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Unexpected {
            url: url.into(),
            body: body.into(),
        }
    }

    /// Errors that indicate a bug in this library rather than a runtime
    /// condition.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::MethodNotAllowed { .. } | Error::UnresolvedPlaceholder { .. }
        )
    }
}
