//! Error types for the data-access framework.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the record does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! code and body for debugging. Programming defects — an operation invoked
//! before `initialize`, or a route key nobody registered — are panics, not
//! variants: they are not recoverable conditions.

use thiserror::Error;

/// Result alias used by every framework operation.
pub type ApiResult<U> = Result<U, ApiError>;

/// Errors surfaced by concrete clients.
///
/// The facade service never lets these escape: it logs them and substitutes
/// a safe default (see [`EntityService`](crate::facade::EntityService)).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the requested record does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
