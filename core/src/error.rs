//! Error types for the TrackSim API client.
//!
//! # Design
//! Argument validation fails with `InvalidArgument` before any request is
//! built, so a bad call site never produces network traffic. Everything the
//! remote service or the wire can do wrong lands in the other variants with
//! the raw status/body or the serde message preserved for debugging. The
//! client never maps individual status codes to dedicated variants; callers
//! that care about 404-vs-500 match on `Http { status, .. }`.

use thiserror::Error;

/// Errors returned by `TrackSim` and `DriverManager` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument was missing, empty, or malformed. Raised before
    /// any network access.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying transport failed (connect, IO, protocol).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server returned a non-2xx status where a decoded body was
    /// expected.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
