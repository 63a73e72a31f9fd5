// ── API error types ──
//
// Every network-boundary failure is expressed here. Callers decide
// fallback policy; nothing in this crate panics on a bad response.

use thiserror::Error;

/// Unified error type for the telemetry API client.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying HTTP failure (connect, timeout, TLS, non-JSON body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store rejected a write because the `x-api-key` header did not
    /// match its configured secret.
    #[error("unauthorized: write key rejected by the telemetry store")]
    Unauthorized,

    /// The store answered with an `{ error: … }` body.
    #[error("API error (status {status}): {message}")]
    Api { message: String, status: u16 },

    /// A 2xx response carried a body that does not match the expected
    /// envelope shape.
    #[error("deserialization error: {message}")]
    Deserialization { message: String, body: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS / client construction failure.
    #[error("TLS error: {0}")]
    Tls(String),
}
