// ── Core error types ──
//
// User-facing errors from netpulse-core. Consumers never see raw HTTP
// status codes or JSON parse failures directly; the
// `From<netpulse_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach telemetry store: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Telemetry store rejected the request: {message}")]
    Rejected { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// A manual scan is already advancing its progress.
    #[error("A scan is already in progress")]
    ScanInProgress,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<netpulse_api::Error> for CoreError {
    fn from(err: netpulse_api::Error) -> Self {
        match err {
            netpulse_api::Error::Transport(ref e) => {
                if e.is_timeout() || e.is_connect() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            netpulse_api::Error::Unauthorized => CoreError::Rejected {
                message: "write key rejected".into(),
            },
            netpulse_api::Error::Api { message, status } => CoreError::Api {
                message,
                status: Some(status),
            },
            netpulse_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            netpulse_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            netpulse_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                reason: format!("TLS error: {msg}"),
            },
        }
    }
}

impl From<netpulse_config::ConfigError> for CoreError {
    fn from(err: netpulse_config::ConfigError) -> Self {
        match err {
            netpulse_config::ConfigError::Validation { field, reason } => {
                CoreError::ValidationFailed {
                    message: format!("{field}: {reason}"),
                }
            }
            netpulse_config::ConfigError::DuplicateSubnet(subnet) => CoreError::ValidationFailed {
                message: format!("subnet already configured: {subnet}"),
            },
            other => CoreError::Config {
                message: other.to_string(),
            },
        }
    }
}
