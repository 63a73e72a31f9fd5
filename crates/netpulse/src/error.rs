//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use netpulse_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Could not reach the telemetry store")]
    #[diagnostic(
        code(netpulse::connection_failed),
        help(
            "Check that the store is reachable.\n\
             Override the URL with --api-url or NETPULSE_API_URL.\n\
             Self-signed TLS? Try --insecure (-k)."
        )
    )]
    ConnectionFailed { reason: String },

    #[error("The telemetry store rejected the request: {message}")]
    #[diagnostic(
        code(netpulse::rejected),
        help("Verify the API key (NETPULSE_API_KEY, keyring, or config slot).")
    )]
    Rejected { message: String },

    #[error("No API key configured")]
    #[diagnostic(
        code(netpulse::no_credentials),
        help(
            "Set NETPULSE_API_KEY, store a key in the system keyring,\n\
             or put api_key into the config slot."
        )
    )]
    NoCredentials,

    #[error("Invalid value: {reason}")]
    #[diagnostic(code(netpulse::validation))]
    Validation { reason: String },

    #[error("A scan is already in progress")]
    #[diagnostic(code(netpulse::scan_in_progress))]
    ScanInProgress,

    #[error("API error: {message}")]
    #[diagnostic(code(netpulse::api_error))]
    ApiError { message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(netpulse::config),
        help("The config slot lives at the platform config dir (netpulse/scanner-config.json).")
    )]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(netpulse::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Rejected { .. } | Self::NoCredentials => exit_code::AUTH,
            Self::Validation { .. } | Self::ScanInProgress => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { reason } => CliError::ConnectionFailed { reason },
            CoreError::Rejected { message } => CliError::Rejected { message },
            CoreError::ValidationFailed { message } => CliError::Validation { reason: message },
            CoreError::ScanInProgress => CliError::ScanInProgress,
            CoreError::Api { message, status: _ } => CliError::ApiError { message },
            CoreError::Config { message } => CliError::Config { message },
            CoreError::Internal(message) => CliError::ApiError { message },
        }
    }
}

impl From<netpulse_config::ConfigError> for CliError {
    fn from(err: netpulse_config::ConfigError) -> Self {
        match err {
            netpulse_config::ConfigError::Validation { field, reason } => CliError::Validation {
                reason: format!("{field}: {reason}"),
            },
            netpulse_config::ConfigError::DuplicateSubnet(subnet) => CliError::Validation {
                reason: format!("subnet already configured: {subnet}"),
            },
            netpulse_config::ConfigError::NoCredentials => CliError::NoCredentials,
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
