//! Command handlers and shared context construction.

pub mod config_cmd;
pub mod dashboard;
pub mod hosts;
pub mod scan;
pub mod summary;

use std::time::Duration;

use secrecy::SecretString;

use netpulse_config::ScannerConfig;
use netpulse_core::{ApiSettings, TelemetryClient, TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolved connection settings shared by all store-facing commands.
pub struct Context {
    pub config: ScannerConfig,
    pub api: ApiSettings,
}

/// Build the context from the config slot plus CLI overrides.
///
/// Key resolution is lenient: a store without a configured secret is
/// open for reads, so a missing key resolves to an empty one.
pub fn build_context(global: &GlobalOpts) -> Context {
    let config = netpulse_config::load_config_or_default();

    let api_url = global
        .api_url
        .clone()
        .unwrap_or_else(|| config.api_url.clone());
    tracing::debug!(%api_url, "resolved telemetry store URL");

    let api_key = global.api_key.clone().map_or_else(
        || {
            netpulse_config::resolve_api_key(&config)
                .unwrap_or_else(|_| SecretString::from(String::new()))
        },
        SecretString::from,
    );

    let transport = TransportConfig {
        tls: if global.insecure {
            TlsMode::DangerAcceptInvalid
        } else {
            TlsMode::System
        },
        timeout: Duration::from_secs(global.timeout),
    };

    Context {
        config,
        api: ApiSettings {
            base_url: api_url,
            api_key,
            transport,
        },
    }
}

impl Context {
    /// Build a telemetry client from the resolved settings.
    pub fn client(&self) -> Result<TelemetryClient, CliError> {
        TelemetryClient::new(&self.api.base_url, &self.api.api_key, &self.api.transport)
            .map_err(|e| CliError::from(netpulse_core::CoreError::from(e)))
    }
}
