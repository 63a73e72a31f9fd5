//! Persisted scanner configuration for netpulse.
//!
//! JSON storage slot under the platform config dir, env-var overlay,
//! CIDR validation, and API-key resolution (env + keyring + plaintext).
//! Both the CLI and the scanner engine depend on this crate.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("subnet already configured: {0}")]
    DuplicateSubnet(String),

    #[error("no API key configured")]
    NoCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Scanner configuration ───────────────────────────────────────────

/// Auto-refresh interval bounds in seconds.
pub const SCAN_INTERVAL_MIN: u64 = 5;
pub const SCAN_INTERVAL_MAX: u64 = 300;

/// Persisted scanner settings.
///
/// Mutated only through the validated `add_subnet` / `remove_subnet` /
/// `set_scan_interval` operations; callers persist after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Telemetry store base URL.
    pub api_url: String,

    /// Read-side API key (plaintext — prefer env var or keyring).
    pub api_key: String,

    /// SNMP community string handed to scanner agents.
    pub snmp_community: String,

    /// Auto-refresh interval in seconds, bounded 5–300.
    pub scan_interval_secs: u64,

    /// Subnets to scan, CIDR notation, each unique.
    pub subnets: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://netpulse.example/functions/v1".into(),
            api_key: String::new(),
            snmp_community: "public".into(),
            scan_interval_secs: 30,
            subnets: vec!["192.168.1.0/24".into(), "192.168.10.0/24".into()],
        }
    }
}

impl ScannerConfig {
    /// Add a subnet after CIDR + duplicate validation. State is unchanged
    /// on rejection.
    pub fn add_subnet(&mut self, subnet: &str) -> Result<(), ConfigError> {
        validate_subnet(subnet)?;
        if self.subnets.iter().any(|s| s == subnet) {
            return Err(ConfigError::DuplicateSubnet(subnet.to_owned()));
        }
        self.subnets.push(subnet.to_owned());
        Ok(())
    }

    /// Remove a subnet by exact string match. Returns `true` if it existed.
    pub fn remove_subnet(&mut self, subnet: &str) -> bool {
        let before = self.subnets.len();
        self.subnets.retain(|s| s != subnet);
        self.subnets.len() != before
    }

    /// Set the auto-refresh interval, enforcing the 5–300 s bound.
    pub fn set_scan_interval(&mut self, secs: u64) -> Result<(), ConfigError> {
        if !(SCAN_INTERVAL_MIN..=SCAN_INTERVAL_MAX).contains(&secs) {
            return Err(ConfigError::Validation {
                field: "scan_interval_secs".into(),
                reason: format!("must be between {SCAN_INTERVAL_MIN} and {SCAN_INTERVAL_MAX}"),
            });
        }
        self.scan_interval_secs = secs;
        Ok(())
    }
}

/// Validate IPv4 CIDR notation: four octets 0–255, prefix 8–32.
pub fn validate_subnet(subnet: &str) -> Result<(), ConfigError> {
    let reject = |reason: &str| {
        Err(ConfigError::Validation {
            field: "subnet".into(),
            reason: reason.to_owned(),
        })
    };

    let Some((addr, prefix)) = subnet.split_once('/') else {
        return reject("expected CIDR notation (e.g. 192.168.1.0/24)");
    };

    let octets: Vec<&str> = addr.split('.').collect();
    if octets.len() != 4 {
        return reject("address must have four octets");
    }
    for octet in octets {
        if octet.is_empty() || octet.len() > 3 || !octet.bytes().all(|b| b.is_ascii_digit()) {
            return reject("octets must be decimal numbers");
        }
        if octet.parse::<u16>().map_or(true, |n| n > 255) {
            return reject("octets must be in 0–255");
        }
    }

    if prefix.is_empty() || prefix.len() > 2 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return reject("prefix must be a decimal number");
    }
    match prefix.parse::<u8>() {
        Ok(8..=32) => Ok(()),
        _ => reject("prefix must be in 8–32"),
    }
}

// ── Storage slot ────────────────────────────────────────────────────

/// File name of the fixed storage slot.
pub const STORAGE_SLOT: &str = "scanner-config.json";

/// Resolve the slot path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("net", "netpulse", "netpulse").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push(STORAGE_SLOT);
            p
        },
        |dirs| dirs.config_dir().join(STORAGE_SLOT),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netpulse");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load config from a specific slot file + environment.
pub fn load_from(path: &std::path::Path) -> Result<ScannerConfig, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(ScannerConfig::default()))
        .merge(Json::file(path))
        .merge(Env::prefixed("NETPULSE_"));

    let config: ScannerConfig = figment.extract()?;
    Ok(config)
}

/// Load config from the canonical slot path.
pub fn load_config() -> Result<ScannerConfig, ConfigError> {
    load_from(&config_path())
}

/// Load config, silently reverting to defaults when the slot is missing
/// or holds corrupt data.
pub fn load_config_or_default() -> ScannerConfig {
    load_config().unwrap_or_else(|e| {
        debug!(error = %e, "config slot unreadable, using defaults");
        ScannerConfig::default()
    })
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config to JSON and write to a specific slot file.
pub fn save_to(cfg: &ScannerConfig, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Serialize config to JSON and write to the canonical slot path.
pub fn save_config(cfg: &ScannerConfig) -> Result<(), ConfigError> {
    save_to(cfg, &config_path())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API key: env var → system keyring → plaintext config.
pub fn resolve_api_key(config: &ScannerConfig) -> Result<SecretString, ConfigError> {
    if let Ok(val) = std::env::var("NETPULSE_API_KEY") {
        if !val.is_empty() {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(entry) = keyring::Entry::new("netpulse", "api-key") {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    if !config.api_key.is_empty() {
        return Ok(SecretString::from(config.api_key.clone()));
    }

    Err(ConfigError::NoCredentials)
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn accepts_valid_cidr() {
        assert!(validate_subnet("192.168.1.0/24").is_ok());
        assert!(validate_subnet("10.0.0.0/8").is_ok());
        assert!(validate_subnet("172.16.254.1/32").is_ok());
    }

    #[test]
    fn rejects_prefix_out_of_range() {
        assert!(validate_subnet("192.168.1.0/33").is_err());
        assert!(validate_subnet("192.168.1.0/7").is_err());
    }

    #[test]
    fn rejects_bad_octets() {
        assert!(validate_subnet("999.1.1.1/24").is_err());
        assert!(validate_subnet("192.168.1/24").is_err());
        assert!(validate_subnet("a.b.c.d/24").is_err());
        assert!(validate_subnet("192.168.1.0").is_err());
    }

    #[test]
    fn rejects_duplicate_subnet() {
        let mut cfg = ScannerConfig::default();
        cfg.add_subnet("10.0.0.0/24").unwrap();
        let err = cfg.add_subnet("10.0.0.0/24").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSubnet(_)));
    }

    #[test]
    fn subnet_round_trip_restores_set() {
        let mut cfg = ScannerConfig::default();
        let original = cfg.subnets.clone();

        cfg.add_subnet("192.168.50.0/24").unwrap();
        assert!(cfg.remove_subnet("192.168.50.0/24"));

        assert_eq!(cfg.subnets, original);
    }

    #[test]
    fn rejection_leaves_state_unchanged() {
        let mut cfg = ScannerConfig::default();
        let original = cfg.clone();

        assert!(cfg.add_subnet("not-a-subnet").is_err());
        assert!(cfg.set_scan_interval(301).is_err());
        assert!(cfg.set_scan_interval(4).is_err());

        assert_eq!(cfg, original);
    }

    #[test]
    fn scan_interval_bounds_are_inclusive() {
        let mut cfg = ScannerConfig::default();
        cfg.set_scan_interval(5).unwrap();
        cfg.set_scan_interval(300).unwrap();
        assert_eq!(cfg.scan_interval_secs, 300);
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let slot = dir.path().join(STORAGE_SLOT);

        let mut cfg = ScannerConfig::default();
        cfg.add_subnet("10.20.30.0/24").unwrap();
        save_to(&cfg, &slot).unwrap();

        let loaded = load_from(&slot).unwrap();
        assert_eq!(loaded.subnets, cfg.subnets);
        assert_eq!(loaded.scan_interval_secs, cfg.scan_interval_secs);
    }

    #[test]
    fn corrupt_slot_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let slot = dir.path().join(STORAGE_SLOT);
        std::fs::write(&slot, "{ this is not json").unwrap();

        let loaded = load_from(&slot).unwrap_or_default();
        assert_eq!(loaded, ScannerConfig::default());
    }
}
