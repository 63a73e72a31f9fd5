//! # netpulse-core
//!
//! Live-data aggregation and host reconciliation for the netpulse
//! dashboard. This crate owns all decision logic: live-vs-demo data
//! precedence, gaming-device aggregation, ip-keyed host dedup, and the
//! scanner run-state machine. Presentation surfaces consume immutable
//! snapshots through `watch` channels and hold no state of their own.

pub mod convert;
pub mod error;
pub mod hosts_view;
pub mod model;
pub mod monitor;
pub mod scanner;
pub mod store;
pub mod summary;
pub mod synth;

pub use error::CoreError;
pub use monitor::{
    ApiSettings, DashboardMetrics, LINK_CAPACITY_GBPS, MonitorConfig, NetworkMonitor, SourceMode,
};
pub use scanner::{ScannerEngine, ScannerStatus};
pub use store::DashboardStore;

// Re-export so binaries configure transport without a direct api dep.
pub use netpulse_api::{TelemetryClient, TlsMode, TransportConfig};
