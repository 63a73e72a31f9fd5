// netpulse-api: Async Rust client for the netpulse telemetry store endpoints

pub mod client;
pub mod error;
pub mod snapshot;
pub mod transport;
pub mod types;

pub use client::TelemetryClient;
pub use error::Error;
pub use snapshot::DashboardSnapshot;
pub use transport::{TlsMode, TransportConfig};
