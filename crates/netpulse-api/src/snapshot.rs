// ── Dashboard fan-out fetch ──
//
// One refresh cycle reads four topics concurrently. Each resource fails
// independently: a timeout or bad payload on one never blocks the others.

use tracing::warn;

use crate::client::TelemetryClient;
use crate::types::{AlertsEnvelope, BandwidthEnvelope, GamingEnvelope, InfrastructureEnvelope};

/// Result of one dashboard refresh cycle. `None` per slot means that
/// resource was unreachable or returned a malformed body this cycle.
#[derive(Debug, Default)]
pub struct DashboardSnapshot {
    pub bandwidth: Option<BandwidthEnvelope>,
    pub infrastructure: Option<InfrastructureEnvelope>,
    pub gaming: Option<GamingEnvelope>,
    pub alerts: Option<AlertsEnvelope>,
}

impl DashboardSnapshot {
    /// True when no resource produced a usable envelope.
    pub fn is_empty(&self) -> bool {
        self.bandwidth.is_none()
            && self.infrastructure.is_none()
            && self.gaming.is_none()
            && self.alerts.is_none()
    }

    /// True when at least one resource produced a usable envelope.
    pub fn any_live(&self) -> bool {
        !self.is_empty()
    }
}

fn absorb<T>(resource: &'static str, result: Result<T, crate::Error>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(resource, error = %e, "telemetry fetch failed (non-fatal)");
            None
        }
    }
}

impl TelemetryClient {
    /// Fetch all four dashboard topics in parallel, tolerating individual
    /// failures. The bandwidth read is capped at the client-side window so
    /// the store never sends more history than the chart keeps.
    pub async fn fetch_dashboard_snapshot(&self, bandwidth_limit: u32) -> DashboardSnapshot {
        let (bandwidth, infrastructure, gaming, alerts) = tokio::join!(
            self.fetch_bandwidth(Some(bandwidth_limit)),
            self.fetch_infrastructure(),
            self.fetch_gaming_devices(),
            self.fetch_alerts(None),
        );

        DashboardSnapshot {
            bandwidth: absorb("bandwidth", bandwidth),
            infrastructure: absorb("network-infrastructure", infrastructure),
            gaming: absorb("gaming-devices", gaming),
            alerts: absorb("alerts", alerts),
        }
    }
}
