// ── Central dashboard store ──
//
// One slice per telemetry topic. Slices update independently; a
// subscriber of one slice is never blocked or invalidated by writes to
// another. Presentation surfaces receive immutable `Arc` snapshots.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::ring::{LatestSlot, RingBuffer};
use crate::model::{
    Alert, BANDWIDTH_WINDOW, BandwidthSample, DeviceCluster, InfraDevice, MAX_ALERTS, WifiBand,
};

/// Canonical in-memory state for the dashboard.
pub struct DashboardStore {
    pub(crate) bandwidth: RingBuffer<BandwidthSample>,
    pub(crate) clusters: LatestSlot<Vec<DeviceCluster>>,
    pub(crate) infrastructure: LatestSlot<Vec<InfraDevice>>,
    pub(crate) alerts: RingBuffer<Alert>,
    pub(crate) wifi: LatestSlot<Vec<WifiBand>>,
    pub(crate) last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DashboardStore {
    pub fn new() -> Self {
        let (last_refresh, _) = watch::channel(None);
        Self {
            bandwidth: RingBuffer::new(BANDWIDTH_WINDOW),
            clusters: LatestSlot::default(),
            infrastructure: LatestSlot::default(),
            alerts: RingBuffer::new(MAX_ALERTS),
            wifi: LatestSlot::default(),
            last_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn bandwidth_snapshot(&self) -> Arc<Vec<BandwidthSample>> {
        self.bandwidth.snapshot()
    }

    pub fn clusters_snapshot(&self) -> Arc<Vec<DeviceCluster>> {
        self.clusters.get()
    }

    pub fn infrastructure_snapshot(&self) -> Arc<Vec<InfraDevice>> {
        self.infrastructure.get()
    }

    pub fn alerts_snapshot(&self) -> Arc<Vec<Alert>> {
        self.alerts.snapshot()
    }

    pub fn wifi_snapshot(&self) -> Arc<Vec<WifiBand>> {
        self.wifi.get()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_bandwidth(&self) -> watch::Receiver<Arc<Vec<BandwidthSample>>> {
        self.bandwidth.subscribe()
    }

    pub fn subscribe_clusters(&self) -> watch::Receiver<Arc<Vec<DeviceCluster>>> {
        self.clusters.subscribe()
    }

    pub fn subscribe_infrastructure(&self) -> watch::Receiver<Arc<Vec<InfraDevice>>> {
        self.infrastructure.subscribe()
    }

    pub fn subscribe_alerts(&self) -> watch::Receiver<Arc<Vec<Alert>>> {
        self.alerts.subscribe()
    }

    pub fn subscribe_wifi(&self) -> watch::Receiver<Arc<Vec<WifiBand>>> {
        self.wifi.subscribe()
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub(crate) fn mark_refreshed(&self) {
        let _ = self.last_refresh.send(Some(Utc::now()));
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    pub fn subscribe_last_refresh(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_refresh.subscribe()
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}
