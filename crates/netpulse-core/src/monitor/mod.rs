// ── Live data aggregation ──
//
// The NetworkMonitor owns the canonical dashboard state: bandwidth
// history, device clusters, infrastructure devices, alerts, and WiFi
// distribution. It decides whether to trust remote data or run the
// synthetic generator, and drives the fixed-interval refresh loop.

mod gate;
mod mode;

pub use mode::SourceMode;

use std::sync::Mutex as StdMutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use secrecy::SecretString;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use netpulse_api::{DashboardSnapshot, TelemetryClient, TransportConfig};

use crate::convert;
use crate::error::CoreError;
use crate::model::BANDWIDTH_WINDOW;
use crate::store::DashboardStore;
use crate::synth::{self, SynthGenerator};

use gate::SliceGate;

/// Uplink capacity used as the utilization denominator.
pub const LINK_CAPACITY_GBPS: f64 = 10.0;

/// Default refresh cadence.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

// ── Configuration ────────────────────────────────────────────────────

/// Where the monitor reads live data from. `None` runs demo-only.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: SecretString,
    pub transport: TransportConfig,
}

/// Monitor tuning.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub api: Option<ApiSettings>,
    pub refresh_interval: Duration,
    /// Seed for the synthetic generator; `None` uses entropy.
    pub seed: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            api: None,
            refresh_interval: REFRESH_INTERVAL,
            seed: None,
        }
    }
}

// ── Derived metrics ──────────────────────────────────────────────────

/// Summary numbers recomputed from the current snapshots on demand —
/// derived state, never stored.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DashboardMetrics {
    pub current_upstream: f64,
    pub upstream_percent: f64,
    pub current_wifi: f64,
    pub total_gaming_devices: u32,
    pub active_network_devices: usize,
}

// ── Monitor ──────────────────────────────────────────────────────────

/// The main entry point for dashboard consumers.
///
/// Cheaply cloneable via `Arc`. Call [`start`](Self::start) to seed
/// initial state, probe the store once, and spawn the refresh loop;
/// [`shutdown`](Self::shutdown) cancels all background work.
#[derive(Clone)]
pub struct NetworkMonitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    client: Option<TelemetryClient>,
    store: Arc<DashboardStore>,
    mode: watch::Sender<SourceMode>,
    synth: StdMutex<SynthGenerator>,
    /// Refresh cycle counter; each cycle takes the next generation.
    generation: AtomicU64,
    gates: SliceGates,
    cancel: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

/// One gate per independently updatable slice.
struct SliceGates {
    bandwidth: SliceGate,
    clusters: SliceGate,
    infrastructure: SliceGate,
    alerts: SliceGate,
}

impl NetworkMonitor {
    /// Create a monitor. Does not fetch or spawn anything — call
    /// [`start`](Self::start).
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let client = match &config.api {
            Some(api) => Some(TelemetryClient::new(
                &api.base_url,
                &api.api_key,
                &api.transport,
            )?),
            None => None,
        };

        let (mode, _) = watch::channel(SourceMode::Unknown);
        let synth = match config.seed {
            Some(seed) => SynthGenerator::seeded(seed),
            None => SynthGenerator::new(),
        };

        Ok(Self {
            inner: Arc::new(MonitorInner {
                config,
                client,
                store: Arc::new(DashboardStore::new()),
                mode,
                synth: StdMutex::new(synth),
                generation: AtomicU64::new(0),
                gates: SliceGates {
                    bandwidth: SliceGate::new(),
                    clusters: SliceGate::new(),
                    infrastructure: SliceGate::new(),
                    alerts: SliceGate::new(),
                },
                cancel: CancellationToken::new(),
                tasks: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Access the underlying store.
    pub fn store(&self) -> &Arc<DashboardStore> {
        &self.inner.store
    }

    /// Current data source mode.
    pub fn mode(&self) -> SourceMode {
        *self.inner.mode.borrow()
    }

    /// Subscribe to mode transitions.
    pub fn subscribe_mode(&self) -> watch::Receiver<SourceMode> {
        self.inner.mode.subscribe()
    }

    /// True once live data has been observed.
    pub fn is_live(&self) -> bool {
        self.mode().is_live()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Seed initial synthetic state, attempt one real fetch, and spawn
    /// the periodic refresh task.
    pub async fn start(&self) {
        self.seed_initial_state();
        self.probe().await;

        let interval = self.inner.config.refresh_interval;
        if !interval.is_zero() {
            let monitor = self.clone();
            let cancel = self.inner.cancel.child_token();
            self.inner
                .tasks
                .lock()
                .await
                .push(tokio::spawn(refresh_task(monitor, interval, cancel)));
        }
        info!(mode = ?self.mode(), "network monitor started");
    }

    /// Cancel background tasks and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let mut tasks = self.inner.tasks.lock().await;
        for task in tasks.drain(..) {
            let _ = task.await;
        }
        debug!("network monitor stopped");
    }

    /// Fill every slice with demo data so the dashboard is never empty.
    fn seed_initial_state(&self) {
        let initial = {
            let mut synth = self.inner.synth.lock().expect("synth lock poisoned");
            synth.initial_bandwidth(Utc::now())
        };
        let store = &self.inner.store;
        store.bandwidth.replace_all(initial);
        store.clusters.set(synth::demo_clusters());
        store.infrastructure.set(synth::demo_infrastructure());
        store.alerts.replace_all(synth::demo_alerts());
        store.wifi.set(synth::demo_wifi());
        store.mark_refreshed();
    }

    // ── Refresh cycle ────────────────────────────────────────────────

    /// One fetch attempt against the store. On any shaped response the
    /// mode latches to Live; in Unknown a failure degrades to Demo.
    pub async fn probe(&self) -> SourceMode {
        let Some(client) = self.inner.client.as_ref() else {
            self.inner.mode.send_modify(|m| *m = m.observe_failure());
            return self.mode();
        };

        let generation = self.next_generation();
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let snapshot = client
            .fetch_dashboard_snapshot(BANDWIDTH_WINDOW as u32)
            .await;

        if snapshot.any_live() {
            self.apply_snapshot(&snapshot, generation);
            self.inner.mode.send_modify(|m| *m = m.observe_live());
        } else {
            self.inner.mode.send_modify(|m| *m = m.observe_failure());
        }
        self.mode()
    }

    /// One refresh cycle: re-fetch in Live mode, synthetic tick otherwise.
    /// Fetch failures are absorbed — stale slices are retained until the
    /// next success.
    pub async fn refresh(&self) {
        match self.mode() {
            SourceMode::Live => {
                if let Some(client) = self.inner.client.as_ref() {
                    let generation = self.next_generation();
                    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
                    let snapshot = client
                        .fetch_dashboard_snapshot(BANDWIDTH_WINDOW as u32)
                        .await;
                    self.apply_snapshot(&snapshot, generation);
                }
            }
            SourceMode::Unknown | SourceMode::Demo => self.synthetic_tick(),
        }
        self.inner.store.mark_refreshed();
    }

    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Apply whichever slices arrived. Slices are independent: one
    /// missing resource never blocks the others, and a slice whose gate
    /// rejects the generation keeps its newer data.
    fn apply_snapshot(&self, snapshot: &DashboardSnapshot, generation: u64) {
        let store = &self.inner.store;

        if let Some(ref env) = snapshot.bandwidth {
            let samples = convert::bandwidth_from_records(&env.data);
            if !samples.is_empty() && self.inner.gates.bandwidth.admit(generation) {
                store.bandwidth.replace_all(samples);
            }
        }

        if let Some(ref env) = snapshot.gaming {
            let clusters = convert::clusters_from_gaming(&env.data.devices);
            if !clusters.is_empty() && self.inner.gates.clusters.admit(generation) {
                store.clusters.set(clusters);
            }
        }

        if let Some(ref env) = snapshot.infrastructure {
            let devices = convert::infra_from_wire(&env.data.devices);
            if !devices.is_empty() && self.inner.gates.infrastructure.admit(generation) {
                store.infrastructure.set(devices);
            }
        }

        if let Some(ref env) = snapshot.alerts {
            if self.inner.gates.alerts.admit(generation) {
                store.alerts.replace_all(convert::alerts_from_wire(&env.data));
            }
        }
    }

    /// Advance every slice with synthetic values.
    fn synthetic_tick(&self) {
        let store = &self.inner.store;
        let mut synth = self.inner.synth.lock().expect("synth lock poisoned");

        store.bandwidth.append(synth.next_sample(Utc::now()));

        let mut infrastructure = (*store.infrastructure.get()).clone();
        synth.perturb_infrastructure(&mut infrastructure);
        store.infrastructure.set(infrastructure);

        let mut clusters = (*store.clusters.get()).clone();
        synth.perturb_clusters(&mut clusters);
        store.clusters.set(clusters);
    }

    // ── Derived metrics ──────────────────────────────────────────────

    /// Compute summary metrics from the current snapshots.
    pub fn metrics(&self) -> DashboardMetrics {
        let store = &self.inner.store;
        let bandwidth = store.bandwidth_snapshot();
        let clusters = store.clusters_snapshot();
        let infrastructure = store.infrastructure_snapshot();

        let current_upstream = bandwidth.last().map_or(0.0, |s| s.upstream);
        let current_wifi = bandwidth.last().map_or(0.0, |s| s.wifi);

        DashboardMetrics {
            current_upstream,
            upstream_percent: current_upstream / LINK_CAPACITY_GBPS * 100.0,
            current_wifi,
            total_gaming_devices: clusters.iter().map(|c| c.count).sum(),
            active_network_devices: infrastructure
                .iter()
                .filter(|d| d.status == crate::model::InfraStatus::Active)
                .count(),
        }
    }
}

// ── Background task ──────────────────────────────────────────────────

async fn refresh_task(monitor: NetworkMonitor, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately; skip it so the cadence
    // starts one interval after start().
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                monitor.refresh().await;
            }
        }
    }
    debug!("refresh task stopped");
}

// ── Tests ────────────────────────────────────────────────────────────
