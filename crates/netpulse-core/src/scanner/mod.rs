// ── Scanner management ──
//
// The ScannerEngine owns the reconciled host list, the scanner run-state
// machine, and the persisted configuration. Run-state transitions:
//
//   Stopped ──start()──▶ Running (error count reset, immediate fetch,
//                                 auto-refresh timer spawned)
//   Running ──stop()───▶ Stopped (timer cancelled, progress cleared)
//   Running ──manual_scan()──▶ progress 0,10,…,100 in 200 ms steps,
//                              then one fetch, then progress reset.
//
// The auto-refresh timer keeps firing during a manual scan.

pub mod merge;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use netpulse_api::TelemetryClient;
use netpulse_config::{ScannerConfig, save_to};

use crate::error::CoreError;
use crate::model::ScannedHost;
use crate::synth::demo_hosts;

/// Pause between manual-scan progress steps.
const SCAN_STEP_DELAY: Duration = Duration::from_millis(200);

/// Scan progress advances in fixed 10 % steps.
const SCAN_STEP_PCT: u8 = 10;

// ── Status ───────────────────────────────────────────────────────────

/// Observable scanner state.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ScannerStatus {
    pub is_running: bool,
    pub last_scan: Option<DateTime<Utc>>,
    pub devices_found: usize,
    /// Subnet a manual scan is currently sweeping.
    pub current_subnet: Option<String>,
    /// 0–100; only meaningful while a manual scan runs.
    pub scan_progress: u8,
    /// Transport-level fetch failures since the last `start()`.
    pub error_count: u32,
}

// ── Engine ───────────────────────────────────────────────────────────

/// Host reconciliation and scanner lifecycle management.
///
/// Cheaply cloneable via `Arc`. All state is published through `watch`
/// channels; presentation surfaces hold no state of their own.
#[derive(Clone)]
pub struct ScannerEngine {
    inner: Arc<ScannerInner>,
}

struct ScannerInner {
    client: TelemetryClient,
    config: ArcSwap<ScannerConfig>,
    /// Storage slot for persistence; `None` disables persistence (tests).
    slot_path: Option<PathBuf>,
    status: watch::Sender<ScannerStatus>,
    hosts: watch::Sender<Arc<Vec<ScannedHost>>>,
    /// Single-flight guard: at most one reconciliation fetch at a time.
    fetch_flight: Mutex<()>,
    cancel: CancellationToken,
    /// Child token for the current running period — cancelled on stop,
    /// replaced on the next start.
    run_cancel: Mutex<Option<CancellationToken>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl ScannerEngine {
    /// Create an engine. `slot_path` overrides the canonical config slot
    /// (pass `None` to disable persistence entirely).
    pub fn new(
        client: TelemetryClient,
        config: ScannerConfig,
        slot_path: Option<PathBuf>,
    ) -> Self {
        let (status, _) = watch::channel(ScannerStatus::default());
        let (hosts, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            inner: Arc::new(ScannerInner {
                client,
                config: ArcSwap::from_pointee(config),
                slot_path,
                status,
                hosts,
                fetch_flight: Mutex::new(()),
                cancel: CancellationToken::new(),
                run_cancel: Mutex::new(None),
                tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn status(&self) -> ScannerStatus {
        self.inner.status.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ScannerStatus> {
        self.inner.status.subscribe()
    }

    pub fn hosts(&self) -> Arc<Vec<ScannedHost>> {
        self.inner.hosts.borrow().clone()
    }

    pub fn subscribe_hosts(&self) -> watch::Receiver<Arc<Vec<ScannedHost>>> {
        self.inner.hosts.subscribe()
    }

    /// Current configuration (cheap snapshot).
    pub fn config(&self) -> ScannerConfig {
        ScannerConfig::clone(&self.inner.config.load())
    }

    // ── Run-state machine ────────────────────────────────────────────

    /// Stopped → Running: reset the error count, fetch immediately, and
    /// spawn the auto-refresh timer.
    pub async fn start(&self) {
        self.inner.status.send_modify(|s| {
            s.is_running = true;
            s.error_count = 0;
        });

        self.fetch_hosts().await;

        let child = self.inner.cancel.child_token();
        *self.inner.run_cancel.lock().await = Some(child.clone());

        let engine = self.clone();
        self.inner
            .tasks
            .lock()
            .await
            .push(tokio::spawn(auto_refresh_task(engine, child)));

        info!("scanner started");
    }

    /// Running → Stopped: cancel the timer, clear progress and subnet.
    pub async fn stop(&self) {
        if let Some(token) = self.inner.run_cancel.lock().await.take() {
            token.cancel();
        }
        self.inner.status.send_modify(|s| {
            s.is_running = false;
            s.scan_progress = 0;
            s.current_subnet = None;
        });
        info!("scanner stopped");
    }

    /// Cancel everything and wait for background tasks.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let mut tasks = self.inner.tasks.lock().await;
        for task in tasks.drain(..) {
            let _ = task.await;
        }
        debug!("scanner engine shut down");
    }

    /// Sweep the first configured subnet with paced progress, then fetch.
    ///
    /// Rejected while a previous manual scan's progress is between 1
    /// and 99 — the state machine allows one sweep at a time.
    pub async fn manual_scan(&self) -> Result<(), CoreError> {
        {
            let status = self.inner.status.borrow();
            if (1..=99).contains(&status.scan_progress) {
                return Err(CoreError::ScanInProgress);
            }
        }

        let subnet = self.config().subnets.first().cloned();
        self.inner.status.send_modify(|s| {
            s.scan_progress = 0;
            s.current_subnet = subnet.clone();
        });

        let mut progress: u8 = 0;
        loop {
            tokio::time::sleep(SCAN_STEP_DELAY).await;
            self.inner.status.send_modify(|s| s.scan_progress = progress);
            if progress == 100 {
                break;
            }
            progress += SCAN_STEP_PCT;
        }

        self.fetch_hosts().await;

        self.inner.status.send_modify(|s| {
            s.scan_progress = 0;
            s.current_subnet = None;
        });
        Ok(())
    }

    // ── Reconciliation fetch ─────────────────────────────────────────

    /// One reconciliation cycle: fetch both device feeds in parallel,
    /// merge with ip dedup, fall back to demo hosts when the merged set
    /// is empty. The host list is fully replaced, never patched.
    pub async fn fetch_hosts(&self) {
        let _flight = self.inner.fetch_flight.lock().await;

        let (infra_res, gaming_res) = tokio::join!(
            self.inner.client.fetch_infrastructure(),
            self.inner.client.fetch_gaming_devices(),
        );

        let mut fetch_failed = false;
        let infra = match infra_res {
            Ok(env) => env.data.devices,
            Err(e) => {
                warn!(error = %e, "infrastructure feed unavailable");
                fetch_failed = true;
                Vec::new()
            }
        };
        let gaming = match gaming_res {
            Ok(env) => env.data.devices,
            Err(e) => {
                warn!(error = %e, "gaming feed unavailable");
                fetch_failed = true;
                Vec::new()
            }
        };

        let now = Utc::now();
        let mut merged = merge::merge_hosts(&infra, &gaming, now);

        // Empty-but-successful is not an error — the UI is simply never
        // left empty. Only transport failures count as errors.
        if merged.is_empty() {
            debug!("both feeds empty, substituting demo hosts");
            merged = demo_hosts(now);
        }

        self.inner.status.send_modify(|s| {
            s.devices_found = merged.len();
            s.last_scan = Some(now);
            if fetch_failed {
                s.error_count += 1;
            }
        });
        self.inner.hosts.send_modify(|h| *h = Arc::new(merged));
    }

    // ── Configuration operations ─────────────────────────────────────

    /// Validate and add a subnet, persisting on success.
    pub fn add_subnet(&self, subnet: &str) -> Result<(), CoreError> {
        let mut config = self.config();
        config.add_subnet(subnet)?;
        self.swap_config(config);
        Ok(())
    }

    /// Remove a subnet by exact match, persisting when it existed.
    pub fn remove_subnet(&self, subnet: &str) -> bool {
        let mut config = self.config();
        let removed = config.remove_subnet(subnet);
        if removed {
            self.swap_config(config);
        }
        removed
    }

    /// Set the auto-refresh interval (bounded 5–300 s). The running
    /// timer reads the live config each lap, so no restart is needed.
    pub fn set_scan_interval(&self, secs: u64) -> Result<(), CoreError> {
        let mut config = self.config();
        config.set_scan_interval(secs)?;
        self.swap_config(config);
        Ok(())
    }

    /// Replace the whole configuration after validating every subnet and
    /// the interval. State is unchanged on rejection.
    pub fn update_config(&self, config: ScannerConfig) -> Result<(), CoreError> {
        for subnet in &config.subnets {
            netpulse_config::validate_subnet(subnet)?;
        }
        if !(netpulse_config::SCAN_INTERVAL_MIN..=netpulse_config::SCAN_INTERVAL_MAX)
            .contains(&config.scan_interval_secs)
        {
            return Err(CoreError::ValidationFailed {
                message: "scan interval out of bounds".into(),
            });
        }
        self.swap_config(config);
        Ok(())
    }

    fn swap_config(&self, config: ScannerConfig) {
        self.persist(&config);
        self.inner.config.store(Arc::new(config));
    }

    /// Fire-and-forget persistence: a failed write is logged, never
    /// surfaced — the in-memory config stays authoritative.
    fn persist(&self, config: &ScannerConfig) {
        if let Some(ref path) = self.inner.slot_path {
            if let Err(e) = save_to(config, path) {
                warn!(error = %e, "failed to persist scanner config");
            }
        }
    }
}

// ── Background task ──────────────────────────────────────────────────

/// Re-fetch every `scan_interval_secs` while the scanner runs. The
/// interval is re-read each lap so config changes apply without restart.
async fn auto_refresh_task(engine: ScannerEngine, cancel: CancellationToken) {
    loop {
        let interval = Duration::from_secs(engine.config().scan_interval_secs);
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(interval) => {
                engine.fetch_hosts().await;
            }
        }
    }
    debug!("auto-refresh task stopped");
}
