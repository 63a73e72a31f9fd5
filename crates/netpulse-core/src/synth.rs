// ── Synthetic data generation ──
//
// Produces plausible initial and incremental telemetry when no live
// store is reachable. Pure value production — no side effects — and
// seedable so tests are reproducible.
//
// Startup draws from idle ranges; incremental ticks draw from higher
// "under load" ranges, matching how a saturated uplink actually looks.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{
    Alert, AlertLevel, BANDWIDTH_WINDOW, BandwidthSample, ClusterStatus, DeviceCluster,
    HostStatus, HostType, InfraDevice, InfraDeviceType, InfraStatus, ScannedHost,
    UTILIZATION_CEIL, UTILIZATION_FLOOR, WifiBand,
};

/// Format an instant as the chart's `HH:MM` label.
pub fn time_label(ts: DateTime<Utc>) -> String {
    ts.format("%H:%M").to_string()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Seedable generator for synthetic telemetry.
pub struct SynthGenerator {
    rng: StdRng,
}

impl SynthGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn jitter(&mut self, base: f64, span: f64) -> f64 {
        base + self.rng.r#gen::<f64>() * span
    }

    fn centered(&mut self, span: f64) -> f64 {
        (self.rng.r#gen::<f64>() - 0.5) * span
    }

    // ── Bandwidth ────────────────────────────────────────────────────

    /// Six samples spaced five minutes apart ending at `now`, drawn from
    /// idle ranges.
    #[allow(clippy::cast_possible_wrap, clippy::as_conversions)]
    pub fn initial_bandwidth(&mut self, now: DateTime<Utc>) -> Vec<BandwidthSample> {
        (0..BANDWIDTH_WINDOW)
            .map(|i| {
                let offset = (BANDWIDTH_WINDOW - 1 - i) as i64;
                let ts = now - Duration::minutes(5 * offset);
                BandwidthSample {
                    time: time_label(ts),
                    upstream: self.jitter(2.1, 5.0),
                    downstream: self.jitter(5.2, 4.0),
                    wifi: self.jitter(3.4, 3.0),
                }
            })
            .collect()
    }

    /// One incremental sample from the "under load" ranges, one decimal.
    pub fn next_sample(&mut self, now: DateTime<Utc>) -> BandwidthSample {
        BandwidthSample {
            time: time_label(now),
            upstream: round1(self.jitter(6.5, 3.5)),
            downstream: round1(self.jitter(8.0, 2.0)),
            wifi: round1(self.jitter(5.5, 2.5)),
        }
    }

    // ── Perturbation ticks ───────────────────────────────────────────

    /// Drift cpu/memory within bounded deltas, clamped to [10, 95].
    pub fn perturb_infrastructure(&mut self, devices: &mut [InfraDevice]) {
        for device in devices {
            device.cpu = (device.cpu + self.centered(10.0))
                .clamp(UTILIZATION_FLOOR, UTILIZATION_CEIL);
            device.memory = (device.memory + self.centered(5.0))
                .clamp(UTILIZATION_FLOOR, UTILIZATION_CEIL);
        }
    }

    /// Drift cluster ping (floor 5 ms, integer) and packet loss (floor 0,
    /// two decimals). Counts are aggregates and never touched here.
    pub fn perturb_clusters(&mut self, clusters: &mut [DeviceCluster]) {
        for cluster in clusters {
            cluster.ping = (cluster.ping + self.centered(4.0)).round().max(5.0);
            cluster.packet_loss = round2((cluster.packet_loss + self.centered(0.1)).max(0.0));
        }
    }
}

impl Default for SynthGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Fixed demo datasets ─────────────────────────────────────────────
//
// Deterministic content so the fallback path is idempotent: two demo
// refreshes in a row produce the same lists.

pub fn demo_clusters() -> Vec<DeviceCluster> {
    vec![
        DeviceCluster {
            name: "Nintendo Switch Cluster".into(),
            count: 16,
            ping: 12.0,
            packet_loss: 0.1,
            status: ClusterStatus::Optimal,
        },
        DeviceCluster {
            name: "PlayStation 5 Cluster".into(),
            count: 16,
            ping: 14.0,
            packet_loss: 0.2,
            status: ClusterStatus::Optimal,
        },
        DeviceCluster {
            name: "Cisco Access Points".into(),
            count: 8,
            ping: 8.0,
            packet_loss: 0.0,
            status: ClusterStatus::Optimal,
        },
    ]
}

pub fn demo_infrastructure() -> Vec<InfraDevice> {
    let device = |id: &str, device_type, cpu: f64, memory: f64, ports| InfraDevice {
        id: id.into(),
        device_type,
        status: InfraStatus::Active,
        cpu,
        memory,
        ports,
    };
    vec![
        device("HUAWEI-HN8255WS", InfraDeviceType::Gateway, 34.0, 52.0, 32),
        device("CISCO-SW-01", InfraDeviceType::Switch, 28.0, 41.0, 48),
        device("CISCO-SW-02", InfraDeviceType::Switch, 31.0, 45.0, 48),
        device("CISCO-AP-01", InfraDeviceType::AccessPoint, 22.0, 38.0, 1),
        device("CISCO-AP-02", InfraDeviceType::AccessPoint, 19.0, 35.0, 1),
        device("CISCO-AP-03", InfraDeviceType::AccessPoint, 25.0, 42.0, 1),
        device("CISCO-AP-04", InfraDeviceType::AccessPoint, 20.0, 36.0, 1),
    ]
}

pub fn demo_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: "1".into(),
            device: "Upstream Link".into(),
            level: AlertLevel::Warning,
            msg: "7.2 Gbps / 10 Gbps utilized (72%)".into(),
            time: "now".into(),
        },
        Alert {
            id: "2".into(),
            device: "CISCO-AP-03".into(),
            level: AlertLevel::Info,
            msg: "2.4 GHz band at 89% utilization".into(),
            time: "1 min".into(),
        },
    ]
}

pub fn demo_wifi() -> Vec<WifiBand> {
    vec![
        WifiBand {
            band: "5 GHz".into(),
            percent: 65.0,
        },
        WifiBand {
            band: "2.4 GHz".into(),
            percent: 35.0,
        },
    ]
}

/// The fixed host list shown when both device feeds are empty or
/// unreachable. `now` stamps `last_seen` so staleness offsets stay
/// relative to the current scan.
pub fn demo_hosts(now: DateTime<Utc>) -> Vec<ScannedHost> {
    let host = |ip: &str,
                name: &str,
                host_type,
                vendor: &str,
                status,
                last_seen,
                ping,
                interfaces,
                cpu,
                memory| ScannedHost {
        ip: ip.into(),
        name: name.into(),
        host_type,
        vendor: vendor.into(),
        status,
        last_seen,
        ping,
        interfaces,
        cpu,
        memory,
    };

    vec![
        host("192.168.1.1", "HUAWEI-HN8255WS", HostType::Router, "Huawei",
            HostStatus::Online, now, Some(1), Some(8), Some(34), Some(52)),
        host("192.168.1.2", "CISCO-SW-01", HostType::Switch, "Cisco",
            HostStatus::Online, now, Some(2), Some(48), Some(28), Some(41)),
        host("192.168.1.3", "CISCO-SW-02", HostType::Switch, "Cisco",
            HostStatus::Online, now, Some(3), Some(48), Some(31), Some(45)),
        host("192.168.1.10", "CISCO-AP-01", HostType::AccessPoint, "Cisco",
            HostStatus::Online, now, Some(4), Some(2), Some(22), Some(38)),
        host("192.168.1.11", "CISCO-AP-02", HostType::AccessPoint, "Cisco",
            HostStatus::Online, now, Some(5), Some(2), Some(19), Some(35)),
        host("192.168.1.12", "CISCO-AP-03", HostType::AccessPoint, "Cisco",
            HostStatus::Warning, now - Duration::minutes(1), Some(45), Some(2), Some(89), Some(72)),
        host("192.168.1.20", "NAS-Synology", HostType::Storage, "Synology",
            HostStatus::Online, now, Some(3), Some(4), Some(15), Some(62)),
        host("192.168.1.50", "Nintendo-Switch-01", HostType::Unknown, "Nintendo",
            HostStatus::Online, now, Some(12), None, None, None),
        host("192.168.1.51", "Nintendo-Switch-02", HostType::Unknown, "Nintendo",
            HostStatus::Online, now, Some(14), None, None, None),
        host("192.168.1.60", "PlayStation-5-01", HostType::Unknown, "Sony",
            HostStatus::Online, now, Some(11), None, None, None),
        host("192.168.1.100", "Unknown device", HostType::Unknown, "Unknown",
            HostStatus::Offline, now - Duration::minutes(5), None, None, None, None),
    ]
}

// ── Tests ───────────────────────────────────────────────────────────
