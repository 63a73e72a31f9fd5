// ── Wire → domain conversion ──
//
// Normalizes the loosely structured store payloads into the canonical
// model. Everything here is total: unknown strings fall back to safe
// defaults instead of propagating errors into the refresh loop.

use netpulse_api::types::{BandwidthRecord, WireAlert, WireGamingDevice, WireInfraDevice};

use crate::model::{
    Alert, AlertLevel, BandwidthSample, ClusterStatus, DeviceCluster, InfraDevice,
    InfraDeviceType, InfraStatus,
};
use crate::synth::time_label;

/// Cluster names emitted by the gaming-device aggregation.
pub const NINTENDO_CLUSTER: &str = "Nintendo Switch Cluster";
pub const PLAYSTATION_CLUSTER: &str = "PlayStation 5 Cluster";

// ── Bandwidth ───────────────────────────────────────────────────────

/// Map stored bandwidth records to chart samples, oldest first.
pub fn bandwidth_from_records(records: &[BandwidthRecord]) -> Vec<BandwidthSample> {
    records
        .iter()
        .map(|r| BandwidthSample {
            time: time_label(r.timestamp),
            upstream: r.upstream_gbps,
            downstream: r.downstream_gbps,
            wifi: r.wifi_gbps,
        })
        .collect()
}

// ── Gaming devices → clusters ───────────────────────────────────────

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

fn aggregate(name: &str, group: &[&WireGamingDevice]) -> DeviceCluster {
    let avg_ping = mean(group.iter().filter_map(|d| d.ping));
    let avg_loss = mean(group.iter().filter_map(|d| d.packet_loss));
    let count = group.iter().map(|d| d.count.unwrap_or(1)).sum();

    // Worst status in the group wins.
    let status = group
        .iter()
        .map(|d| {
            d.status
                .as_deref()
                .and_then(|s| s.parse::<ClusterStatus>().ok())
                .unwrap_or_default()
        })
        .max_by_key(|s| match s {
            ClusterStatus::Optimal => 0,
            ClusterStatus::Warning => 1,
            ClusterStatus::Critical => 2,
        })
        .unwrap_or_default();

    DeviceCluster {
        name: name.to_owned(),
        count,
        ping: avg_ping.round(),
        packet_loss: round2(avg_loss),
        status,
    }
}

/// Partition gaming devices by platform substring and aggregate each
/// non-empty group into one cluster. Empty groups emit nothing — no
/// zeroed placeholders.
pub fn clusters_from_gaming(devices: &[WireGamingDevice]) -> Vec<DeviceCluster> {
    let nintendo: Vec<&WireGamingDevice> = devices
        .iter()
        .filter(|d| d.name.contains("Nintendo") || d.name.contains("Switch"))
        .collect();
    let playstation: Vec<&WireGamingDevice> = devices
        .iter()
        .filter(|d| d.name.contains("PlayStation") || d.name.contains("PS5"))
        .collect();

    let mut clusters = Vec::with_capacity(2);
    if !nintendo.is_empty() {
        clusters.push(aggregate(NINTENDO_CLUSTER, &nintendo));
    }
    if !playstation.is_empty() {
        clusters.push(aggregate(PLAYSTATION_CLUSTER, &playstation));
    }
    clusters
}

// ── Infrastructure ──────────────────────────────────────────────────

fn infra_type(raw: Option<&str>) -> InfraDeviceType {
    match raw {
        Some("Gateway") => InfraDeviceType::Gateway,
        Some("Access Point" | "AccessPoint") => InfraDeviceType::AccessPoint,
        _ => InfraDeviceType::Switch,
    }
}

/// Map wire infrastructure devices to the domain shape. API-sourced
/// utilization is taken as-is — the [10, 95] clamp applies only to
/// synthetic ticks.
pub fn infra_from_wire(devices: &[WireInfraDevice]) -> Vec<InfraDevice> {
    devices
        .iter()
        .map(|d| InfraDevice {
            id: d.id.clone(),
            device_type: infra_type(d.device_type.as_deref()),
            status: d
                .status
                .as_deref()
                .and_then(|s| s.parse::<InfraStatus>().ok())
                .unwrap_or_default(),
            cpu: d.cpu.unwrap_or(0.0),
            memory: d.memory.unwrap_or(0.0),
            ports: d.ports.unwrap_or(1),
        })
        .collect()
}

// ── Alerts ──────────────────────────────────────────────────────────

pub fn alerts_from_wire(alerts: &[WireAlert]) -> Vec<Alert> {
    alerts
        .iter()
        .map(|a| Alert {
            id: a.id.clone(),
            device: a.device.clone(),
            level: a.level.parse::<AlertLevel>().unwrap_or_default(),
            msg: a.msg.clone(),
            time: a.time.clone(),
        })
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn gaming(name: &str, ping: f64, loss: f64, status: &str) -> WireGamingDevice {
        WireGamingDevice {
            name: name.into(),
            count: None,
            ping: Some(ping),
            packet_loss: Some(loss),
            status: Some(status.into()),
            ip: None,
            device_type: None,
        }
    }

    #[test]
    fn partitions_by_platform_substring() {
        let devices = vec![
            gaming("Nintendo-Switch-01", 12.0, 0.1, "optimal"),
            gaming("Nintendo-Switch-02", 14.0, 0.2, "optimal"),
            gaming("PlayStation-5-01", 11.0, 0.3, "optimal"),
        ];

        let clusters = clusters_from_gaming(&devices);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].name, NINTENDO_CLUSTER);
        assert_eq!(clusters[0].count, 2);
        assert_eq!(clusters[1].name, PLAYSTATION_CLUSTER);
        assert_eq!(clusters[1].count, 1);
    }

    #[test]
    fn averages_are_rounded_per_contract() {
        // Mean ping 12.6 → 13; mean loss 0.1233… → 0.12.
        let devices = vec![
            gaming("Nintendo-A", 12.0, 0.1, "optimal"),
            gaming("Nintendo-B", 13.0, 0.15, "optimal"),
            gaming("Nintendo-C", 12.8, 0.12, "optimal"),
        ];

        let clusters = clusters_from_gaming(&devices);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].ping, 13.0);
        assert_eq!(clusters[0].packet_loss, 0.12);
    }

    #[test]
    fn empty_group_emits_no_placeholder() {
        let devices = vec![gaming("PlayStation-5-01", 11.0, 0.0, "optimal")];
        let clusters = clusters_from_gaming(&devices);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].name, PLAYSTATION_CLUSTER);
    }

    #[test]
    fn worst_group_status_wins() {
        let devices = vec![
            gaming("Nintendo-A", 12.0, 0.1, "optimal"),
            gaming("Nintendo-B", 80.0, 2.0, "critical"),
        ];
        let clusters = clusters_from_gaming(&devices);
        assert_eq!(clusters[0].status, crate::model::ClusterStatus::Critical);
    }

    #[test]
    fn unknown_infra_strings_fall_back_to_defaults() {
        let wire = vec![WireInfraDevice {
            id: "X-01".into(),
            device_type: Some("Toaster".into()),
            status: Some("exploded".into()),
            cpu: None,
            memory: None,
            ports: None,
            ip: None,
            name: None,
            vendor: None,
            ping: None,
            uptime: None,
            temperature: None,
        }];

        let devices = infra_from_wire(&wire);

        assert_eq!(devices[0].device_type, InfraDeviceType::Switch);
        assert_eq!(devices[0].status, InfraStatus::Inactive);
        assert_eq!(devices[0].ports, 1);
    }
}
