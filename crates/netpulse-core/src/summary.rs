// ── Aggregate dashboard summary ──
//
// Composes the four topic fetches into one overview object, tolerating
// missing resources (each defaults to empty data).

use chrono::{DateTime, Utc};
use serde::Serialize;

use netpulse_api::DashboardSnapshot;

use crate::convert;
use crate::model::Alert;

/// Upstream utilization classification: high above 80 %, medium above
/// 50 %, normal otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationStatus {
    High,
    Medium,
    Normal,
}

impl UtilizationStatus {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 80.0 {
            Self::High
        } else if percent > 50.0 {
            Self::Medium
        } else {
            Self::Normal
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BandwidthSummary {
    pub upstream_gbps: f64,
    pub downstream_gbps: f64,
    pub wifi_gbps: f64,
    pub upstream_percent: f64,
    pub status: UtilizationStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfrastructureSummary {
    pub total_devices: usize,
    pub active_devices: usize,
    /// Devices running above 80 % cpu.
    pub critical_devices: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GamingTotals {
    pub total: usize,
    pub nintendo: usize,
    pub playstation: usize,
    pub optimal: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertTotals {
    pub count: usize,
    pub critical: usize,
    pub warning: usize,
    /// The five most recent alerts.
    pub recent: Vec<Alert>,
}

/// The composed overview the `summary` command renders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub timestamp: DateTime<Utc>,
    pub bandwidth: BandwidthSummary,
    pub infrastructure: InfrastructureSummary,
    pub gaming: GamingTotals,
    pub alerts: AlertTotals,
}

/// Compose a summary from one fan-out snapshot. Missing resources
/// contribute zeroed sections rather than failing the composition.
pub fn compose_summary(snapshot: &DashboardSnapshot, now: DateTime<Utc>) -> DashboardSummary {
    let latest = snapshot
        .bandwidth
        .as_ref()
        .and_then(|env| env.data.last());
    let upstream_percent = latest.map_or(0.0, |r| r.upstream_percent);

    let bandwidth = BandwidthSummary {
        upstream_gbps: latest.map_or(0.0, |r| r.upstream_gbps),
        downstream_gbps: latest.map_or(0.0, |r| r.downstream_gbps),
        wifi_gbps: latest.map_or(0.0, |r| r.wifi_gbps),
        upstream_percent,
        status: UtilizationStatus::from_percent(upstream_percent),
    };

    let infrastructure = snapshot.infrastructure.as_ref().map_or(
        InfrastructureSummary {
            total_devices: 0,
            active_devices: 0,
            critical_devices: 0,
        },
        |env| {
            let devices = &env.data.devices;
            InfrastructureSummary {
                total_devices: if env.data.total_devices > 0 {
                    env.data.total_devices
                } else {
                    devices.len()
                },
                active_devices: devices
                    .iter()
                    .filter(|d| d.status.as_deref() == Some("active"))
                    .count(),
                critical_devices: devices
                    .iter()
                    .filter(|d| d.cpu.is_some_and(|cpu| cpu > 80.0))
                    .count(),
            }
        },
    );

    let gaming = snapshot.gaming.as_ref().map_or(
        GamingTotals {
            total: 0,
            nintendo: 0,
            playstation: 0,
            optimal: 0,
        },
        |env| {
            env.summary.as_ref().map_or_else(
                || {
                    let devices = &env.data.devices;
                    GamingTotals {
                        total: env.data.total_gaming_devices,
                        nintendo: devices
                            .iter()
                            .filter(|d| d.name.contains("Nintendo") || d.name.contains("Switch"))
                            .count(),
                        playstation: devices
                            .iter()
                            .filter(|d| d.name.contains("PlayStation") || d.name.contains("PS5"))
                            .count(),
                        optimal: devices
                            .iter()
                            .filter(|d| d.status.as_deref() == Some("optimal"))
                            .count(),
                    }
                },
                |s| GamingTotals {
                    total: s.total,
                    nintendo: s.nintendo,
                    playstation: s.playstation,
                    optimal: s.optimal_count,
                },
            )
        },
    );

    let alerts = snapshot.alerts.as_ref().map_or(
        AlertTotals {
            count: 0,
            critical: 0,
            warning: 0,
            recent: Vec::new(),
        },
        |env| {
            let converted = convert::alerts_from_wire(&env.data);
            let skip = converted.len().saturating_sub(5);
            AlertTotals {
                count: if env.count > 0 { env.count } else { env.data.len() },
                critical: env.critical,
                warning: env.warning,
                recent: converted.into_iter().skip(skip).collect(),
            }
        },
    );

    DashboardSummary {
        timestamp: now,
        bandwidth,
        infrastructure,
        gaming,
        alerts,
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn utilization_thresholds_are_exclusive_at_edges() {
        assert_eq!(UtilizationStatus::from_percent(80.0), UtilizationStatus::Medium);
        assert_eq!(UtilizationStatus::from_percent(80.1), UtilizationStatus::High);
        assert_eq!(UtilizationStatus::from_percent(50.0), UtilizationStatus::Normal);
        assert_eq!(UtilizationStatus::from_percent(50.1), UtilizationStatus::Medium);
        assert_eq!(UtilizationStatus::from_percent(0.0), UtilizationStatus::Normal);
    }

    #[test]
    fn empty_snapshot_composes_zeroed_summary() {
        let summary = compose_summary(&DashboardSnapshot::default(), Utc::now());

        assert_eq!(summary.bandwidth.upstream_gbps, 0.0);
        assert_eq!(summary.bandwidth.status, UtilizationStatus::Normal);
        assert_eq!(summary.infrastructure.total_devices, 0);
        assert_eq!(summary.gaming.total, 0);
        assert!(summary.alerts.recent.is_empty());
    }
}
