// ── Host reconciliation ──
//
// Merges the infrastructure and gaming device feeds into one host list.
// Infrastructure entries are inserted first; a gaming entry is appended
// only if no host with its ip exists yet. First writer wins — that is
// the sole dedup rule.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use netpulse_api::types::{WireGamingDevice, WireInfraDevice};

use crate::model::{HostStatus, HostType, ScannedHost};

fn host_type_from_infra(raw: Option<&str>) -> HostType {
    let Some(normalized) = raw.map(|t| t.to_lowercase().replace(' ', "_")) else {
        return HostType::Unknown;
    };
    // Infra feeds say "Gateway"; the host schema calls that a router.
    if normalized == "gateway" {
        return HostType::Router;
    }
    normalized.parse::<HostType>().unwrap_or_default()
}

fn status_from_infra(raw: Option<&str>) -> HostStatus {
    match raw {
        Some("active") => HostStatus::Online,
        Some("warning") => HostStatus::Warning,
        _ => HostStatus::Offline,
    }
}

fn status_from_gaming(raw: Option<&str>) -> HostStatus {
    match raw {
        Some("optimal") => HostStatus::Online,
        Some("warning") => HostStatus::Warning,
        _ => HostStatus::Offline,
    }
}

fn vendor_from_name(name: &str) -> &'static str {
    if name.contains("Nintendo") {
        "Nintendo"
    } else if name.contains("PlayStation") {
        "Sony"
    } else {
        "Unknown"
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn round_pct(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

fn infra_host(device: &WireInfraDevice, now: DateTime<Utc>) -> ScannedHost {
    ScannedHost {
        ip: device.ip.clone().unwrap_or_else(|| device.id.clone()),
        name: device.name.clone().unwrap_or_else(|| device.id.clone()),
        host_type: host_type_from_infra(device.device_type.as_deref()),
        vendor: device.vendor.clone().unwrap_or_else(|| "Unknown".into()),
        status: status_from_infra(device.status.as_deref()),
        last_seen: now,
        ping: device.ping.map(round_pct),
        interfaces: device.ports,
        cpu: device.cpu.map(round_pct),
        memory: device.memory.map(round_pct),
    }
}

fn gaming_host(device: &WireGamingDevice, ip: String, now: DateTime<Utc>) -> ScannedHost {
    let name = if device.name.is_empty() {
        ip.clone()
    } else {
        device.name.clone()
    };
    ScannedHost {
        vendor: vendor_from_name(&name).into(),
        ip,
        name,
        host_type: HostType::Unknown,
        status: status_from_gaming(device.status.as_deref()),
        last_seen: now,
        ping: device.ping.map(round_pct),
        interfaces: None,
        cpu: None,
        memory: None,
    }
}

/// Build the reconciled host list for one scan cycle.
///
/// Output preserves insertion order: all infrastructure hosts first,
/// then gaming hosts whose ip was not already taken. Gaming devices
/// without an ip cannot be keyed and are skipped.
pub fn merge_hosts(
    infra: &[WireInfraDevice],
    gaming: &[WireGamingDevice],
    now: DateTime<Utc>,
) -> Vec<ScannedHost> {
    let mut by_ip: IndexMap<String, ScannedHost> = IndexMap::new();

    for device in infra {
        let host = infra_host(device, now);
        by_ip.entry(host.ip.clone()).or_insert(host);
    }

    for device in gaming {
        let Some(ip) = device.ip.clone() else {
            continue;
        };
        if !by_ip.contains_key(&ip) {
            by_ip.insert(ip.clone(), gaming_host(device, ip, now));
        }
    }

    by_ip.into_values().collect()
}

// ── Tests ───────────────────────────────────────────────────────────
