// ── Wire types for the telemetry store endpoints ──
//
// One envelope per topic, matching the JSON the store actually emits.
// Fields the store may omit are Option or defaulted so a partial payload
// never fails the whole response — malformed *structure* still fails
// closed at the deserialization boundary.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

// ── Bandwidth topic ──────────────────────────────────────────────────

/// One stored bandwidth measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandwidthRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub upstream_gbps: f64,
    #[serde(default)]
    pub downstream_gbps: f64,
    #[serde(default)]
    pub wifi_gbps: f64,
    #[serde(default)]
    pub upstream_percent: f64,
    #[serde(default)]
    pub source: Option<String>,
}

/// `GET /bandwidth` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct BandwidthEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<BandwidthRecord>,
    #[serde(default)]
    pub count: usize,
    #[serde(default, rename = "lastUpdate")]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Payload accepted by `POST /bandwidth`.
#[derive(Debug, Clone, Serialize)]
pub struct BandwidthPush {
    pub upstream_gbps: f64,
    pub downstream_gbps: f64,
    pub wifi_gbps: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

// ── Infrastructure topic ─────────────────────────────────────────────

/// One infrastructure device as the store reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireInfraDevice {
    pub id: String,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub cpu: Option<f64>,
    #[serde(default)]
    pub memory: Option<f64>,
    #[serde(default)]
    pub ports: Option<u32>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub ping: Option<f64>,
    #[serde(default)]
    pub uptime: Option<u64>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

/// The infrastructure topic stores a single latest snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfrastructurePayload {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub devices: Vec<WireInfraDevice>,
    #[serde(default)]
    pub total_devices: usize,
}

/// `GET /network-infrastructure` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct InfrastructureEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: InfrastructurePayload,
    #[serde(default, rename = "lastUpdate")]
    pub last_update: Option<DateTime<Utc>>,
}

// ── Gaming devices topic ─────────────────────────────────────────────

/// One gaming device (or pre-aggregated cluster) as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireGamingDevice {
    pub name: String,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub ping: Option<f64>,
    #[serde(default, rename = "packetLoss")]
    pub packet_loss: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GamingPayload {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub devices: Vec<WireGamingDevice>,
    #[serde(default)]
    pub total_gaming_devices: usize,
}

/// Platform breakdown computed server-side on every GET.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamingSummary {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub nintendo: usize,
    #[serde(default)]
    pub playstation: usize,
    #[serde(default, rename = "optimalCount")]
    pub optimal_count: usize,
}

/// `GET /gaming-devices` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GamingEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: GamingPayload,
    #[serde(default)]
    pub summary: Option<GamingSummary>,
    #[serde(default, rename = "lastUpdate")]
    pub last_update: Option<DateTime<Utc>>,
}

// ── Alerts topic ─────────────────────────────────────────────────────

/// One stored alert. Ids generated by the store are UUID strings, but
/// scanner agents may post plain integers — both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireAlert {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// `GET /alerts` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<WireAlert>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub critical: usize,
    #[serde(default)]
    pub warning: usize,
}

// ── Hosts topic ──────────────────────────────────────────────────────

/// One scanned host as stored by a scanner agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireHost {
    pub ip: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub host_type: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "lastSeen")]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ping: Option<u32>,
    #[serde(default)]
    pub interfaces: Option<u32>,
    #[serde(default)]
    pub cpu: Option<u32>,
    #[serde(default)]
    pub memory: Option<u32>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostsPayload {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub hosts: Vec<WireHost>,
    #[serde(default)]
    pub total_hosts: usize,
    #[serde(default)]
    pub online_count: usize,
    #[serde(default)]
    pub offline_count: usize,
    #[serde(default)]
    pub warning_count: usize,
}

/// `GET /hosts` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct HostsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: HostsPayload,
    #[serde(default, rename = "lastUpdate")]
    pub last_update: Option<DateTime<Utc>>,
}

/// Server-side filters understood by `GET /hosts`.
#[derive(Debug, Clone, Default)]
pub struct HostQuery {
    pub status: Option<String>,
    pub host_type: Option<String>,
    pub source: Option<String>,
    pub search: Option<String>,
}

impl HostQuery {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref s) = self.status {
            params.push(("status", s.clone()));
        }
        if let Some(ref t) = self.host_type {
            params.push(("type", t.clone()));
        }
        if let Some(ref s) = self.source {
            params.push(("source", s.clone()));
        }
        if let Some(ref s) = self.search {
            params.push(("search", s.clone()));
        }
        params
    }
}

// ── Write acknowledgment ─────────────────────────────────────────────

/// Generic `POST`/`DELETE` acknowledgment.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Accept a JSON string or number and normalize to String.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Str(String),
        Num(i64),
    }

    match StringOrNumber::deserialize(deserializer) {
        Ok(StringOrNumber::Str(s)) => Ok(s),
        Ok(StringOrNumber::Num(n)) => Ok(n.to_string()),
        Err(_) => Err(de::Error::custom("alert id must be a string or number")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn alert_id_accepts_string_and_number() {
        let a: WireAlert =
            serde_json::from_str(r#"{"id":"abc-123","device":"GW","level":"info","msg":"x","time":"now"}"#)
                .unwrap();
        assert_eq!(a.id, "abc-123");

        let b: WireAlert =
            serde_json::from_str(r#"{"id":7,"device":"GW","level":"info","msg":"x","time":"now"}"#)
                .unwrap();
        assert_eq!(b.id, "7");
    }

    #[test]
    fn gaming_device_packet_loss_uses_camel_case() {
        let d: WireGamingDevice =
            serde_json::from_str(r#"{"name":"Nintendo Switch 2 Cluster","packetLoss":0.15}"#)
                .unwrap();
        assert_eq!(d.packet_loss, Some(0.15));
    }

    #[test]
    fn infrastructure_payload_defaults_when_store_is_empty() {
        let env: InfrastructureEnvelope =
            serde_json::from_str(r#"{"success":true,"data":{"devices":[],"total_devices":0},"lastUpdate":null}"#)
                .unwrap();
        assert!(env.success);
        assert!(env.data.devices.is_empty());
    }
}
