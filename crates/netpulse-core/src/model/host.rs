// ── Scanned hosts ──
//
// The unified host schema the reconciliation engine produces. `ip` is the
// identity: the merge discards any later entry whose ip already exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Host categories as reported by scanner agents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HostType {
    Router,
    Switch,
    AccessPoint,
    Server,
    Storage,
    Printer,
    #[default]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HostStatus {
    Online,
    #[default]
    Offline,
    Warning,
}

/// One reconciled host. Fully replaced (never patched) on each scan cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannedHost {
    /// Dedup key — unique within one host list.
    pub ip: String,
    pub name: String,
    pub host_type: HostType,
    pub vendor: String,
    pub status: HostStatus,
    pub last_seen: DateTime<Utc>,
    /// Latency in ms; absent for hosts that never answered a probe.
    pub ping: Option<u32>,
    pub interfaces: Option<u32>,
    pub cpu: Option<u32>,
    pub memory: Option<u32>,
}
