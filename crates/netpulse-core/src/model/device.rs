// ── Device entities: gaming clusters and network infrastructure ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Utilization clamp applied to infrastructure cpu/memory on every
/// synthetic tick.
pub const UTILIZATION_FLOOR: f64 = 10.0;
pub const UTILIZATION_CEIL: f64 = 95.0;

/// Health of an aggregated gaming-device cluster.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ClusterStatus {
    #[default]
    Optimal,
    Warning,
    Critical,
}

/// A group of same-platform gaming devices summarized by mean latency.
///
/// `count` is an aggregate carried from the source — it is not re-derived
/// on perturbation ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCluster {
    pub name: String,
    pub count: u32,
    /// Mean ping in ms, rounded to the nearest integer.
    pub ping: f64,
    /// Mean packet loss in percent, two decimals.
    pub packet_loss: f64,
    pub status: ClusterStatus,
}

/// Infrastructure device categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum InfraDeviceType {
    Gateway,
    Switch,
    #[serde(rename = "Access Point")]
    #[strum(serialize = "Access Point")]
    AccessPoint,
}

/// Operational state of an infrastructure device. Independent of
/// cpu/memory — never auto-derived from utilization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InfraStatus {
    Active,
    #[default]
    Inactive,
    Warning,
}

/// One gateway, switch, or access point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfraDevice {
    pub id: String,
    pub device_type: InfraDeviceType,
    pub status: InfraStatus,
    /// Percent, clamped to [10, 95].
    pub cpu: f64,
    /// Percent, clamped to [10, 95].
    pub memory: f64,
    pub ports: u32,
}
