// ── Alerts ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Bounded alert store size — oldest entries are pruned beyond this.
pub const MAX_ALERTS: usize = 50;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AlertLevel {
    Critical,
    Warning,
    #[default]
    Info,
}

/// One dashboard alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Store-assigned id (UUID string, or a plain number from older agents).
    pub id: String,
    /// Device or subsystem the alert concerns.
    pub device: String,
    pub level: AlertLevel,
    pub msg: String,
    /// Human-readable relative time label ("now", "1 min").
    pub time: String,
}
