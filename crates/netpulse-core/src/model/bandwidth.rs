// ── Bandwidth history ──

use serde::{Deserialize, Serialize};

/// Fixed length of the rolling bandwidth window: six samples, five
/// minutes apart, ending "now".
pub const BANDWIDTH_WINDOW: usize = 6;

/// One point of the bandwidth chart. Values in Gbps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandwidthSample {
    /// Display label, `HH:MM`.
    pub time: String,
    pub upstream: f64,
    pub downstream: f64,
    pub wifi: f64,
}
