// ── WiFi band distribution ──

use serde::{Deserialize, Serialize};

/// Share of traffic on one WiFi band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiBand {
    /// Band label ("5 GHz", "2.4 GHz").
    pub band: String,
    /// Share in percent.
    pub percent: f64,
}
