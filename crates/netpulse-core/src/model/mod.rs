// ── Unified domain model ──
//
// Every type in this module is the canonical in-memory representation of
// a dashboard entity. The wire shapes in netpulse-api are normalized into
// these through `crate::convert`; presentation surfaces consume only
// these types.

pub mod alert;
pub mod bandwidth;
pub mod device;
pub mod host;
pub mod wifi;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use netpulse_core::model::*` gives you everything.

pub use alert::{Alert, AlertLevel, MAX_ALERTS};
pub use bandwidth::{BANDWIDTH_WINDOW, BandwidthSample};
pub use device::{
    ClusterStatus, DeviceCluster, InfraDevice, InfraDeviceType, InfraStatus, UTILIZATION_CEIL,
    UTILIZATION_FLOOR,
};
pub use host::{HostStatus, HostType, ScannedHost};
pub use wifi::WifiBand;
