// ── Bounded, reactive per-topic storage ──

mod dashboard;
mod ring;

pub use dashboard::DashboardStore;
pub use ring::{LatestSlot, RingBuffer};
