// ── Per-slice generation gate ──
//
// Refresh cycles can overlap when the store is slow. Each state slice
// carries a gate that admits an update only if no newer cycle has
// already written it, so a stale fetch can never overwrite fresh data.

use std::sync::atomic::{AtomicU64, Ordering};

pub(crate) struct SliceGate {
    applied: AtomicU64,
}

impl SliceGate {
    pub(crate) fn new() -> Self {
        Self {
            applied: AtomicU64::new(0),
        }
    }

    /// Try to admit an update from the given cycle generation. Returns
    /// `false` when a newer generation has already been applied.
    pub(crate) fn admit(&self, generation: u64) -> bool {
        self.applied.fetch_max(generation, Ordering::AcqRel) <= generation
    }
}
