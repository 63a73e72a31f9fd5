// ── Bounded topic containers ──
//
// Explicit store abstractions replacing ad hoc per-topic arrays. Every
// mutation rebuilds the snapshot that subscribers receive through a
// `watch` channel, so readers are wait-free and never observe a
// half-applied update.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

/// A bounded append-only buffer with drop-oldest eviction.
///
/// The eviction policy is the invariant: once `len == capacity`, every
/// append removes the oldest element first, so the buffer never exceeds
/// its capacity and ordering is strictly FIFO.
pub struct RingBuffer<T: Clone + Send + Sync + 'static> {
    capacity: usize,
    inner: Mutex<VecDeque<T>>,
    snapshot: watch::Sender<Arc<Vec<T>>>,
}

impl<T: Clone + Send + Sync + 'static> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be positive");
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            capacity,
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            snapshot,
        }
    }

    /// Append one element, evicting the oldest when at capacity.
    pub fn append(&self, item: T) {
        let mut inner = self.inner.lock().expect("ring lock poisoned");
        if inner.len() == self.capacity {
            inner.pop_front();
        }
        inner.push_back(item);
        let values: Vec<T> = inner.iter().cloned().collect();
        drop(inner);
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    /// Replace the whole buffer. Input longer than the capacity keeps the
    /// most recent (trailing) elements.
    pub fn replace_all(&self, items: Vec<T>) {
        let mut inner = self.inner.lock().expect("ring lock poisoned");
        inner.clear();
        let skip = items.len().saturating_sub(self.capacity);
        inner.extend(items.into_iter().skip(skip));
        let values: Vec<T> = inner.iter().cloned().collect();
        drop(inner);
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.snapshot.subscribe()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("ring lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// A full-replace slot for topics that store only their latest snapshot.
pub struct LatestSlot<T: Clone + Send + Sync + 'static> {
    value: watch::Sender<Arc<T>>,
}

impl<T: Clone + Send + Sync + Default + 'static> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + 'static> LatestSlot<T> {
    pub fn new(initial: T) -> Self {
        let (value, _) = watch::channel(Arc::new(initial));
        Self { value }
    }

    pub fn set(&self, next: T) {
        self.value.send_modify(|v| *v = Arc::new(next));
    }

    pub fn get(&self) -> Arc<T> {
        self.value.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<T>> {
        self.value.subscribe()
    }
}
