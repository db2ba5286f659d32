// Observer hook - secondary listener for dialog outcomes
//
// Lets a test harness watch every outcome without replacing the real
// completion channel. The slot is shared between the harness (which sets and
// clears it) and the affine context (which reads it on every delivery).

use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Receives a copy of every outcome the bridge reports
pub trait DialogObserver: Send + Sync + 'static {
    fn on_completed(&self, button_id: i64, cancelled: bool);
    fn on_error(&self, error_code: i32);
}

/// Injectable holder for the current observer.
///
/// Latest registration wins; an empty slot means deliveries skip the observer.
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct ObserverSlot {
    inner: Arc<RwLock<Option<Arc<dyn DialogObserver>>>>,
}

impl ObserverSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, observer: Arc<dyn DialogObserver>) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Some(observer);
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Snapshot of the registered observer; the lock is released on return
    pub fn current(&self) -> Option<Arc<dyn DialogObserver>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_set(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

impl std::fmt::Debug for ObserverSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSlot")
            .field("set", &self.is_set())
            .finish()
    }
}

/// What a [`BroadcastObserver`] saw
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Observation {
    Completed { button_id: i64, cancelled: bool },
    Error { error_code: i32 },
}

/// Observer that republishes outcomes on a tokio broadcast channel
///
/// Useful for async tests that want to `timeout(rx.recv())` on an outcome.
pub struct BroadcastObserver {
    tx: broadcast::Sender<Observation>,
}

impl BroadcastObserver {
    /// Create an observer with a buffer of `capacity` observations
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Observation> {
        self.tx.subscribe()
    }

    fn publish(&self, observation: Observation) {
        // No subscribers is fine; the observation is simply dropped
        if self.tx.send(observation).is_err() {
            tracing::trace!("Observation dropped - no subscribers");
        }
    }
}

impl DialogObserver for BroadcastObserver {
    fn on_completed(&self, button_id: i64, cancelled: bool) {
        self.publish(Observation::Completed {
            button_id,
            cancelled,
        });
    }

    fn on_error(&self, error_code: i32) {
        self.publish(Observation::Error { error_code });
    }
}
