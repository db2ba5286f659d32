// Pending dialog registry - the core side of the completion channel
//
// Hands out unique handles, parks a oneshot waiter per handle, and resolves
// each waiter at most once when the bridge reports back.

use crate::bridge::CompletionChannel;
use crate::models::{DialogHandle, Outcome};
use indexmap::IndexMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;

/// Outstanding dialogs waiting for their outcome
///
/// Implements [`CompletionChannel`], so it can be handed straight to a
/// [`DialogBridge`](crate::bridge::DialogBridge) as the core endpoint.
/// Outstanding handles are kept in request order.
pub struct PendingDialogs {
    next_handle: AtomicU64,
    waiters: Mutex<IndexMap<DialogHandle, oneshot::Sender<Outcome>>>,
}

impl PendingDialogs {
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            waiters: Mutex::new(IndexMap::new()),
        }
    }

    /// Allocate a fresh handle and register its waiter
    pub fn allocate(&self) -> (DialogHandle, oneshot::Receiver<Outcome>) {
        loop {
            let handle = DialogHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
            if let Some(rx) = self.register(handle) {
                return (handle, rx);
            }
        }
    }

    /// Register a waiter for a caller-chosen handle. `None` if already registered.
    pub fn register(&self, handle: DialogHandle) -> Option<oneshot::Receiver<Outcome>> {
        let mut waiters = self.waiters.lock().unwrap_or_else(|e| e.into_inner());
        if waiters.contains_key(&handle) {
            return None;
        }

        let (tx, rx) = oneshot::channel();
        waiters.insert(handle, tx);
        Some(rx)
    }

    /// Drop the waiter for `handle` without resolving it
    pub fn forget(&self, handle: DialogHandle) -> bool {
        self.waiters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .shift_remove(&handle)
            .is_some()
    }

    /// Handles still waiting, oldest first
    pub fn outstanding(&self) -> Vec<DialogHandle> {
        self.waiters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.waiters.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resolve(&self, handle: DialogHandle, outcome: Outcome) {
        let waiter = self
            .waiters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .shift_remove(&handle);

        match waiter {
            Some(tx) => {
                if tx.send(outcome).is_err() {
                    tracing::debug!(%handle, "Outcome waiter was dropped before delivery");
                }
            }
            None => {
                tracing::warn!(%handle, %outcome, "Outcome for unknown or already resolved handle");
            }
        }
    }
}

impl Default for PendingDialogs {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionChannel for PendingDialogs {
    fn on_dialog_completed(&self, handle: DialogHandle, button_id: i64, cancelled: bool) {
        self.resolve(handle, Outcome::from_completion(button_id, cancelled));
    }

    fn on_dialog_error(&self, handle: DialogHandle, error_code: i32) {
        self.resolve(handle, Outcome::from_error(error_code));
    }
}
