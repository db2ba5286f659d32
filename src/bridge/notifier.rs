// Completion notifier - the single exit point for dialog outcomes
//
// Every outcome leaves the bridge through here: first the authoritative
// cross-boundary channel, then the observer hook if one is registered. The
// notifier also keeps the ledger of outstanding handles, so a handle can be
// reported at most once no matter how many paths try to complete it.

use crate::bridge::observer::ObserverSlot;
use crate::metrics::BridgeMetrics;
use crate::models::{DialogHandle, ErrorCode, Outcome};
use std::collections::HashSet;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex};

/// Cross-boundary channel consumed by the core
pub trait CompletionChannel: Send + Sync + 'static {
    fn on_dialog_completed(&self, handle: DialogHandle, button_id: i64, cancelled: bool);
    fn on_dialog_error(&self, handle: DialogHandle, error_code: i32);
}

/// Delivers outcomes to the core and the observer, at most once per handle
#[derive(Clone)]
pub struct CompletionNotifier {
    channel: Arc<dyn CompletionChannel>,
    observer: ObserverSlot,
    outstanding: Arc<Mutex<HashSet<DialogHandle>>>,
    metrics: Arc<BridgeMetrics>,
}

impl CompletionNotifier {
    pub fn new(
        channel: Arc<dyn CompletionChannel>,
        observer: ObserverSlot,
        metrics: Arc<BridgeMetrics>,
    ) -> Self {
        Self {
            channel,
            observer,
            outstanding: Arc::new(Mutex::new(HashSet::new())),
            metrics,
        }
    }

    /// Same ledger and metrics, different observer slot
    pub fn with_observer(&self, observer: ObserverSlot) -> Self {
        Self {
            observer,
            ..self.clone()
        }
    }

    /// Same ledger and observer slot, different metrics sink
    pub fn with_metrics(&self, metrics: Arc<BridgeMetrics>) -> Self {
        Self {
            metrics,
            ..self.clone()
        }
    }

    /// Mark `handle` outstanding. Returns false if it already is.
    pub(crate) fn begin(&self, handle: DialogHandle) -> bool {
        self.outstanding
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(handle)
    }

    pub fn is_outstanding(&self, handle: DialogHandle) -> bool {
        self.outstanding
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&handle)
    }

    pub fn outstanding_count(&self) -> usize {
        self.outstanding
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn observer(&self) -> &ObserverSlot {
        &self.observer
    }

    fn finish(&self, handle: DialogHandle) -> bool {
        self.outstanding
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&handle)
    }

    /// Report a choice or dismissal. Returns false if `handle` was not outstanding.
    pub fn notify_completed(&self, handle: DialogHandle, button_id: i64, cancelled: bool) -> bool {
        self.deliver(handle, Outcome::from_completion(button_id, cancelled))
    }

    /// Report a failure. Returns false if `handle` was not outstanding.
    pub fn notify_error(&self, handle: DialogHandle, error: ErrorCode) -> bool {
        self.deliver(handle, Outcome::Failed { error })
    }

    pub fn deliver(&self, handle: DialogHandle, outcome: Outcome) -> bool {
        if !self.finish(handle) {
            tracing::warn!(%handle, %outcome, "Dropping outcome for handle that is not outstanding");
            return false;
        }

        tracing::debug!(%handle, %outcome, "Delivering dialog outcome");
        self.metrics.record_outcome(&outcome);

        match outcome {
            Outcome::Chosen { button_id } => {
                self.channel.on_dialog_completed(handle, button_id, false);
            }
            Outcome::Cancelled { button_id } => {
                self.channel.on_dialog_completed(handle, button_id, true);
            }
            Outcome::Failed { error } => {
                self.channel.on_dialog_error(handle, error.code());
            }
        }

        self.notify_observer(handle, &outcome);
        true
    }

    fn notify_observer(&self, handle: DialogHandle, outcome: &Outcome) {
        let Some(observer) = self.observer.current() else {
            return;
        };

        let outcome = *outcome;
        let result = catch_unwind(AssertUnwindSafe(|| match outcome {
            Outcome::Chosen { button_id } => observer.on_completed(button_id, false),
            Outcome::Cancelled { button_id } => observer.on_completed(button_id, true),
            Outcome::Failed { error } => observer.on_error(error.code()),
        }));

        match result {
            Ok(()) => self.metrics.record_observer_delivery(),
            Err(_) => {
                self.metrics.record_observer_panic();
                tracing::error!(%handle, "Dialog observer panicked");
            }
        }
    }
}
