// Presenter contract - what the bridge needs from a UI toolkit
//
// A Presenter turns a DialogSurface into something on screen and reports the
// user's answer through the CompletionSource it is handed. The bridge only
// relies on that return contract; drawing and styling stay in the presenter.

use crate::bridge::notifier::CompletionNotifier;
use crate::error::PresenterError;
use crate::metrics::BridgeMetrics;
use crate::models::{DialogHandle, ErrorCode, Outcome, Request, SlotRole, SlotSignal, SlotTable};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Realizes dialogs on the UI-affine context
///
/// `present` is only ever called from a job running on the bridge's
/// [`AffineExecutor`](crate::bridge::AffineExecutor).
pub trait Presenter: Send + Sync + 'static {
    /// The window, activity or other object dialogs are shown against
    type Host: Send + Sync + 'static;

    /// Whether `host` can still present. Checked on the caller thread before
    /// any work is posted.
    fn is_live(&self, host: &Self::Host) -> bool {
        let _ = host;
        true
    }

    /// Build and show `surface`, then report through `completion`.
    ///
    /// The presenter may fire `completion` before returning (blocking
    /// toolkits) or later from a toolkit callback. Returning `Err` or
    /// panicking reports a platform failure unless a signal already fired.
    fn present(
        &self,
        host: &Self::Host,
        surface: &DialogSurface,
        completion: CompletionSource,
    ) -> Result<(), PresenterError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceButton {
    pub role: SlotRole,
    pub label: String,
}

/// Toolkit-independent description of what to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSurface {
    /// `None` when the request had no title or an empty one
    pub title: Option<String>,
    pub message: String,
    /// Only the occupied slots, in slot order
    pub buttons: Vec<SurfaceButton>,
    pub cancellable: bool,
}

impl DialogSurface {
    pub fn from_request(request: &Request, slots: &SlotTable) -> Self {
        Self {
            title: request.title().map(str::to_string),
            message: request.message().to_string(),
            buttons: slots
                .iter()
                .map(|slot| SurfaceButton {
                    role: slot.role,
                    label: slot.label.clone(),
                })
                .collect(),
            cancellable: request.is_cancellable(),
        }
    }

    pub fn button(&self, role: SlotRole) -> Option<&SurfaceButton> {
        self.buttons.iter().find(|b| b.role == role)
    }
}

struct CompletionState {
    handle: DialogHandle,
    slots: SlotTable,
    cancel_button_id: i64,
    fired: AtomicBool,
    notifier: CompletionNotifier,
    metrics: Arc<BridgeMetrics>,
}

impl Drop for CompletionState {
    fn drop(&mut self) {
        if !self.fired.swap(true, Ordering::AcqRel) {
            tracing::warn!(handle = %self.handle, "Completion source dropped without an outcome");
            self.notifier
                .notify_error(self.handle, ErrorCode::PlatformFailure);
        }
    }
}

/// The one completion path of a presented dialog.
///
/// Clones share state: wire one clone into the button callback and another into
/// the dismissal callback. The first signal wins and later ones are ignored.
/// Dropping every clone without a signal reports a platform failure.
#[derive(Clone)]
pub struct CompletionSource {
    state: Arc<CompletionState>,
}

impl CompletionSource {
    pub(crate) fn new(
        handle: DialogHandle,
        slots: SlotTable,
        cancel_button_id: i64,
        notifier: CompletionNotifier,
        metrics: Arc<BridgeMetrics>,
    ) -> Self {
        Self {
            state: Arc::new(CompletionState {
                handle,
                slots,
                cancel_button_id,
                fired: AtomicBool::new(false),
                notifier,
                metrics,
            }),
        }
    }

    pub fn handle(&self) -> DialogHandle {
        self.state.handle
    }

    pub fn slots(&self) -> &SlotTable {
        &self.state.slots
    }

    pub fn is_completed(&self) -> bool {
        self.state.fired.load(Ordering::Acquire)
    }

    /// The platform reported a button press
    ///
    /// Signals that map to no slot resolve like a dismissal.
    pub fn select(&self, signal: SlotSignal) -> bool {
        let outcome = match self.state.slots.map_signal(signal) {
            Some(index) => Outcome::Chosen {
                button_id: self.state.slots.resolve_id(index),
            },
            None => {
                tracing::debug!(handle = %self.state.handle, ?signal, "Signal maps to no slot");
                Outcome::Cancelled {
                    button_id: self.state.cancel_button_id,
                }
            }
        };
        self.fire(outcome)
    }

    /// The dialog was dismissed without a choice
    pub fn dismiss(&self) -> bool {
        self.fire(Outcome::Cancelled {
            button_id: self.state.cancel_button_id,
        })
    }

    /// The surface failed; reported to the core as a platform failure
    ///
    /// A failure after the dialog already completed is only logged at debug.
    pub fn fail(&self, error: impl std::fmt::Display) -> bool {
        if self.is_completed() {
            tracing::debug!(handle = %self.state.handle, "Ignoring failure after completion: {}", error);
            return false;
        }

        tracing::error!(handle = %self.state.handle, "Dialog presentation failed: {}", error);
        self.fire(Outcome::Failed {
            error: ErrorCode::PlatformFailure,
        })
    }

    fn fire(&self, outcome: Outcome) -> bool {
        if self.state.fired.swap(true, Ordering::AcqRel) {
            self.state.metrics.record_duplicate_signal();
            tracing::debug!(handle = %self.state.handle, %outcome, "Ignoring signal after completion");
            return false;
        }

        self.state.notifier.deliver(self.state.handle, outcome)
    }
}

impl std::fmt::Debug for CompletionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSource")
            .field("handle", &self.state.handle)
            .field("completed", &self.is_completed())
            .finish()
    }
}
