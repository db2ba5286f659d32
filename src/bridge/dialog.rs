// DialogBridge - correlates dialog requests with exactly one outcome
//
// Callers on any thread hand the bridge a Request and a presentation host.
// The bridge checks preconditions synchronously, then posts a single job onto
// the affine executor that builds the surface and hands the presenter one
// CompletionSource. Whatever happens next (a choice, a dismissal, an error, a
// panic or nothing at all) ends in exactly one delivery per handle.

use crate::bridge::executor::{AffineExecutor, Job};
use crate::bridge::notifier::{CompletionChannel, CompletionNotifier};
use crate::bridge::observer::{DialogObserver, ObserverSlot};
use crate::bridge::presenter::{CompletionSource, DialogSurface, Presenter};
use crate::error::BridgeError;
use crate::metrics::BridgeMetrics;
use crate::models::{
    BridgeSettings, ButtonOverflowPolicy, DialogHandle, ErrorCode, MAX_SLOTS, Request, SlotTable,
};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// Bridge between the core and a UI-affine [`Presenter`]
///
/// Cheap to clone; clones share the presenter, executor, outstanding-handle
/// ledger and observer slot.
///
/// # Example
/// ```ignore
/// let ui = Arc::new(UiThread::spawn("dialog-ui", 100)?);
/// let bridge = DialogBridge::new(presenter, ui, channel, &BridgeSettings::default());
///
/// let request = Request::new(DialogHandle(1), "Overwrite file?")
///     .with_button(Button::new("Overwrite", 10))
///     .with_button(Button::cancel("Keep", 20));
/// bridge.show(request, Some(host))?;
/// // channel.on_dialog_completed(DialogHandle(1), 10, false) arrives later
/// ```
pub struct DialogBridge<P: Presenter> {
    presenter: Arc<P>,
    executor: Arc<dyn AffineExecutor>,
    channel: Arc<dyn CompletionChannel>,
    notifier: CompletionNotifier,
    overflow: ButtonOverflowPolicy,
    metrics: Arc<BridgeMetrics>,
}

// Manual Clone implementation to avoid requiring P: Clone
impl<P: Presenter> Clone for DialogBridge<P> {
    fn clone(&self) -> Self {
        Self {
            presenter: self.presenter.clone(),
            executor: self.executor.clone(),
            channel: self.channel.clone(),
            notifier: self.notifier.clone(),
            overflow: self.overflow,
            metrics: self.metrics.clone(),
        }
    }
}

impl<P: Presenter> DialogBridge<P> {
    /// Create a bridge
    ///
    /// # Arguments
    /// * `presenter` - Realizes surfaces on the affine context
    /// * `executor` - The affine context presentation jobs are posted to
    /// * `channel` - Authoritative outcome channel to the core
    /// * `settings` - Button overflow policy
    pub fn new(
        presenter: Arc<P>,
        executor: Arc<dyn AffineExecutor>,
        channel: Arc<dyn CompletionChannel>,
        settings: &BridgeSettings,
    ) -> Self {
        let metrics = Arc::new(BridgeMetrics::new());
        let notifier = CompletionNotifier::new(channel.clone(), ObserverSlot::new(), metrics.clone());

        Self {
            presenter,
            executor,
            channel,
            notifier,
            overflow: settings.button_overflow,
            metrics,
        }
    }

    /// Share an externally owned observer slot, e.g. one held by a test harness
    ///
    /// The outstanding-handle ledger stays shared with every clone.
    pub fn with_observer_slot(self, observer: ObserverSlot) -> Self {
        let notifier = self.notifier.with_observer(observer);
        Self { notifier, ..self }
    }

    /// Record into an externally owned metrics instance
    pub fn with_metrics(self, metrics: Arc<BridgeMetrics>) -> Self {
        let notifier = self.notifier.with_metrics(metrics.clone());
        Self {
            notifier,
            metrics,
            ..self
        }
    }

    pub fn set_observer(&self, observer: Arc<dyn DialogObserver>) {
        self.notifier.observer().set(observer);
    }

    pub fn clear_observer(&self) {
        self.notifier.observer().clear();
    }

    pub fn metrics(&self) -> &Arc<BridgeMetrics> {
        &self.metrics
    }

    pub fn presenter(&self) -> &Arc<P> {
        &self.presenter
    }

    pub fn is_outstanding(&self, handle: DialogHandle) -> bool {
        self.notifier.is_outstanding(handle)
    }

    pub fn outstanding_count(&self) -> usize {
        self.notifier.outstanding_count()
    }

    /// Request a dialog. Never blocks; the outcome arrives on the channel.
    ///
    /// An absent or dead `host` fails the request with a platform failure
    /// before anything is posted, so that error is observable as soon as this
    /// returns. There is no way to revoke a request once accepted.
    ///
    /// # Errors
    /// [`BridgeError::DuplicateHandle`] if `request.handle()` is still
    /// outstanding. Nothing is delivered for the rejected call.
    pub fn show(&self, request: Request, host: Option<Arc<P::Host>>) -> Result<(), BridgeError> {
        let handle = request.handle();

        if !self.notifier.begin(handle) {
            tracing::warn!(%handle, "Rejecting request for a handle that is still outstanding");
            return Err(BridgeError::DuplicateHandle(handle));
        }
        self.metrics.record_requested();

        let Some(host) = host.filter(|h| self.presenter.is_live(h)) else {
            tracing::warn!(%handle, "Presentation host unavailable");
            self.notifier.notify_error(handle, ErrorCode::PlatformFailure);
            return Ok(());
        };

        if request.exceeds_slots() {
            match self.overflow {
                ButtonOverflowPolicy::Truncate => {
                    tracing::warn!(
                        %handle,
                        supplied = request.buttons().len(),
                        "Only the first {} buttons can be presented",
                        MAX_SLOTS
                    );
                }
                ButtonOverflowPolicy::Reject => {
                    tracing::warn!(
                        %handle,
                        supplied = request.buttons().len(),
                        "Rejecting request with more than {} buttons",
                        MAX_SLOTS
                    );
                    self.notifier.notify_error(handle, ErrorCode::PlatformFailure);
                    return Ok(());
                }
            }
        }

        let completion = CompletionSource::new(
            handle,
            SlotTable::from_buttons(request.buttons()),
            request.cancel_button_id(),
            self.notifier.clone(),
            self.metrics.clone(),
        );

        let presenter = self.presenter.clone();
        let job_completion = completion.clone();
        let job: Job = Box::new(move || {
            present_on_affine(presenter.as_ref(), host.as_ref(), &request, job_completion);
        });

        tracing::debug!(%handle, "Posting dialog to affine context");
        if let Err(e) = self.executor.post(job) {
            self.metrics.record_executor_rejection();
            completion.fail(e);
        }

        Ok(())
    }
}

/// The affine half of `show`: build, present, and normalize every failure
fn present_on_affine<P: Presenter>(
    presenter: &P,
    host: &P::Host,
    request: &Request,
    completion: CompletionSource,
) {
    let handle = completion.handle();
    let surface = DialogSurface::from_request(request, completion.slots());
    tracing::debug!(%handle, buttons = surface.buttons.len(), "Presenting dialog");

    let guard = completion.clone();
    match catch_unwind(AssertUnwindSafe(|| presenter.present(host, &surface, completion))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            guard.fail(e);
        }
        Err(_) => {
            guard.fail("presenter panicked");
        }
    }
}
