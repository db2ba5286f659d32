// DialogClient - request/response facade for the core
//
// Pairs a DialogBridge with a PendingDialogs registry so callers can simply
// await the outcome of a dialog instead of implementing the completion channel
// themselves.

use crate::bridge::{AffineExecutor, DialogBridge, Presenter};
use crate::error::BridgeError;
use crate::models::{BridgeSettings, DialogHandle, Outcome, Request};
use crate::pending::PendingDialogs;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Awaitable or blocking dialog requests
///
/// # Example
/// ```ignore
/// let client = DialogClient::new(presenter, executor, &config.bridge);
/// let outcome = client
///     .show(Request::new(DialogHandle(0), "Quit?").with_button(Button::new("Quit", 1)), Some(host))
///     .await?;
/// ```
pub struct DialogClient<P: Presenter> {
    bridge: DialogBridge<P>,
    pending: Arc<PendingDialogs>,
}

impl<P: Presenter> Clone for DialogClient<P> {
    fn clone(&self) -> Self {
        Self {
            bridge: self.bridge.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<P: Presenter> DialogClient<P> {
    pub fn new(
        presenter: Arc<P>,
        executor: Arc<dyn AffineExecutor>,
        settings: &BridgeSettings,
    ) -> Self {
        let pending = Arc::new(PendingDialogs::new());
        let bridge = DialogBridge::new(presenter, executor, pending.clone(), settings);
        Self { bridge, pending }
    }

    pub fn bridge(&self) -> &DialogBridge<P> {
        &self.bridge
    }

    pub fn pending(&self) -> &Arc<PendingDialogs> {
        &self.pending
    }

    /// Submit a request under a freshly allocated handle.
    ///
    /// Whatever handle `request` carried is replaced.
    pub fn submit(
        &self,
        request: Request,
        host: Option<Arc<P::Host>>,
    ) -> Result<PendingOutcome, BridgeError> {
        let (handle, rx) = self.pending.allocate();

        if let Err(e) = self.bridge.show(request.with_handle(handle), host) {
            self.pending.forget(handle);
            return Err(e);
        }

        Ok(PendingOutcome { handle, rx })
    }

    /// Show a dialog and wait for its outcome
    pub async fn show(
        &self,
        request: Request,
        host: Option<Arc<P::Host>>,
    ) -> Result<Outcome, BridgeError> {
        self.submit(request, host)?.wait().await
    }

    /// Show a dialog and block the current thread until it completes.
    ///
    /// Must not be called on the affine context itself, or from inside an
    /// async task: the dialog could never be presented.
    pub fn show_blocking(
        &self,
        request: Request,
        host: Option<Arc<P::Host>>,
    ) -> Result<Outcome, BridgeError> {
        self.submit(request, host)?.wait_blocking()
    }
}

/// An accepted request whose outcome has not been collected yet
#[derive(Debug)]
pub struct PendingOutcome {
    handle: DialogHandle,
    rx: oneshot::Receiver<Outcome>,
}

impl PendingOutcome {
    pub fn handle(&self) -> DialogHandle {
        self.handle
    }

    /// The outcome, if it has already been delivered
    pub fn try_outcome(&mut self) -> Option<Outcome> {
        self.rx.try_recv().ok()
    }

    pub async fn wait(self) -> Result<Outcome, BridgeError> {
        let handle = self.handle;
        self.rx.await.map_err(|_| BridgeError::Abandoned(handle))
    }

    pub fn wait_blocking(self) -> Result<Outcome, BridgeError> {
        let handle = self.handle;
        self.rx
            .blocking_recv()
            .map_err(|_| BridgeError::Abandoned(handle))
    }
}
