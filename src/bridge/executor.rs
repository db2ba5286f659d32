// Affine executors - run presentation work on the single UI-affine context
//
// The bridge never touches presentation state from a caller thread. Every
// request becomes one job posted to an AffineExecutor, which runs jobs one at
// a time on the context that owns the UI:
// - UiThread: a dedicated named thread draining a bounded queue
// - LocalLoop: a cooperative loop driven by a thread the caller owns (e.g. main)
// - SlintExecutor: Slint's own event loop (feature "slint")

use crate::error::ExecutorError;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;

/// A unit of work bound for the affine context
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Single-consumer queue onto the UI-affine execution context.
///
/// Implementations run posted jobs in FIFO order on one logical thread and
/// never block the poster.
pub trait AffineExecutor: Send + Sync + 'static {
    fn post(&self, job: Job) -> Result<(), ExecutorError>;
}

fn run_job(job: Job) {
    // A panicking job must not take the affine context down with it
    if catch_unwind(AssertUnwindSafe(job)).is_err() {
        tracing::error!("Affine job panicked; continuing with next job");
    }
}

fn try_post<T>(tx: &mpsc::Sender<T>, message: T) -> Result<(), ExecutorError> {
    match tx.try_send(message) {
        Ok(()) => Ok(()),
        Err(mpsc::error::TrySendError::Full(_)) => {
            tracing::warn!("Affine queue full - rejecting job");
            Err(ExecutorError::QueueFull)
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            tracing::warn!("Failed to post job - affine context has stopped");
            Err(ExecutorError::Stopped)
        }
    }
}

/// Dedicated UI thread executor
///
/// Spawns one named thread that drains a bounded channel with `blocking_recv`.
/// Bounded so that a stalled UI applies backpressure instead of growing memory.
///
/// # Example
/// ```
/// use dialog_bridge::bridge::{AffineExecutor, UiThread};
///
/// let ui = UiThread::spawn("dialog-ui", 16).unwrap();
/// ui.post(Box::new(|| println!("on the UI thread"))).unwrap();
/// ui.shutdown();
/// ```
pub struct UiThread {
    tx: Mutex<Option<mpsc::Sender<Job>>>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl UiThread {
    /// Start the UI thread
    ///
    /// # Arguments
    /// * `name` - Thread name, shown in logs and debuggers
    /// * `capacity` - Maximum number of queued jobs
    pub fn spawn(name: &str, capacity: usize) -> std::io::Result<Self> {
        let (tx, mut rx) = mpsc::channel::<Job>(capacity.max(1));

        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                tracing::debug!("UI thread started");

                while let Some(job) = rx.blocking_recv() {
                    run_job(job);
                }

                tracing::debug!("UI thread terminated");
            })?;

        Ok(Self {
            tx: Mutex::new(Some(tx)),
            thread: Mutex::new(Some(thread)),
        })
    }

    /// Close the queue and wait for already-queued jobs to finish
    pub fn shutdown(&self) {
        self.tx.lock().unwrap_or_else(|e| e.into_inner()).take();

        let handle = self.thread.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(handle) = handle {
            // Joining from the UI thread itself would deadlock
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                tracing::error!("UI thread panicked during shutdown");
            }
        }
    }
}

impl AffineExecutor for UiThread {
    fn post(&self, job: Job) -> Result<(), ExecutorError> {
        let guard = self.tx.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(tx) => try_post(tx, job),
            None => Err(ExecutorError::Stopped),
        }
    }
}

impl Drop for UiThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

enum LoopMessage {
    Run(Job),
    Stop,
}

/// Cooperative affine loop driven by the thread that owns the UI.
///
/// Create it on the UI thread, hand [`LocalLoopHandle`]s to the bridge, then
/// call [`run`](Self::run) to serve jobs until [`LocalLoopHandle::stop`].
/// [`run_until_idle`](Self::run_until_idle) drains without blocking, which
/// makes dispatch deterministic in tests.
pub struct LocalLoop {
    rx: mpsc::Receiver<LoopMessage>,
    tx: mpsc::Sender<LoopMessage>,
}

/// Cloneable poster for a [`LocalLoop`]
#[derive(Clone)]
pub struct LocalLoopHandle {
    tx: mpsc::Sender<LoopMessage>,
}

impl LocalLoop {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self { rx, tx }
    }

    pub fn handle(&self) -> LocalLoopHandle {
        LocalLoopHandle {
            tx: self.tx.clone(),
        }
    }

    /// Serve jobs until stopped. Returns the number of jobs run.
    ///
    /// Blocks the current thread; must not be called from inside an async task.
    pub fn run(&mut self) -> usize {
        let mut count = 0;
        while let Some(message) = self.rx.blocking_recv() {
            match message {
                LoopMessage::Run(job) => {
                    run_job(job);
                    count += 1;
                }
                LoopMessage::Stop => break,
            }
        }

        tracing::debug!("Local loop stopped after {} jobs", count);
        count
    }

    /// Run every queued job, including jobs queued while draining
    pub fn run_until_idle(&mut self) -> usize {
        let mut count = 0;
        while let Ok(message) = self.rx.try_recv() {
            match message {
                LoopMessage::Run(job) => {
                    run_job(job);
                    count += 1;
                }
                LoopMessage::Stop => break,
            }
        }
        count
    }
}

impl LocalLoopHandle {
    /// Ask the loop to return from [`LocalLoop::run`] after queued jobs
    pub fn stop(&self) -> Result<(), ExecutorError> {
        try_post(&self.tx, LoopMessage::Stop)
    }
}

impl AffineExecutor for LocalLoopHandle {
    fn post(&self, job: Job) -> Result<(), ExecutorError> {
        try_post(&self.tx, LoopMessage::Run(job))
    }
}

/// Executor backed by Slint's event loop via `invoke_from_event_loop`
#[cfg(feature = "slint")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SlintExecutor;

#[cfg(feature = "slint")]
impl AffineExecutor for SlintExecutor {
    fn post(&self, job: Job) -> Result<(), ExecutorError> {
        slint::invoke_from_event_loop(job).map_err(|e| {
            tracing::warn!("Failed to queue job to Slint event loop: {:?}", e);
            ExecutorError::EventLoop(format!("{:?}", e))
        })
    }
}
