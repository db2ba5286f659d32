// Bridge module - dialog correlation across the UI-affinity boundary
//
// This module contains:
// - DialogBridge: validates requests and posts presentation jobs
// - AffineExecutor: the single-consumer queue onto the UI-affine context
// - Presenter / CompletionSource: the collaborator contract and its one completion path
// - CompletionNotifier: exactly-once delivery to the core channel and the observer
// - ObserverSlot: injectable test-observation hook

pub mod dialog;
pub mod executor;
pub mod notifier;
pub mod observer;
pub mod presenter;

pub use dialog::DialogBridge;
#[cfg(feature = "slint")]
pub use executor::SlintExecutor;
pub use executor::{AffineExecutor, Job, LocalLoop, LocalLoopHandle, UiThread};
pub use notifier::{CompletionChannel, CompletionNotifier};
pub use observer::{BroadcastObserver, DialogObserver, Observation, ObserverSlot};
pub use presenter::{CompletionSource, DialogSurface, Presenter, SurfaceButton};
