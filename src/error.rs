use thiserror::Error;

use crate::models::DialogHandle;

/// Errors returned synchronously to callers of the bridge
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("{0} is already outstanding")]
    DuplicateHandle(DialogHandle),

    /// The outcome waiter was dropped before the bridge reported anything
    #[error("{0} was abandoned before an outcome was delivered")]
    Abandoned(DialogHandle),
}

/// Failures a presenter may report while realizing a dialog.
///
/// All of them reach the core as a platform failure.
#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("Presentation host is no longer available")]
    HostUnavailable,

    #[error("Failed to build dialog surface: {0}")]
    Surface(String),
}

/// Errors posting work to an affine executor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("Affine executor queue is full")]
    QueueFull,

    #[error("Affine executor has stopped")]
    Stopped,

    #[error("Event loop rejected job: {0}")]
    EventLoop(String),
}
