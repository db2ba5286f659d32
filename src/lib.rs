// dialog-bridge - modal choice dialogs with exactly-once outcomes
//
// This is the library crate: the bridge, its collaborator contracts and the
// core-side correlation helpers. The binary crate (main.rs) shows a single
// native dialog from the command line.

pub mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod pending;
pub mod presenters;

// Re-export commonly used types for convenience
pub use bridge::{CompletionChannel, DialogBridge, DialogObserver, ObserverSlot, Presenter};
pub use client::{DialogClient, PendingOutcome};
pub use config::ConfigManager;
pub use error::{BridgeError, ExecutorError, PresenterError};
pub use models::{BridgeConfig, Button, DialogHandle, ErrorCode, Outcome, Request};
pub use pending::PendingDialogs;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
