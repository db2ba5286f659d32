//! Data models for the dialog bridge.
//!
//! - [`Request`]: immutable description of one dialog, keyed by a [`DialogHandle`]
//! - [`Outcome`]: the single terminal result of a request, with its [`ErrorCode`]
//! - [`SlotTable`]: the ordered, at-most-three button slots a surface exposes
//! - [`BridgeConfig`]: settings loaded from `dialog-bridge.yaml`

pub mod config;
pub mod outcome;
pub mod request;
pub mod slots;

pub use config::{BridgeConfig, BridgeSettings, ButtonOverflowPolicy, LoggingSettings};
pub use outcome::{ErrorCode, Outcome};
pub use request::{Button, DialogHandle, Request, button_id};
pub use slots::{MAX_SLOTS, Slot, SlotRole, SlotSignal, SlotTable};
