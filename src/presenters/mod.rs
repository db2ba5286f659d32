//! Presenter implementations.
//!
//! The bridge itself is toolkit-agnostic; these are the concrete
//! [`Presenter`](crate::bridge::Presenter)s shipped with the crate.
//!
//! - [`RfdPresenter`]: native message boxes via `rfd`, with up to three custom buttons

pub mod desktop;

pub use desktop::{DesktopHost, DialogLevel, RfdPresenter};
