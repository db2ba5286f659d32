use std::fmt;

use super::slots::MAX_SLOTS;

/// Well-known button identifiers.
///
/// Any `i64` is a valid button id; these are the values shared with the
/// native dialog layer. Custom ids should start at [`CUSTOM_BASE`].
pub mod button_id {
    /// Sentinel meaning "no id available"
    pub const NONE: i64 = 0;
    pub const OK: i64 = 1;
    pub const CANCEL: i64 = 2;
    pub const YES: i64 = 3;
    pub const NO: i64 = 4;
    pub const RETRY: i64 = 5;
    pub const CONTINUE: i64 = 6;
    pub const IGNORE: i64 = 7;
    pub const ABORT: i64 = 8;
    pub const CLOSE: i64 = 9;
    pub const HELP: i64 = 10;
    pub const TRY_AGAIN: i64 = 11;
    pub const CUSTOM_BASE: i64 = 1000;
}

/// Caller-assigned correlation id for one outstanding dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogHandle(pub u64);

impl DialogHandle {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for DialogHandle {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for DialogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog#{}", self.0)
    }
}

/// A labelled button and the id reported when it is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub id: i64,
    /// Marks the button whose id is reported on dismissal
    pub is_cancel: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, id: i64) -> Self {
        Self {
            label: label.into(),
            id,
            is_cancel: false,
        }
    }

    /// A button that also serves as the dismissal result
    pub fn cancel(label: impl Into<String>, id: i64) -> Self {
        Self {
            is_cancel: true,
            ..Self::new(label, id)
        }
    }
}

/// Immutable description of one modal choice dialog.
///
/// Built by the core and consumed exactly once by
/// [`DialogBridge::show`](crate::bridge::DialogBridge::show).
///
/// # Example
/// ```
/// use dialog_bridge::models::{Button, DialogHandle, Request};
///
/// let request = Request::new(DialogHandle(7), "Save changes?")
///     .with_title("Editor")
///     .with_button(Button::new("Save", 10))
///     .with_button(Button::cancel("Discard", 20))
///     .cancellable(true);
///
/// assert_eq!(request.cancel_button_id(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    handle: DialogHandle,
    title: Option<String>,
    message: String,
    buttons: Vec<Button>,
    cancel_button_id: Option<i64>,
    cancellable: bool,
}

impl Request {
    pub fn new(handle: DialogHandle, message: impl Into<String>) -> Self {
        Self {
            handle,
            title: None,
            message: message.into(),
            buttons: Vec::new(),
            cancel_button_id: None,
            cancellable: false,
        }
    }

    pub fn with_handle(mut self, handle: DialogHandle) -> Self {
        self.handle = handle;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn with_buttons<I>(mut self, buttons: I) -> Self
    where
        I: IntoIterator<Item = Button>,
    {
        self.buttons.extend(buttons);
        self
    }

    /// Override the id reported when the dialog is dismissed without a choice
    pub fn with_cancel_button_id(mut self, id: i64) -> Self {
        self.cancel_button_id = Some(id);
        self
    }

    pub fn cancellable(mut self, cancellable: bool) -> Self {
        self.cancellable = cancellable;
        self
    }

    pub fn handle(&self) -> DialogHandle {
        self.handle
    }

    /// Title to display, `None` when absent or empty
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn is_cancellable(&self) -> bool {
        self.cancellable
    }

    /// True when more buttons were supplied than the surface has slots for
    pub fn exceeds_slots(&self) -> bool {
        self.buttons.len() > MAX_SLOTS
    }

    /// Id reported on dismissal.
    ///
    /// An explicit override wins, then the first mapped button marked as cancel,
    /// then [`button_id::CANCEL`].
    pub fn cancel_button_id(&self) -> i64 {
        if let Some(id) = self.cancel_button_id {
            return id;
        }

        self.buttons
            .iter()
            .take(MAX_SLOTS)
            .find(|b| b.is_cancel)
            .map(|b| b.id)
            .unwrap_or(button_id::CANCEL)
    }
}
