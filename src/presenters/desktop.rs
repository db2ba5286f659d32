use crate::bridge::{CompletionSource, DialogSurface, Presenter};
use crate::error::PresenterError;
use crate::models::{SlotRole, SlotSignal};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// A desktop session dialogs are shown in
///
/// Close it when the owning window goes away; later requests then fail
/// their precondition instead of popping up an orphaned dialog.
#[derive(Debug, Default)]
pub struct DesktopHost {
    closed: AtomicBool,
}

impl DesktopHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_open(&self) -> bool {
        !self.closed.load(Ordering::Acquire)
    }
}

/// Severity the native dialog is styled with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogLevel {
    #[default]
    Info,
    Warning,
    Error,
}

impl From<DialogLevel> for MessageLevel {
    fn from(level: DialogLevel) -> Self {
        match level {
            DialogLevel::Info => MessageLevel::Info,
            DialogLevel::Warning => MessageLevel::Warning,
            DialogLevel::Error => MessageLevel::Error,
        }
    }
}

/// Native message box presenter built on `rfd::MessageDialog`
///
/// `MessageDialog::show` blocks until the user answers, so the outcome is
/// reported before `present` returns. On macOS the affine context must be
/// the main thread. rfd dialogs can always be closed, so
/// `DialogSurface::cancellable` is not enforced.
#[derive(Debug, Clone, Copy, Default)]
pub struct RfdPresenter {
    level: DialogLevel,
}

/// What the native dialog's answer means for the completion source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Slot(SlotSignal),
    Dismissed,
}

impl RfdPresenter {
    pub fn new(level: DialogLevel) -> Self {
        Self { level }
    }

    /// Native button layout for `surface`.
    ///
    /// rfd reports a custom button only by its label, so labels must be
    /// distinct for the answer to map back to a single slot.
    fn buttons_for(surface: &DialogSurface) -> Result<MessageButtons, PresenterError> {
        let mut seen = HashSet::new();
        if let Some(dup) = surface.buttons.iter().find(|b| !seen.insert(b.label.as_str())) {
            return Err(PresenterError::Surface(format!(
                "button label {:?} is used by more than one slot",
                dup.label
            )));
        }

        let label = |role| {
            surface
                .button(role)
                .map(|b| b.label.clone())
                .unwrap_or_default()
        };

        let buttons = match surface.buttons.len() {
            0 => MessageButtons::Ok,
            1 => MessageButtons::OkCustom(label(SlotRole::Primary)),
            2 => MessageButtons::OkCancelCustom(label(SlotRole::Primary), label(SlotRole::Secondary)),
            _ => MessageButtons::YesNoCancelCustom(
                label(SlotRole::Primary),
                label(SlotRole::Secondary),
                label(SlotRole::Tertiary),
            ),
        };
        Ok(buttons)
    }

    fn answer_for(result: MessageDialogResult, surface: &DialogSurface) -> Answer {
        match result {
            MessageDialogResult::Custom(label) => surface
                .buttons
                .iter()
                .find(|b| b.label == label)
                .map(|b| Answer::Slot(b.role.into()))
                .unwrap_or(Answer::Slot(SlotSignal::Unmapped(-1))),
            // With no slots the lone OK button only closes the dialog
            MessageDialogResult::Ok | MessageDialogResult::Yes if surface.buttons.is_empty() => {
                Answer::Dismissed
            }
            MessageDialogResult::Ok | MessageDialogResult::Yes => Answer::Slot(SlotSignal::Primary),
            MessageDialogResult::No => Answer::Slot(SlotSignal::Secondary),
            MessageDialogResult::Cancel => Answer::Dismissed,
        }
    }
}

impl Presenter for RfdPresenter {
    type Host = DesktopHost;

    fn is_live(&self, host: &DesktopHost) -> bool {
        host.is_open()
    }

    fn present(
        &self,
        host: &DesktopHost,
        surface: &DialogSurface,
        completion: CompletionSource,
    ) -> Result<(), PresenterError> {
        // The host may have closed while the job was queued
        if !host.is_open() {
            return Err(PresenterError::HostUnavailable);
        }

        let buttons = Self::buttons_for(surface)?;
        let mut dialog = MessageDialog::new()
            .set_level(self.level.into())
            .set_description(surface.message.as_str())
            .set_buttons(buttons);
        if let Some(title) = &surface.title {
            dialog = dialog.set_title(title.as_str());
        }

        match Self::answer_for(dialog.show(), surface) {
            Answer::Slot(signal) => completion.select(signal),
            Answer::Dismissed => completion.dismiss(),
        };

        Ok(())
    }
}
