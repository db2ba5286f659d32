//! Shared test doubles for the integration tests
//!
//! - `ScriptedPresenter`: plays back a scripted user action per presented dialog
//! - `RecordingChannel` / `RecordingObserver`: capture every delivery in order
//! - `Harness`: a bridge wired to a `LocalLoop` for deterministic dispatch

#![allow(dead_code)]

use dialog_bridge::bridge::{
    AffineExecutor, CompletionChannel, CompletionSource, DialogBridge, DialogObserver,
    DialogSurface, LocalLoop, Presenter,
};
use dialog_bridge::models::{BridgeSettings, DialogHandle, SlotSignal};
use dialog_bridge::PresenterError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// What the scripted "user" does with the next dialog
#[derive(Debug, Clone, Copy)]
pub enum Script {
    Select(SlotSignal),
    Dismiss,
    /// Platform double-fire: select, then dismiss, then select again
    DoubleFire(SlotSignal),
    Fail,
    /// Report a choice, then return an error anyway
    SelectThenFail(SlotSignal),
    Panic,
    /// Keep the completion source for the test to fire later
    Hold,
    /// Return without firing or keeping the completion source
    Forget,
}

#[derive(Debug, Default)]
pub struct TestHost {
    dead: AtomicBool,
}

impl TestHost {
    pub fn kill(&self) {
        self.dead.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct ScriptedPresenter {
    script: Mutex<VecDeque<Script>>,
    surfaces: Mutex<Vec<DialogSurface>>,
    held: Mutex<Vec<CompletionSource>>,
    threads: Mutex<Vec<Option<String>>>,
}

impl ScriptedPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, script: Script) {
        self.script.lock().unwrap().push_back(script);
    }

    pub fn surfaces(&self) -> Vec<DialogSurface> {
        self.surfaces.lock().unwrap().clone()
    }

    pub fn thread_names(&self) -> Vec<Option<String>> {
        self.threads.lock().unwrap().clone()
    }

    /// Completion sources kept by `Script::Hold`, oldest first
    pub fn take_held(&self) -> Vec<CompletionSource> {
        std::mem::take(&mut *self.held.lock().unwrap())
    }
}

impl Presenter for ScriptedPresenter {
    type Host = TestHost;

    fn is_live(&self, host: &TestHost) -> bool {
        !host.dead.load(Ordering::SeqCst)
    }

    fn present(
        &self,
        _host: &TestHost,
        surface: &DialogSurface,
        completion: CompletionSource,
    ) -> Result<(), PresenterError> {
        self.surfaces.lock().unwrap().push(surface.clone());
        self.threads
            .lock()
            .unwrap()
            .push(thread::current().name().map(str::to_string));

        let script = self.script.lock().unwrap().pop_front().unwrap_or(Script::Hold);
        match script {
            Script::Select(signal) => {
                completion.select(signal);
            }
            Script::Dismiss => {
                completion.dismiss();
            }
            Script::DoubleFire(signal) => {
                completion.select(signal);
                completion.dismiss();
                completion.select(signal);
            }
            Script::Fail => return Err(PresenterError::Surface("scripted failure".to_string())),
            Script::SelectThenFail(signal) => {
                completion.select(signal);
                return Err(PresenterError::Surface("late failure".to_string()));
            }
            Script::Panic => panic!("scripted presenter panic"),
            Script::Hold => self.held.lock().unwrap().push(completion),
            Script::Forget => {}
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Completed {
        handle: u64,
        button_id: i64,
        cancelled: bool,
    },
    Error {
        handle: u64,
        error_code: i32,
    },
}

impl Event {
    pub fn handle(&self) -> u64 {
        match self {
            Event::Completed { handle, .. } | Event::Error { handle, .. } => *handle,
        }
    }
}

#[derive(Default)]
pub struct RecordingChannel {
    events: Mutex<Vec<Event>>,
}

impl RecordingChannel {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn for_handle(&self, handle: u64) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.handle() == handle)
            .collect()
    }
}

impl CompletionChannel for RecordingChannel {
    fn on_dialog_completed(&self, handle: DialogHandle, button_id: i64, cancelled: bool) {
        self.events.lock().unwrap().push(Event::Completed {
            handle: handle.get(),
            button_id,
            cancelled,
        });
    }

    fn on_dialog_error(&self, handle: DialogHandle, error_code: i32) {
        self.events.lock().unwrap().push(Event::Error {
            handle: handle.get(),
            error_code,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    Completed { button_id: i64, cancelled: bool },
    Error { error_code: i32 },
}

#[derive(Default)]
pub struct RecordingObserver {
    seen: Mutex<Vec<Observed>>,
}

impl RecordingObserver {
    pub fn seen(&self) -> Vec<Observed> {
        self.seen.lock().unwrap().clone()
    }
}

impl DialogObserver for RecordingObserver {
    fn on_completed(&self, button_id: i64, cancelled: bool) {
        self.seen.lock().unwrap().push(Observed::Completed {
            button_id,
            cancelled,
        });
    }

    fn on_error(&self, error_code: i32) {
        self.seen.lock().unwrap().push(Observed::Error { error_code });
    }
}

/// Bridge driven by a `LocalLoop` the test pumps with `run_until_idle`
pub struct Harness {
    pub local: LocalLoop,
    pub presenter: Arc<ScriptedPresenter>,
    pub channel: Arc<RecordingChannel>,
    pub bridge: DialogBridge<ScriptedPresenter>,
}

pub fn harness() -> Harness {
    harness_with(&BridgeSettings::default())
}

pub fn harness_with(settings: &BridgeSettings) -> Harness {
    let local = LocalLoop::new(settings.queue_capacity);
    let presenter = Arc::new(ScriptedPresenter::new());
    let channel = Arc::new(RecordingChannel::default());
    let executor: Arc<dyn AffineExecutor> = Arc::new(local.handle());
    let bridge = DialogBridge::new(presenter.clone(), executor, channel.clone(), settings);

    Harness {
        local,
        presenter,
        channel,
        bridge,
    }
}

pub fn live_host() -> Option<Arc<TestHost>> {
    Some(Arc::new(TestHost::default()))
}
