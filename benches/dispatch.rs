use criterion::{Criterion, criterion_group, criterion_main};
use dialog_bridge::bridge::{
    AffineExecutor, CompletionChannel, CompletionSource, DialogBridge, DialogSurface, LocalLoop,
    Presenter,
};
use dialog_bridge::models::{BridgeSettings, Button, DialogHandle, Request, SlotSignal};
use dialog_bridge::{DialogClient, PresenterError};
use std::hint::black_box;
use std::sync::Arc;

/// Selects the primary slot as soon as it is presented
struct InstantPresenter;

impl Presenter for InstantPresenter {
    type Host = ();

    fn present(
        &self,
        _host: &(),
        _surface: &DialogSurface,
        completion: CompletionSource,
    ) -> Result<(), PresenterError> {
        completion.select(SlotSignal::Primary);
        Ok(())
    }
}

struct NullChannel;

impl CompletionChannel for NullChannel {
    fn on_dialog_completed(&self, handle: DialogHandle, button_id: i64, cancelled: bool) {
        black_box((handle, button_id, cancelled));
    }

    fn on_dialog_error(&self, handle: DialogHandle, error_code: i32) {
        black_box((handle, error_code));
    }
}

fn request(handle: u64) -> Request {
    Request::new(DialogHandle(handle), "Save changes?")
        .with_title("Editor")
        .with_button(Button::new("Save", 1000))
        .with_button(Button::new("Discard", 1001))
        .with_button(Button::cancel("Cancel", 1002))
        .cancellable(true)
}

fn bench_show_and_complete(c: &mut Criterion) {
    let mut local = LocalLoop::new(16);
    let executor: Arc<dyn AffineExecutor> = Arc::new(local.handle());
    let bridge = DialogBridge::new(
        Arc::new(InstantPresenter),
        executor,
        Arc::new(NullChannel),
        &BridgeSettings::default(),
    );
    let host = Arc::new(());
    let mut next = 0u64;

    c.bench_function("bridge_show_complete", |b| {
        b.iter(|| {
            next += 1;
            bridge
                .show(black_box(request(next)), Some(host.clone()))
                .unwrap();
            local.run_until_idle()
        })
    });
}

fn bench_client_roundtrip(c: &mut Criterion) {
    let mut local = LocalLoop::new(16);
    let executor: Arc<dyn AffineExecutor> = Arc::new(local.handle());
    let client = DialogClient::new(
        Arc::new(InstantPresenter),
        executor,
        &BridgeSettings::default(),
    );
    let host = Arc::new(());

    c.bench_function("client_submit_wait", |b| {
        b.iter(|| {
            let mut pending = client.submit(request(0), Some(host.clone())).unwrap();
            local.run_until_idle();
            black_box(pending.try_outcome())
        })
    });
}

criterion_group!(benches, bench_show_and_complete, bench_client_roundtrip);
criterion_main!(benches);
