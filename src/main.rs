//! dialog-bridge - show one native choice dialog and print its outcome
//!
//! # Usage
//!
//! ```text
//! dialog-bridge <message> [title] [button]...
//! ```
//!
//! Up to three buttons are presented; their ids are `1000`, `1001`, `1002`
//! in order, and the last one doubles as the cancel button. Without buttons
//! the dialog only offers dismissal.
//!
//! # Threading
//!
//! - **Main thread**: runs the affine [`LocalLoop`], where the native dialog is shown
//!   (required by some platforms)
//! - **Tokio workers**: the "core" side, which requests the dialog and awaits its outcome
//!
//! Configuration is read from `config/dialog-bridge.yaml` with
//! `DIALOG_BRIDGE__*` environment overrides.

use anyhow::{Result, bail};
use dialog_bridge::bridge::{LocalLoop, LocalLoopHandle};
use dialog_bridge::models::{Button, DialogHandle, Request, button_id};
use dialog_bridge::presenters::{DesktopHost, RfdPresenter};
use dialog_bridge::{APP_NAME, ConfigManager, DialogClient, VERSION};
use std::sync::Arc;
use std::time::Duration;

/// Build the request from command-line arguments
fn parse_args<I>(args: I) -> Result<Request>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(message) = args.next() else {
        bail!("usage: {} <message> [title] [button]...", APP_NAME);
    };

    let mut request = Request::new(DialogHandle(0), message).cancellable(true);
    if let Some(title) = args.next() {
        request = request.with_title(title);
    }

    let labels: Vec<String> = args.collect();
    let last = labels.len().saturating_sub(1);
    for (i, label) in labels.into_iter().enumerate() {
        let id = button_id::CUSTOM_BASE + i as i64;
        let button = if i == last && i > 0 {
            Button::cancel(label, id)
        } else {
            Button::new(label, id)
        };
        request = request.with_button(button);
    }

    Ok(request)
}

/// Stops the UI loop when dropped, including while a panic unwinds
struct StopLoopOnDrop(LocalLoopHandle);

impl Drop for StopLoopOnDrop {
    fn drop(&mut self) {
        if let Err(e) = self.0.stop() {
            tracing::warn!("Failed to stop UI loop: {}", e);
        }
    }
}

fn main() -> Result<()> {
    let config_manager = ConfigManager::new("config")?;
    let config = config_manager.load_config()?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = dialog_bridge::logging::setup_logging(&config.logging)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let request = parse_args(std::env::args().skip(1))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("dialog-core")
        .build()?;

    let mut ui_loop = LocalLoop::new(config.bridge.queue_capacity);
    let ui_handle = ui_loop.handle();

    let client = DialogClient::new(
        Arc::new(RfdPresenter::default()),
        Arc::new(ui_handle.clone()),
        &config.bridge,
    );
    let host = Arc::new(DesktopHost::new());

    let task_client = client.clone();
    let task = runtime.spawn(async move {
        let _stop_ui = StopLoopOnDrop(ui_handle);
        task_client.show(request, Some(host)).await
    });

    // Blocks until the core task has its outcome
    let jobs = ui_loop.run();
    tracing::debug!("UI loop served {} jobs", jobs);

    let outcome = runtime.block_on(task)??;
    println!("{}", outcome);

    client.bridge().metrics().log_summary();
    runtime.shutdown_timeout(Duration::from_secs(5));

    tracing::info!("Shutdown complete");
    Ok(())
}
