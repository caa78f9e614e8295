use std::sync::Arc;
use std::time::Duration;

use polaris_core::ipc::EventPusher;
use polaris_core::script::contains_japanese;
use polaris_io::clipboard::{ClipboardSource, ClipboardWatcher, watch};
use polaris_ocr::HotkeyListener;
use tokio_util::sync::CancellationToken;

use crate::events::on_clipboard_text;
use crate::events::start_selection::handle_start_selection;
use crate::state::AppState;
use crate::tray::{TrayListener, handle_tray_command};

const HOTKEY_POLL: Duration = Duration::from_millis(50);

/// Watch the system clipboard for Japanese text
pub async fn clipboard_io(
    state: Arc<AppState>,
    pusher: EventPusher,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let clipboard = polaris_io::clipboard::system_clipboard()?;
    run_clipboard_watcher(state, pusher, clipboard, cancel).await
}

pub async fn run_clipboard_watcher<S>(
    state: Arc<AppState>,
    pusher: EventPusher,
    source: S,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    S: ClipboardSource + 'static,
{
    let period = Duration::from_millis(state.config.clipboard.poll_interval_ms);
    tracing::info!("Starting clipboard watcher ({period:?})");

    let watcher = ClipboardWatcher::new(source).with_filter(contains_japanese);

    tokio::select! {
        result = watch(watcher, period, move |text| {
            // Translation runs beside the watcher so polling keeps its pace
            tokio::spawn(on_clipboard_text(state.clone(), pusher.clone(), text));
        }) => {
            if let Err(e) = result {
                tracing::error!("Clipboard watcher error: {e}");
            }
        }
        _ = cancel.cancelled() => {
            tracing::info!("Clipboard watcher stopping");
        }
    }

    Ok(())
}

/// Open the selection overlay whenever the capture hotkey is pressed
pub async fn hotkey_io(
    state: Arc<AppState>,
    pusher: EventPusher,
    listener: HotkeyListener,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(HOTKEY_POLL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!("OCR hotkey listener started");
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = cancel.cancelled() => break,
        }

        if listener.poll() {
            tracing::info!("OCR hotkey pressed");
            if let Err(e) = handle_start_selection(state.clone(), &pusher).await {
                tracing::error!("Failed to start selection: {e:#}");
            }
        }
    }

    tracing::info!("OCR hotkey listener stopping");
    Ok(())
}

/// Act on tray menu picks and icon clicks
pub async fn tray_io(
    state: Arc<AppState>,
    pusher: EventPusher,
    listener: TrayListener,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(HOTKEY_POLL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = cancel.cancelled() => break,
        }

        if let Some(command) = listener.poll() {
            tracing::debug!("Tray command {command:?}");
            if let Err(e) = handle_tray_command(state.clone(), &pusher, &cancel, command).await {
                tracing::error!("Tray command failed: {e:#}");
            }
        }
    }

    tracing::info!("Tray listener stopping");
    Ok(())
}
