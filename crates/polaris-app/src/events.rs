use std::sync::Arc;

use polaris_core::ipc::{BackendEndpoint, EventPusher};
use polaris_types::{AppEvent, UiRequest};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod clipboard_text;
pub mod region_selected;
pub mod requests;
pub mod start_selection;

use clipboard_text::handle_clipboard_text;
use region_selected::handle_region_selected;
use requests::{handle_get_clipboard, handle_resize_window, handle_show_panel, handle_translate};
use start_selection::handle_selection_cancelled;

/// Serve UI requests until the UI goes away or `cancel` fires
pub async fn event_loop(
    state: Arc<AppState>,
    backend: BackendEndpoint,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting, waiting for UI requests");
    loop {
        let request = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                return Ok(());
            }
            request = backend.next_request() => match request {
                Ok(request) => request,
                Err(e) => {
                    tracing::info!("[EVENT_LOOP] UI disconnected: {e}");
                    return Ok(());
                }
            },
        };

        tracing::debug!("[EVENT_LOOP] {}", request.channel_name());

        if let UiRequest::Quit = request {
            tracing::info!("[EVENT_LOOP] Quit requested by UI");
            cancel.cancel();
            return Ok(());
        }

        // Long requests (translation, OCR) must not hold up the next one
        let state = state.clone();
        let pusher = backend.pusher();
        tokio::spawn(async move {
            let channel = request.channel_name();
            if let Err(e) = handle_request(state, &pusher, request).await {
                tracing::error!("[EVENT_LOOP] {channel} failed: {e:#}");
            }
        });
    }
}

async fn handle_request(
    state: Arc<AppState>,
    pusher: &EventPusher,
    request: UiRequest,
) -> anyhow::Result<()> {
    match request {
        UiRequest::Translate {
            text,
            source_lang,
            target_lang,
            reply,
        } => handle_translate(state, text, source_lang, target_lang, reply).await,
        UiRequest::GetClipboard { reply } => handle_get_clipboard(state, reply).await,
        UiRequest::ResizeWindow {
            width,
            height,
            reply,
        } => handle_resize_window(state, width, height, reply),
        UiRequest::RegionSelected(rect) => handle_region_selected(state, pusher, rect).await,
        UiRequest::SelectionCancelled => handle_selection_cancelled(state, pusher).await,
        UiRequest::ShowPanel => handle_show_panel(state, pusher).await,
        UiRequest::DismissBubble => Ok(pusher.push(AppEvent::HideBubble).await?),
        UiRequest::Quit => Ok(()),
    }
}

/// Clipboard text accepted by the watcher
pub async fn on_clipboard_text(state: Arc<AppState>, pusher: EventPusher, text: String) {
    if let Err(e) = handle_clipboard_text(state, &pusher, text).await {
        tracing::error!("Clipboard translation failed: {e:#}");
    }
}
