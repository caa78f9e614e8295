use std::sync::Arc;

use polaris_core::ipc::EventPusher;
use polaris_core::placement::{panel_bounds, resize_panel};
use polaris_types::{AppEvent, ScreenRect, TranslateReply};
use tokio::sync::oneshot;

use crate::state::AppState;

/// `translate`: failures are answered, not raised
pub async fn handle_translate(
    state: Arc<AppState>,
    text: String,
    source_lang: Option<String>,
    target_lang: Option<String>,
    reply: oneshot::Sender<TranslateReply>,
) -> anyhow::Result<()> {
    let answer = match state.translate(&text, source_lang, target_lang).await {
        Ok(translation) => TranslateReply::Success { translation },
        Err(e) => {
            tracing::warn!("translate request failed: {e}");
            TranslateReply::Failure {
                error: e.to_string(),
            }
        }
    };

    if reply.send(answer).is_err() {
        tracing::debug!("translate reply dropped, UI stopped waiting");
    }
    Ok(())
}

/// `get-clipboard`: empty string when there is no text
pub async fn handle_get_clipboard(
    state: Arc<AppState>,
    reply: oneshot::Sender<String>,
) -> anyhow::Result<()> {
    let read = state.read_clipboard.clone();
    let text = match tokio::task::spawn_blocking(move || read()).await? {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("clipboard read failed: {e}");
            String::new()
        }
    };

    if reply.send(text).is_err() {
        tracing::debug!("get-clipboard reply dropped");
    }
    Ok(())
}

/// `resize-window`: answered with the bounds to apply
pub fn handle_resize_window(
    state: Arc<AppState>,
    width: Option<u32>,
    height: u32,
    reply: oneshot::Sender<ScreenRect>,
) -> anyhow::Result<()> {
    let current = state
        .current_panel_bounds()
        .unwrap_or_else(|| default_panel_bounds(&state));
    let bounds = resize_panel(&current, width, height, &state.config.window);
    state.set_panel_bounds(bounds);
    tracing::debug!("panel resized to {:?}", bounds);

    if reply.send(bounds).is_err() {
        tracing::debug!("resize-window reply dropped");
    }
    Ok(())
}

/// Put the panel in the top-right corner of the cursor's display and show it
pub async fn handle_show_panel(state: Arc<AppState>, pusher: &EventPusher) -> anyhow::Result<()> {
    let bounds = default_panel_bounds(&state);
    state.set_panel_bounds(bounds);
    pusher.push(AppEvent::ShowPanel { bounds }).await?;
    Ok(())
}

pub fn default_panel_bounds(state: &AppState) -> ScreenRect {
    let display = state.cursor_display();
    panel_bounds(&display.work_area, &state.config.window)
}
