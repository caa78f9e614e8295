use std::sync::Arc;

use polaris_core::ipc::EventPusher;
use polaris_types::AppEvent;

use crate::state::AppState;

pub const STATUS_SELECTING: &str = "Select a region to translate...";
pub const STATUS_IDLE: &str = "Monitoring clipboard for Japanese text...";

/// Capture hotkey: open the overlay on the cursor's display
pub async fn handle_start_selection(state: Arc<AppState>, pusher: &EventPusher) -> anyhow::Result<()> {
    if !state.begin_selection() {
        tracing::debug!("[OCR] Selection already open, hotkey ignored");
        return Ok(());
    }

    let display = state.cursor_display();
    let (display_id, bounds) = (display.id, display.bounds);
    tracing::info!("[OCR] Selecting on display {display_id} {bounds:?}");

    if let Err(e) = pusher.push(AppEvent::StartSelection { display }).await {
        state.end_selection();
        return Err(e.into());
    }
    pusher
        .push(AppEvent::Status {
            message: STATUS_SELECTING.to_string(),
            active: true,
        })
        .await?;
    Ok(())
}

pub async fn handle_selection_cancelled(
    state: Arc<AppState>,
    pusher: &EventPusher,
) -> anyhow::Result<()> {
    if !state.end_selection() {
        return Ok(());
    }
    tracing::debug!("[OCR] Selection cancelled");

    pusher.push(AppEvent::EndSelection).await?;
    pusher
        .push(AppEvent::Status {
            message: STATUS_IDLE.to_string(),
            active: true,
        })
        .await?;
    Ok(())
}
