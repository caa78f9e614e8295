use std::sync::Arc;

use polaris_core::ipc::EventPusher;
use polaris_core::preprocess::{ClipboardPreprocessor, Preprocessor};
use polaris_types::{AppEvent, TranslationUpdate};

use crate::events::requests::handle_show_panel;
use crate::state::AppState;

/// Show the panel, then translate the copied text into it
pub async fn handle_clipboard_text(
    state: Arc<AppState>,
    pusher: &EventPusher,
    text: String,
) -> anyhow::Result<()> {
    let text = ClipboardPreprocessor.process(&text);
    if text.is_empty() {
        return Ok(());
    }
    tracing::info!("Japanese text copied: {} chars", text.chars().count());

    handle_show_panel(state.clone(), pusher).await?;
    pusher
        .push(AppEvent::TranslationUpdate(TranslationUpdate::translating(
            text.clone(),
        )))
        .await?;

    let update = match state.translate(&text, None, None).await {
        Ok(translation) => TranslationUpdate::completed(text, translation),
        Err(e) => {
            tracing::error!("Translation error: {e}");
            TranslationUpdate::failed(e.to_string())
        }
    };

    pusher.push(AppEvent::TranslationUpdate(update)).await?;
    Ok(())
}
