use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use polaris_core::ipc::EventPusher;
use polaris_core::placement::bubble_bounds;
use polaris_core::preprocess::{OcrPreprocessor, Preprocessor};
use polaris_ocr::{capture_selection, encode_png};
use polaris_types::{AppEvent, BubbleContent, ScreenRect};

use crate::events::start_selection::STATUS_IDLE;
use crate::state::AppState;

/// A region was drawn on the overlay: capture, recognize, translate, and
/// show each stage in the bubble next to the selection
pub async fn handle_region_selected(
    state: Arc<AppState>,
    pusher: &EventPusher,
    selection: ScreenRect,
) -> anyhow::Result<()> {
    if !state.end_selection() {
        tracing::warn!("[OCR] region-selected without an open selection, ignored");
        return Ok(());
    }
    pusher.push(AppEvent::EndSelection).await?;
    pusher
        .push(AppEvent::Status {
            message: STATUS_IDLE.to_string(),
            active: true,
        })
        .await?;

    tracing::info!("[OCR] Region selected {:?}", selection);

    // Let the overlay disappear from the screen before it is captured
    let settle = Duration::from_millis(state.config.ocr.capture_delay_ms);
    if !settle.is_zero() {
        tokio::time::sleep(settle).await;
    }

    let bubble = Bubble {
        state: state.clone(),
        pusher,
        selection,
    };

    let png = match capture(state.clone(), selection).await {
        Ok(png) => png,
        Err(e) => {
            tracing::error!("[OCR] Capture failed: {e:#}");
            return bubble
                .show(BubbleContent::Failed {
                    original: String::new(),
                    error: format!("{e:#}"),
                })
                .await;
        }
    };

    let raw = match state.ocr.recognize(png).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("[OCR] {e:#}");
            return bubble
                .show(BubbleContent::Failed {
                    original: String::new(),
                    error: format!("{e:#}"),
                })
                .await;
        }
    };

    let text = OcrPreprocessor.process(&raw);
    tracing::debug!("[OCR] Got text: {} chars", text.chars().count());
    if text.is_empty() {
        return bubble.show(BubbleContent::NoText).await;
    }

    bubble
        .show(BubbleContent::Pending {
            original: text.clone(),
        })
        .await?;

    let content = match state.translate(&text, None, None).await {
        Ok(translation) => BubbleContent::Translated {
            original: text,
            translation,
        },
        Err(e) => {
            tracing::warn!("[OCR] Translation failed: {e}");
            BubbleContent::Failed {
                original: text,
                error: e.to_string(),
            }
        }
    };
    bubble.show(content).await
}

/// Capture, crop and encode on the blocking pool
async fn capture(state: Arc<AppState>, selection: ScreenRect) -> anyhow::Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<u8>> {
        let image = capture_selection(state.screen.as_ref(), selection)?;
        tracing::debug!("[OCR] Captured {}x{}", image.width(), image.height());
        Ok(encode_png(&image)?)
    })
    .await
    .context("Capture task panicked")?
    .context("Failed to capture screen")
}

struct Bubble<'a> {
    state: Arc<AppState>,
    pusher: &'a EventPusher,
    selection: ScreenRect,
}

impl Bubble<'_> {
    /// Place the bubble for `content` and show it
    async fn show(&self, content: BubbleContent) -> anyhow::Result<()> {
        let text_chars = content.original().chars().count()
            + match &content {
                BubbleContent::Translated { translation, .. } => translation.chars().count(),
                BubbleContent::Failed { error, .. } => error.chars().count(),
                _ => 0,
            };

        let display = self.state.display_for(&self.selection);
        let bounds = bubble_bounds(
            &self.selection,
            &display.work_area,
            text_chars,
            &self.state.config.window,
        );

        self.pusher
            .push(AppEvent::ShowBubble { bounds, content })
            .await?;
        Ok(())
    }
}
