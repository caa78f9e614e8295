use std::time::Duration;

use polaris_core::placement::{fit_content_height, overlay_bounds};
use polaris_types::{AppEvent, ScreenRect};
use slint::ComponentHandle;

use crate::state::{BubbleView, ResultTone};
use crate::{ResultStyle, UiContext};

/// Content needs a frame to lay out before it can be measured
const FIT_DELAY: Duration = Duration::from_millis(100);

pub fn handle_event(event: AppEvent, ctx: &UiContext) {
    tracing::debug!("[SLINT] {}", event.channel_name());

    match event {
        AppEvent::TranslationUpdate(update) => {
            let fit = ctx.panel_state.borrow_mut().apply(&update);
            render_panel(ctx);
            if fit {
                schedule_fit(ctx.clone());
            }
        }
        AppEvent::ShowPanel { bounds } => {
            if let Some(panel) = ctx.panel.upgrade() {
                apply_bounds(panel.window(), bounds);
                if let Err(e) = panel.show() {
                    tracing::error!("[SLINT] failed to show panel: {e}");
                }
            }
        }
        AppEvent::StartSelection { display } => {
            if let Some(overlay) = ctx.overlay.upgrade() {
                ctx.overlay_display.set(Some(display));
                overlay.set_dragging(false);
                apply_bounds(overlay.window(), overlay_bounds(&display));
                if let Err(e) = overlay.show() {
                    tracing::error!("[SLINT] failed to show overlay: {e}");
                }
            }
        }
        AppEvent::EndSelection => {
            ctx.overlay_display.set(None);
            if let Some(overlay) = ctx.overlay.upgrade() {
                overlay.set_dragging(false);
                overlay.hide().ok();
            }
        }
        AppEvent::ShowBubble { bounds, content } => {
            if let Some(bubble) = ctx.bubble.upgrade() {
                let view = BubbleView::from(&content);
                bubble.set_original_text(view.original.into());
                bubble.set_result_text(view.result.into());
                bubble.set_result_style(result_style(view.tone));
                apply_bounds(bubble.window(), bounds);
                if let Err(e) = bubble.show() {
                    tracing::error!("[SLINT] failed to show bubble: {e}");
                }
            }
        }
        AppEvent::HideBubble => {
            if let Some(bubble) = ctx.bubble.upgrade() {
                bubble.hide().ok();
            }
        }
        AppEvent::Status { message, active } => {
            ctx.panel_state.borrow_mut().set_status(&message, active);
            render_panel(ctx);
        }
        AppEvent::Quit => {
            ctx.hide_all();
            slint::quit_event_loop().ok();
        }
    }
}

pub fn render_panel(ctx: &UiContext) {
    let Some(panel) = ctx.panel.upgrade() else {
        return;
    };
    let state = ctx.panel_state.borrow();
    panel.set_original_text(state.original.as_str().into());
    panel.set_result_text(state.result.as_str().into());
    panel.set_result_style(result_style(state.tone));
    panel.set_status_text(state.status.as_str().into());
    panel.set_status_active(state.status_active);
    panel.set_current_tab(state.tab.index());
}

/// Measure the panel content and ask the backend for a matching height
fn schedule_fit(ctx: UiContext) {
    slint::Timer::single_shot(FIT_DELAY, move || {
        let Some(panel) = ctx.panel.upgrade() else {
            return;
        };
        let content = panel.get_content_height().max(0.0).round() as u32;
        let height = fit_content_height(content, &ctx.config);
        let width = ctx.config.panel_width;

        let task_ctx = ctx.clone();
        let spawned = slint::spawn_local(async move {
            if let Some(bounds) = task_ctx.bridge.resize(Some(width), height).await
                && let Some(panel) = task_ctx.panel.upgrade()
            {
                apply_bounds(panel.window(), bounds);
            }
        });
        if let Err(e) = spawned {
            tracing::error!("[SLINT] failed to schedule resize: {e}");
        }
    });
}

pub fn apply_bounds(window: &slint::Window, bounds: ScreenRect) {
    window.set_position(slint::LogicalPosition::new(bounds.x as f32, bounds.y as f32));
    window.set_size(slint::LogicalSize::new(
        bounds.width as f32,
        bounds.height as f32,
    ));
}

pub fn result_style(tone: ResultTone) -> ResultStyle {
    match tone {
        ResultTone::Idle => ResultStyle::Idle,
        ResultTone::Pending => ResultStyle::Pending,
        ResultTone::Done => ResultStyle::Done,
        ResultTone::Error => ResultStyle::Error,
    }
}
