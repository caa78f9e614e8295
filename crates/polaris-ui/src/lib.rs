use std::cell::{Cell, RefCell};
use std::rc::Rc;

use polaris_config::window::WindowConfig;
use polaris_core::ipc::UiEndpoint;
use polaris_types::{Display, TranslationUpdate, UiRequest};
use slint::{ComponentHandle, Weak};

pub mod bridge;
pub mod events;
pub mod state;

use bridge::UiBridge;
use state::PanelState;

slint::include_modules!();

/// Everything the event handlers and callbacks share on the UI thread
#[derive(Clone)]
pub struct UiContext {
    pub panel: Weak<MainPanel>,
    pub overlay: Weak<SelectionOverlay>,
    pub bubble: Weak<TranslationBubble>,
    pub panel_state: Rc<RefCell<PanelState>>,
    /// Display the overlay currently covers
    pub overlay_display: Rc<Cell<Option<Display>>>,
    pub bridge: UiBridge,
    pub config: Rc<WindowConfig>,
}

impl UiContext {
    pub fn hide_all(&self) {
        if let Some(w) = self.overlay.upgrade() {
            w.hide().ok();
        }
        if let Some(w) = self.bubble.upgrade() {
            w.hide().ok();
        }
        if let Some(w) = self.panel.upgrade() {
            w.hide().ok();
        }
    }
}

/// Create the windows and run the Slint event loop until quit.
///
/// Must be called on the main thread. Windows stay hidden until the backend
/// asks for them.
pub fn run_ui(endpoint: UiEndpoint, config: WindowConfig) -> anyhow::Result<()> {
    let panel = MainPanel::new()?;
    let overlay = SelectionOverlay::new()?;
    let bubble = TranslationBubble::new()?;

    panel.set_panel_title(config.title.as_str().into());

    let ctx = UiContext {
        panel: panel.as_weak(),
        overlay: overlay.as_weak(),
        bubble: bubble.as_weak(),
        panel_state: Rc::new(RefCell::new(PanelState::default())),
        overlay_display: Rc::new(Cell::new(None)),
        bridge: UiBridge::new(endpoint),
        config: Rc::new(config),
    };
    events::render_panel(&ctx);

    wire_panel(&panel, &ctx);
    wire_overlay(&overlay, &ctx);

    {
        let bridge = ctx.bridge.clone();
        bubble.on_dismissed(move || bridge.send(UiRequest::DismissBubble));
    }

    // Pump backend events on the UI thread
    {
        let ctx = ctx.clone();
        slint::spawn_local(async move {
            while let Ok(event) = ctx.bridge.endpoint().next_event().await {
                events::handle_event(event, &ctx);
            }
            tracing::info!("[SLINT] backend channel closed");
            ctx.hide_all();
            slint::quit_event_loop().ok();
        })?;
    }

    // The backend answers with show-panel bounds for the cursor's display
    ctx.bridge.send(UiRequest::ShowPanel);

    tracing::info!("[SLINT] event loop starting");
    slint::run_event_loop_until_quit()?;
    tracing::info!("[SLINT] event loop finished");

    Ok(())
}

fn wire_panel(panel: &MainPanel, ctx: &UiContext) {
    {
        let ctx = ctx.clone();
        panel.on_translate_manual(move |text| {
            let text = text.trim().to_string();
            if text.is_empty() {
                return;
            }
            let ctx = ctx.clone();
            let spawned = slint::spawn_local(async move {
                ctx.panel_state
                    .borrow_mut()
                    .apply(&TranslationUpdate::translating(text.clone()));
                events::render_panel(&ctx);

                let update = match ctx.bridge.translate(text.clone()).await {
                    Ok(translation) => TranslationUpdate::completed(text, translation),
                    Err(error) => TranslationUpdate::failed(error),
                };
                // Goes through the same path as backend updates
                events::handle_event(polaris_types::AppEvent::TranslationUpdate(update), &ctx);
            });
            if let Err(e) = spawned {
                tracing::error!("[SLINT] failed to start translation: {e}");
            }
        });
    }

    {
        let ctx = ctx.clone();
        panel.on_paste_clipboard(move || {
            let ctx = ctx.clone();
            let spawned = slint::spawn_local(async move {
                let text = ctx.bridge.clipboard_text().await;
                if let Some(panel) = ctx.panel.upgrade() {
                    panel.set_manual_text(text.into());
                }
            });
            if let Err(e) = spawned {
                tracing::error!("[SLINT] failed to read clipboard: {e}");
            }
        });
    }

    {
        let ctx = ctx.clone();
        panel.on_quit_requested(move || {
            ctx.bridge.send(UiRequest::Quit);
            ctx.hide_all();
            slint::quit_event_loop().ok();
        });
    }
}

fn wire_overlay(overlay: &SelectionOverlay, ctx: &UiContext) {
    {
        let ctx = ctx.clone();
        overlay.on_region_drawn(move |x1, y1, x2, y2| {
            let Some(display) = ctx.overlay_display.get() else {
                tracing::warn!("[SLINT] drag finished without an active selection");
                return;
            };
            ctx.bridge.drag_finished(
                display.bounds.origin(),
                (x1, y1),
                (x2, y2),
                ctx.config.min_selection,
            );
        });
    }

    {
        let bridge = ctx.bridge.clone();
        overlay.on_cancelled(move || bridge.send(UiRequest::SelectionCancelled));
    }
}
