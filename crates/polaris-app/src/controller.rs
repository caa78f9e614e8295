use std::sync::Arc;

use polaris_core::ipc::BackendEndpoint;
use polaris_ocr::HotkeyListener;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::{clipboard_io, hotkey_io, tray_io};
use crate::state::AppState;
use crate::tray::TrayListener;

/// Application controller for task spawning and lifecycle
pub struct AppController {
    state: Arc<AppState>,
    backend: BackendEndpoint,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, backend: BackendEndpoint) -> Self {
        Self {
            state,
            backend,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Must run inside the tokio runtime
    pub fn spawn_tasks(
        &self,
        hotkey: Option<HotkeyListener>,
        tray: Option<TrayListener>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.backend.clone(),
            self.cancel_token.clone(),
        ));

        // Clipboard watcher
        if self.state.config.clipboard.enabled {
            tasks.spawn(clipboard_io(
                self.state.clone(),
                self.backend.pusher(),
                self.cancel_token.child_token(),
            ));
        } else {
            tracing::info!("Clipboard monitoring disabled");
        }

        // OCR hotkey
        if let Some(listener) = hotkey {
            tasks.spawn(hotkey_io(
                self.state.clone(),
                self.backend.pusher(),
                listener,
                self.cancel_token.child_token(),
            ));
        }

        // Tray menu; Quit there cancels the whole tree
        if let Some(listener) = tray {
            tasks.spawn(tray_io(
                self.state.clone(),
                self.backend.pusher(),
                listener,
                self.cancel_token.clone(),
            ));
        }

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
