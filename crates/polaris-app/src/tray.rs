//! Notification area icon.
//!
//! The icon is owned by the main thread, which runs the platform event loop
//! that delivers its clicks. Menu and click events land in process-wide
//! channels that a [`TrayListener`] drains from the runtime.

use std::sync::Arc;

use polaris_core::ipc::EventPusher;
use polaris_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::events::requests::handle_show_panel;
use crate::state::AppState;

pub const SHOW_ID: &str = "polaris-show";
pub const QUIT_ID: &str = "polaris-quit";
#[cfg_attr(not(windows), allow(dead_code))]
const TOOLTIP: &str = "Polaris - Language, illuminated";
#[cfg_attr(not(windows), allow(dead_code))]
const ICON_SIZE: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    ShowPanel,
    Quit,
}

pub fn command_for_menu(id: &str) -> Option<TrayCommand> {
    match id {
        SHOW_ID => Some(TrayCommand::ShowPanel),
        QUIT_ID => Some(TrayCommand::Quit),
        _ => None,
    }
}

pub async fn handle_tray_command(
    state: Arc<AppState>,
    pusher: &EventPusher,
    cancel: &CancellationToken,
    command: TrayCommand,
) -> anyhow::Result<()> {
    match command {
        TrayCommand::ShowPanel => handle_show_panel(state, pusher).await,
        TrayCommand::Quit => {
            tracing::info!("Quit from tray");
            pusher.push(AppEvent::Quit).await?;
            cancel.cancel();
            Ok(())
        }
    }
}

/// Star on a transparent square, RGBA
#[cfg_attr(not(windows), allow(dead_code))]
pub fn icon_rgba(size: u32) -> Vec<u8> {
    let mut rgba = vec![0u8; (size * size * 4) as usize];
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 2.0;

    for y in 0..size {
        for x in 0..size {
            let (dx, dy) = ((x as f32 - center).abs(), (y as f32 - center).abs());
            // Four-pointed star: |dx|^0.5 + |dy|^0.5 <= r^0.5
            if dx.sqrt() + dy.sqrt() > radius.sqrt() {
                continue;
            }
            let i = ((y * size + x) * 4) as usize;
            rgba[i..i + 4].copy_from_slice(&[0xF5, 0xC5, 0x42, 0xFF]);
        }
    }
    rgba
}

pub use self::platform::{AppTray, TrayListener};

#[cfg(windows)]
mod platform {
    use anyhow::{Context, Result};
    use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
    use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

    use super::{ICON_SIZE, QUIT_ID, SHOW_ID, TOOLTIP, TrayCommand, command_for_menu, icon_rgba};

    pub struct AppTray {
        _icon: TrayIcon,
    }

    impl AppTray {
        /// Must be called on the thread that runs the UI event loop
        pub fn new() -> Result<Self> {
            let show = MenuItem::with_id(SHOW_ID, "Show Window", true, None);
            let quit = MenuItem::with_id(QUIT_ID, "Quit", true, None);
            let menu = Menu::new();
            menu.append_items(&[&show, &PredefinedMenuItem::separator(), &quit])
                .context("Failed to build tray menu")?;

            let icon = Icon::from_rgba(icon_rgba(ICON_SIZE), ICON_SIZE, ICON_SIZE)
                .context("Failed to create tray icon image")?;

            let tray = TrayIconBuilder::new()
                .with_tooltip(TOOLTIP)
                .with_icon(icon)
                .with_menu(Box::new(menu))
                .with_menu_on_left_click(false)
                .build()
                .context("Failed to create tray icon")?;

            tracing::info!("Tray icon created");
            Ok(Self { _icon: tray })
        }

        pub fn listener(&self) -> TrayListener {
            TrayListener
        }
    }

    #[derive(Debug, Clone, Copy)]
    pub struct TrayListener;

    impl TrayListener {
        /// Drain pending menu and icon events. A left click shows the panel.
        pub fn poll(&self) -> Option<TrayCommand> {
            let mut command = None;
            while let Ok(event) = MenuEvent::receiver().try_recv() {
                command = command_for_menu(&event.id.0).or(command);
            }
            while let Ok(event) = TrayIconEvent::receiver().try_recv() {
                if let TrayIconEvent::Click {
                    button: MouseButton::Left,
                    button_state: MouseButtonState::Up,
                    ..
                } = event
                {
                    command = command.or(Some(TrayCommand::ShowPanel));
                }
            }
            command
        }
    }
}

#[cfg(not(windows))]
mod platform {
    use anyhow::{Result, bail};

    use super::TrayCommand;

    pub struct AppTray;

    impl AppTray {
        pub fn new() -> Result<Self> {
            bail!("tray icon is only available on Windows")
        }

        pub fn listener(&self) -> TrayListener {
            TrayListener
        }
    }

    #[derive(Debug, Clone, Copy)]
    pub struct TrayListener;

    impl TrayListener {
        pub fn poll(&self) -> Option<TrayCommand> {
            None
        }
    }
}
