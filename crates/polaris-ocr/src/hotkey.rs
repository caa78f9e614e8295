use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};

/// Owns the OS registration of the capture hotkey.
///
/// Must be created on the thread that runs the platform event loop and kept
/// alive for as long as the hotkey should fire. Presses are observed through
/// a [`HotkeyListener`], which can move to another thread.
pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl HotkeyManager {
    /// Register a hotkey such as `"ctrl+shift+KeyO"` or `"F9"`
    pub fn new(spec: &str) -> Result<Self> {
        let hotkey = parse_hotkey(spec)?;
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        manager
            .register(hotkey)
            .with_context(|| format!("Failed to register hotkey {spec}"))?;

        tracing::info!("Registered capture hotkey {spec}");
        Ok(Self { manager, hotkey })
    }

    /// Get the hotkey ID for matching events
    pub fn id(&self) -> u32 {
        self.hotkey.id()
    }

    pub fn listener(&self) -> HotkeyListener {
        HotkeyListener { id: self.id() }
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        let _ = self.manager.unregister(self.hotkey);
    }
}

pub fn parse_hotkey(spec: &str) -> Result<HotKey> {
    HotKey::from_str(spec).map_err(|e| anyhow!("Invalid hotkey '{spec}': {e}"))
}

/// Reads presses of one registered hotkey
#[derive(Debug, Clone, Copy)]
pub struct HotkeyListener {
    id: u32,
}

impl HotkeyListener {
    /// Drain pending hotkey events. True if our hotkey was pressed.
    /// Releases and other hotkeys are ignored.
    pub fn poll(&self) -> bool {
        let receiver = GlobalHotKeyEvent::receiver();
        let mut pressed = false;
        while let Ok(event) = receiver.try_recv() {
            if self.matches(&event) {
                pressed = true;
            } else {
                tracing::trace!("ignored hotkey event {:?}", event);
            }
        }
        pressed
    }

    fn matches(&self, event: &GlobalHotKeyEvent) -> bool {
        event.id == self.id && event.state == HotKeyState::Pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_hotkey() {
        let hotkey = parse_hotkey("ctrl+shift+KeyO").unwrap();
        assert_eq!(hotkey.id(), parse_hotkey("shift+ctrl+KeyO").unwrap().id());
        assert_ne!(hotkey.id(), parse_hotkey("ctrl+shift+KeyS").unwrap().id());
    }

    #[test]
    fn test_parse_invalid_hotkey() {
        let err = parse_hotkey("ctrl+shift+").unwrap_err();
        assert!(err.to_string().contains("Invalid hotkey"));
    }

    #[test]
    fn test_listener_matches_only_presses() {
        let hotkey = parse_hotkey("F9").unwrap();
        let listener = HotkeyListener { id: hotkey.id() };

        let pressed = GlobalHotKeyEvent {
            id: hotkey.id(),
            state: HotKeyState::Pressed,
        };
        let released = GlobalHotKeyEvent {
            id: hotkey.id(),
            state: HotKeyState::Released,
        };
        let other = GlobalHotKeyEvent {
            id: hotkey.id().wrapping_add(1),
            state: HotKeyState::Pressed,
        };

        assert!(listener.matches(&pressed));
        assert!(!listener.matches(&released));
        assert!(!listener.matches(&other));
    }
}
