use polaris_types::{Display, ScreenRect};
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_language() -> String {
    "ja".to_string()
}

fn default_hotkey() -> String {
    "ctrl+shift+KeyO".to_string()
}

fn default_capture_delay_ms() -> u64 {
    150
}

fn default_fallback_display() -> Display {
    Display {
        id: 0,
        bounds: ScreenRect::new(0, 0, 1920, 1080),
        work_area: ScreenRect::new(0, 0, 1920, 1080),
        scale_factor: 1.0,
        is_primary: true,
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// BCP-47 language tag of the recognizer ("ja", "en", ...)
    #[serde(default = "default_language")]
    pub language: String,
    /// Global shortcut that opens the selection overlay
    #[serde(default = "default_hotkey")]
    pub hotkey: String,
    /// Wait after hiding the selection overlay before capturing
    #[serde(default = "default_capture_delay_ms")]
    pub capture_delay_ms: u64,
    /// Path of the tesseract executable, looked up on PATH when unset
    pub tesseract_path: Option<String>,
    /// Display used when no monitor is reported
    #[serde(default = "default_fallback_display")]
    pub fallback_display: Display,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            language: default_language(),
            hotkey: default_hotkey(),
            capture_delay_ms: default_capture_delay_ms(),
            tesseract_path: None,
            fallback_display: default_fallback_display(),
        }
    }
}
