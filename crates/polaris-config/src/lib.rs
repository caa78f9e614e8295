use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::clipboard::ClipboardConfig;
use self::ocr::OcrConfig;
use self::translator::TranslatorConfig;
use self::window::WindowConfig;

pub mod clipboard;
pub mod ocr;
pub mod translator;
pub mod window;

pub use translator::ProviderKind;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("clipboard.poll_interval_ms must be greater than zero")]
    ZeroPollInterval,

    #[error("window.min_height ({min}) is larger than window.max_height ({max})")]
    HeightRange { min: u32, max: u32 },

    #[error("window.bubble_min_width ({min}) is larger than window.bubble_max_width ({max})")]
    BubbleWidthRange { min: u32, max: u32 },

    #[error("translator.providers is empty")]
    NoProviders,

    #[error("translator.timeout_seconds must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub clipboard: ClipboardConfig,
    pub ocr: OcrConfig,
    pub translator: TranslatorConfig,
    pub window: WindowConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    /// Apply overrides from a key lookup, normally the process environment.
    /// Unparsable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parsed(&lookup, "POLARIS_POLL_INTERVAL_MS") {
            self.clipboard.poll_interval_ms = v;
        }
        if let Some(v) = parsed(&lookup, "POLARIS_CLIPBOARD_ENABLED") {
            self.clipboard.enabled = v;
        }
        if let Some(v) = parsed(&lookup, "POLARIS_OCR_ENABLED") {
            self.ocr.enabled = v;
        }
        if let Some(v) = lookup("POLARIS_OCR_LANGUAGE") {
            self.ocr.language = v;
        }
        if let Some(v) = lookup("POLARIS_OCR_HOTKEY") {
            self.ocr.hotkey = v;
        }
        if let Some(v) = parsed(&lookup, "POLARIS_CAPTURE_DELAY_MS") {
            self.ocr.capture_delay_ms = v;
        }
        if let Some(v) = lookup("TESSERACT_PATH") {
            self.ocr.tesseract_path = Some(v);
        }
        if let Some(v) = lookup("POLARIS_SOURCE_LANG") {
            self.translator.source_lang = v;
        }
        if let Some(v) = lookup("POLARIS_TARGET_LANG") {
            self.translator.target_lang = v;
        }
        if let Some(v) = lookup("POLARIS_MYMEMORY_EMAIL") {
            self.translator.mymemory_email = Some(v);
        }
        if let Some(v) = lookup("POLARIS_LIBRETRANSLATE_URL") {
            self.translator.libretranslate_url = v;
        }
        if let Some(v) = lookup("DEEPL_API_KEY") {
            self.translator.deepl_api_key = v;
        }
        if let Some(v) = parsed(&lookup, "POLARIS_TRANSLATE_TIMEOUT_SECONDS") {
            self.translator.timeout_seconds = v;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clipboard.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.window.min_height > self.window.max_height {
            return Err(ConfigError::HeightRange {
                min: self.window.min_height,
                max: self.window.max_height,
            });
        }
        if self.window.bubble_min_width > self.window.bubble_max_width {
            return Err(ConfigError::BubbleWidthRange {
                min: self.window.bubble_min_width,
                max: self.window.bubble_max_width,
            });
        }
        if self.translator.effective_providers().is_empty() {
            return Err(ConfigError::NoProviders);
        }
        if self.translator.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.clipboard.poll_interval_ms, 500);
        assert_eq!(config.window.panel_width, 500);
        assert_eq!(config.window.panel_height, 650);
        assert_eq!(config.translator.source_lang, "ja");
        assert_eq!(config.translator.target_lang, "en");
        assert_eq!(
            config.translator.providers,
            vec![ProviderKind::MyMemory, ProviderKind::LibreTranslate]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            ("POLARIS_POLL_INTERVAL_MS", "250"),
            ("POLARIS_TARGET_LANG", "de"),
            ("DEEPL_API_KEY", "secret"),
            ("POLARIS_OCR_ENABLED", "false"),
            ("POLARIS_CAPTURE_DELAY_MS", "300"),
        ]));

        assert_eq!(config.clipboard.poll_interval_ms, 250);
        assert_eq!(config.translator.target_lang, "de");
        assert!(!config.ocr.enabled);
        assert_eq!(config.ocr.capture_delay_ms, 300);
        assert_eq!(
            config.translator.effective_providers(),
            vec![
                ProviderKind::Deepl,
                ProviderKind::MyMemory,
                ProviderKind::LibreTranslate
            ]
        );
    }

    #[test]
    fn test_unparsable_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[("POLARIS_POLL_INTERVAL_MS", "soon")]));
        assert_eq!(config.clipboard.poll_interval_ms, 500);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.clipboard.poll_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval));

        let mut config = Config::default();
        config.window.min_height = 1000;
        assert_eq!(
            config.validate(),
            Err(ConfigError::HeightRange {
                min: 1000,
                max: 900
            })
        );

        let mut config = Config::default();
        config.window.bubble_min_width = 500;
        config.window.bubble_max_width = 300;
        assert_eq!(
            config.validate(),
            Err(ConfigError::BubbleWidthRange { min: 500, max: 300 })
        );

        let mut config = Config::default();
        config.translator.providers.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoProviders));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "translator": { "target_lang": "fr" } }"#).unwrap();
        assert_eq!(config.translator.target_lang, "fr");
        assert_eq!(config.translator.source_lang, "ja");
        assert_eq!(config.window.max_height, 900);
        assert_eq!(config.ocr.hotkey, "ctrl+shift+KeyO");
        assert_eq!(config.ocr.capture_delay_ms, 150);
    }
}
