use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use polaris_config::Config;
use polaris_core::geometry::{display_matching, display_nearest_point};
use polaris_ocr::{NativeScreen, OcrWorker, Screen};
use polaris_translator::{TranslateError, Translator};
use polaris_types::{Display, ScreenRect};

/// Reads the clipboard once. Blocking.
pub type ClipboardReader = Arc<dyn Fn() -> anyhow::Result<String> + Send + Sync>;

pub struct AppState {
    pub config: Config,
    pub screen: Arc<dyn Screen>,
    pub ocr: OcrWorker,
    pub translator: Arc<dyn Translator>,
    pub read_clipboard: ClipboardReader,
    /// Bounds last given to the main panel
    pub panel_bounds: Mutex<Option<ScreenRect>>,
    /// Set while the selection overlay is open
    selecting: AtomicBool,
}

impl AppState {
    /// State backed by the real screen, clipboard, OCR engine and HTTP
    /// translators
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let screen = Arc::new(NativeScreen::new(config.ocr.fallback_display));

        let language = config.ocr.language.clone();
        let tesseract_path = config.ocr.tesseract_path.clone();
        let ocr = OcrWorker::new(move || {
            polaris_ocr::default_backend(&language, tesseract_path.as_deref())
        });

        let translator = polaris_translator::from_config(&config.translator)
            .context("Failed to create translation client")?;
        tracing::info!(
            "Translation providers: {}",
            translator.provider_names().join(", ")
        );

        Ok(Self::with_parts(
            config,
            screen,
            ocr,
            Arc::new(translator),
            Arc::new(polaris_io::clipboard::read_clipboard_text),
        ))
    }

    pub fn with_parts(
        config: Config,
        screen: Arc<dyn Screen>,
        ocr: OcrWorker,
        translator: Arc<dyn Translator>,
        read_clipboard: ClipboardReader,
    ) -> Self {
        Self {
            config,
            screen,
            ocr,
            translator,
            read_clipboard,
            panel_bounds: Mutex::new(None),
            selecting: AtomicBool::new(false),
        }
    }

    /// Mark the overlay open. False when it already was.
    pub fn begin_selection(&self) -> bool {
        self.selecting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Mark the overlay closed. False when it was not open.
    pub fn end_selection(&self) -> bool {
        self.selecting.swap(false, Ordering::AcqRel)
    }

    #[cfg(test)]
    pub fn is_selecting(&self) -> bool {
        self.selecting.load(Ordering::Acquire)
    }

    /// Display under the mouse cursor, or the configured fallback
    pub fn cursor_display(&self) -> Display {
        let found = self.screen.displays().and_then(|displays| {
            let cursor = self.screen.cursor_position()?;
            Ok(display_nearest_point(&displays, cursor).copied())
        });

        match found {
            Ok(Some(display)) => display,
            Ok(None) => self.config.ocr.fallback_display,
            Err(e) => {
                tracing::warn!("Display lookup failed, using fallback: {e:#}");
                self.config.ocr.fallback_display
            }
        }
    }

    /// Display showing most of `rect`
    pub fn display_for(&self, rect: &ScreenRect) -> Display {
        match self.screen.displays() {
            Ok(displays) => display_matching(&displays, rect)
                .copied()
                .unwrap_or(self.config.ocr.fallback_display),
            Err(e) => {
                tracing::warn!("Display lookup failed, using fallback: {e:#}");
                self.config.ocr.fallback_display
            }
        }
    }

    pub fn set_panel_bounds(&self, bounds: ScreenRect) {
        if let Ok(mut current) = self.panel_bounds.lock() {
            *current = Some(bounds);
        }
    }

    pub fn current_panel_bounds(&self) -> Option<ScreenRect> {
        self.panel_bounds.lock().ok().and_then(|b| *b)
    }

    /// Translate with the configured languages unless overridden
    pub async fn translate(
        &self,
        text: &str,
        source_lang: Option<String>,
        target_lang: Option<String>,
    ) -> Result<String, TranslateError> {
        let from = source_lang.unwrap_or_else(|| self.config.translator.source_lang.clone());
        let to = target_lang.unwrap_or_else(|| self.config.translator.target_lang.clone());
        tracing::debug!("translating {} chars {from} -> {to}", text.chars().count());

        let translation = self.translator.translate(text, from, to).await?;
        Ok(translation.text)
    }
}
