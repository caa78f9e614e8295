//! Fakes for the screen, recognizer, translator and clipboard

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use image::RgbaImage;
use polaris_config::Config;
use polaris_core::ipc::UiEndpoint;
use polaris_ocr::{OcrBackend, OcrWorker, Screen};
use polaris_translator::{
    LanguageCode, ProviderMetadata, TranslateError, Translation, Translator,
};
use polaris_types::{AppEvent, Display, Point, ScreenRect};

use crate::state::{AppState, ClipboardReader};

pub fn primary_display() -> Display {
    Display {
        id: 1,
        bounds: ScreenRect::new(0, 0, 1920, 1080),
        work_area: ScreenRect::new(0, 0, 1920, 1040),
        scale_factor: 1.0,
        is_primary: true,
    }
}

/// Left of the primary, captured at twice its logical size
pub fn secondary_display() -> Display {
    Display {
        id: 2,
        bounds: ScreenRect::new(-1280, 0, 1280, 1024),
        work_area: ScreenRect::new(-1280, 0, 1280, 1024),
        scale_factor: 2.0,
        is_primary: false,
    }
}

pub struct FakeScreen {
    pub cursor: Point,
    /// When each capture was taken
    pub captures: Arc<Mutex<Vec<Instant>>>,
}

impl FakeScreen {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            cursor: Point::new(x, y),
            captures: Arc::default(),
        }
    }
}

impl Screen for FakeScreen {
    fn displays(&self) -> anyhow::Result<Vec<Display>> {
        Ok(vec![primary_display(), secondary_display()])
    }

    fn cursor_position(&self) -> anyhow::Result<Point> {
        Ok(self.cursor)
    }

    fn capture_display(&self, display: &Display) -> anyhow::Result<RgbaImage> {
        self.captures.lock().unwrap().push(Instant::now());
        let scale = display.scale_factor as u32;
        Ok(RgbaImage::new(
            display.bounds.width * scale,
            display.bounds.height * scale,
        ))
    }
}

/// Returns a fixed text and remembers the size of every image it saw
pub struct FakeOcr {
    text: Result<String, String>,
    pub seen: Mutex<Vec<(u32, u32)>>,
}

impl FakeOcr {
    pub fn text(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: Ok(text.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            text: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl OcrBackend for FakeOcr {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn recognize(&self, png: &[u8]) -> anyhow::Result<String> {
        let image = image::load_from_memory(png)?;
        self.seen
            .lock()
            .unwrap()
            .push((image.width(), image.height()));
        self.text.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

pub struct FakeTranslator {
    fail_with: Option<fn() -> TranslateError>,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeTranslator {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail_with: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(fail: fn() -> TranslateError) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(fail),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn last_call(&self) -> Option<(String, String, String)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), from.clone(), to.clone()));
        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        Ok(Translation {
            text: format!("EN[{text}]"),
            from,
            to,
            provider: "fake".into(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".into(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

pub struct TestState {
    pub config: Config,
    pub screen: FakeScreen,
    pub ocr: Arc<dyn OcrBackend>,
    pub translator: Arc<dyn Translator>,
    pub clipboard: ClipboardReader,
}

impl TestState {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            screen: FakeScreen::at(100, 100),
            ocr: FakeOcr::text(""),
            translator: FakeTranslator::ok(),
            clipboard: Arc::new(|| -> anyhow::Result<String> { Ok(String::new()) }),
        }
    }

    pub fn ocr(mut self, ocr: Arc<dyn OcrBackend>) -> Self {
        self.ocr = ocr;
        self
    }

    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn clipboard(mut self, clipboard: ClipboardReader) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn cursor(mut self, x: i32, y: i32) -> Self {
        self.screen = FakeScreen::at(x, y);
        self
    }

    pub fn capture_delay(mut self, ms: u64) -> Self {
        self.config.ocr.capture_delay_ms = ms;
        self
    }

    pub fn build(self) -> Arc<AppState> {
        Arc::new(AppState::with_parts(
            self.config,
            Arc::new(self.screen),
            OcrWorker::with_backend(self.ocr),
            self.translator,
            self.clipboard,
        ))
    }
}

/// Everything the backend pushed until the channel stays quiet
pub async fn drain(ui: &UiEndpoint) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(Ok(event)) = tokio::time::timeout(Duration::from_millis(100), ui.next_event()).await
    {
        events.push(event);
    }
    events
}
