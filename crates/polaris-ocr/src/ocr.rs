use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};

/// A text recognizer
pub trait OcrBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Recognize text from PNG image bytes
    fn recognize(&self, png: &[u8]) -> Result<String>;
}

/// Tesseract language pack for a BCP-47 code
pub fn tesseract_language(code: &str) -> &str {
    match code {
        "ja" => "jpn",
        "en" => "eng",
        "zh" | "zh-Hans" => "chi_sim",
        "zh-Hant" => "chi_tra",
        "ko" => "kor",
        other => other,
    }
}

/// The `tesseract` command-line program
pub struct TesseractCli {
    executable: PathBuf,
    language: String,
}

impl TesseractCli {
    pub fn new(executable: Option<&str>, language_code: &str) -> Self {
        Self {
            executable: PathBuf::from(executable.unwrap_or("tesseract")),
            language: tesseract_language(language_code).to_string(),
        }
    }

    /// Fail early when the executable or the language pack is missing
    pub fn probe(&self) -> Result<()> {
        let output = Command::new(&self.executable)
            .arg("--list-langs")
            .output()
            .with_context(|| format!("Failed to run {}", self.executable.display()))?;

        if !output.status.success() {
            return Err(anyhow!(
                "tesseract --list-langs failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        // Older versions print the list on stderr
        let listing = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        if !listing.lines().any(|l| l.trim() == self.language) {
            return Err(anyhow!(
                "tesseract language pack '{}' is not installed",
                self.language
            ));
        }
        Ok(())
    }
}

impl OcrBackend for TesseractCli {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, png: &[u8]) -> Result<String> {
        let input = tempfile::Builder::new()
            .prefix("polaris_ocr_")
            .suffix(".png")
            .tempfile()
            .context("Failed to create temp file")?;
        std::fs::write(input.path(), png).context("Failed to write capture")?;

        let output = Command::new(&self.executable)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .with_context(|| format!("Failed to run {}", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(windows)]
pub use self::winrt::WinRtOcr;

/// Run OCR work on the current thread.
///
/// WinRT needs the thread in a COM apartment for the duration of the call.
/// Blocking-pool threads are reused, so the apartment is entered and left
/// around every call rather than once per thread.
pub fn on_ocr_thread<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    #[cfg(windows)]
    let _apartment = winrt::Apartment::enter()?;
    f()
}

#[cfg(windows)]
mod winrt {
    use anyhow::{Context, Result};
    use windows::{
        Globalization::Language,
        Graphics::Imaging::BitmapDecoder,
        Media::Ocr::OcrEngine as WinOcrEngine,
        Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
        Win32::System::Com::{COINIT_MULTITHREADED, CoInitializeEx, CoUninitialize},
        core::HSTRING,
    };

    use super::OcrBackend;

    /// Multithreaded apartment membership of the current thread
    pub(super) struct Apartment;

    impl Apartment {
        pub(super) fn enter() -> Result<Self> {
            // S_FALSE (already a member) also needs the matching uninitialize
            let hr = unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) };
            hr.ok().context("Failed to initialize COM")?;
            Ok(Apartment)
        }
    }

    impl Drop for Apartment {
        fn drop(&mut self) {
            unsafe { CoUninitialize() }
        }
    }

    /// Windows.Media.Ocr
    pub struct WinRtOcr {
        engine: WinOcrEngine,
    }

    impl WinRtOcr {
        /// Create an engine for `language_code` ("ja", "en", ...). The
        /// language's OCR pack has to be installed in Windows settings.
        pub fn new(language_code: &str) -> Result<Self> {
            let language = Language::CreateLanguage(&HSTRING::from(language_code))
                .context("Failed to create language")?;

            let engine = WinOcrEngine::TryCreateFromLanguage(&language)
                .context("Failed to create OCR engine for language")?;

            Ok(Self { engine })
        }
    }

    impl OcrBackend for WinRtOcr {
        fn name(&self) -> &'static str {
            "windows-media-ocr"
        }

        fn recognize(&self, png: &[u8]) -> Result<String> {
            let stream = InMemoryRandomAccessStream::new().context("Failed to create stream")?;
            let writer = DataWriter::CreateDataWriter(&stream).context("Failed to create writer")?;

            writer.WriteBytes(png).context("Failed to write image bytes")?;
            writer
                .StoreAsync()
                .context("Failed to store async")?
                .get()
                .context("Failed to store data")?;
            writer.FlushAsync().context("Failed to flush")?.get()?;

            stream.Seek(0).context("Failed to seek")?;

            let decoder = BitmapDecoder::CreateAsync(&stream)
                .context("Failed to create decoder async")?
                .get()
                .context("Failed to get decoder")?;

            let bitmap = decoder
                .GetSoftwareBitmapAsync()
                .context("Failed to get bitmap async")?
                .get()
                .context("Failed to get software bitmap")?;

            let result = self
                .engine
                .RecognizeAsync(&bitmap)
                .context("Failed to recognize async")?
                .get()
                .context("Failed to get OCR result")?;

            Ok(result.Text().context("Failed to get text")?.to_string())
        }
    }
}

/// The platform's preferred recognizer. An explicit tesseract path always
/// selects tesseract.
pub fn default_backend(
    language_code: &str,
    tesseract_path: Option<&str>,
) -> Result<Arc<dyn OcrBackend>> {
    #[cfg(windows)]
    if tesseract_path.is_none() {
        let engine = WinRtOcr::new(language_code)?;
        return Ok(Arc::new(engine));
    }

    let tesseract = TesseractCli::new(tesseract_path, language_code);
    tesseract.probe()?;
    Ok(Arc::new(tesseract))
}
