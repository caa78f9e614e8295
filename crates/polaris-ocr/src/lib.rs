pub mod capture;
mod hotkey;
mod ocr;
mod screen;
mod worker;

pub use capture::{CaptureError, Screen, capture_selection, crop_to_selection, encode_png};
pub use hotkey::{HotkeyListener, HotkeyManager, parse_hotkey};
#[cfg(windows)]
pub use ocr::WinRtOcr;
pub use ocr::{OcrBackend, TesseractCli, default_backend, on_ocr_thread, tesseract_language};
pub use screen::NativeScreen;
pub use worker::{BackendFactory, OcrWorker};
