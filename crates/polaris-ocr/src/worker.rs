use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::OnceCell;

use crate::ocr::{OcrBackend, on_ocr_thread};

pub type BackendFactory = Arc<dyn Fn() -> Result<Arc<dyn OcrBackend>> + Send + Sync>;

/// Runs recognition off the async runtime.
///
/// The backend is created on first use and shared afterwards. A failed
/// initialization is not remembered, so the next capture retries it.
#[derive(Clone)]
pub struct OcrWorker {
    backend: Arc<OnceCell<Arc<dyn OcrBackend>>>,
    factory: BackendFactory,
}

impl OcrWorker {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn OcrBackend>> + Send + Sync + 'static,
    {
        Self {
            backend: Arc::new(OnceCell::new()),
            factory: Arc::new(factory),
        }
    }

    /// Worker with an already created backend
    pub fn with_backend(backend: Arc<dyn OcrBackend>) -> Self {
        let worker = Self::new(|| anyhow::bail!("backend already provided"));
        // A fresh cell cannot be set already
        let _ = worker.backend.set(backend);
        worker
    }

    pub fn is_initialized(&self) -> bool {
        self.backend.initialized()
    }

    async fn backend(&self) -> Result<Arc<dyn OcrBackend>> {
        let backend = self
            .backend
            .get_or_try_init(|| async {
                let factory = self.factory.clone();
                let backend = tokio::task::spawn_blocking(move || on_ocr_thread(|| factory()))
                    .await
                    .context("OCR initialization task panicked")??;
                tracing::info!("OCR engine initialized ({})", backend.name());
                Ok::<_, anyhow::Error>(backend)
            })
            .await?;
        Ok(backend.clone())
    }

    /// Recognize text in a PNG image. Surrounding whitespace is trimmed.
    pub async fn recognize(&self, png: Vec<u8>) -> Result<String> {
        let backend = self.backend().await.context("Failed to extract text")?;

        let text = tokio::task::spawn_blocking(move || on_ocr_thread(|| backend.recognize(&png)))
            .await
            .context("OCR task panicked")?
            .context("Failed to extract text")?;

        Ok(text.trim().to_string())
    }
}
