use polaris_core::geometry::normalize_drag;
use polaris_core::ipc::UiEndpoint;
use polaris_types::{Point, ScreenRect, TranslateReply, UiRequest};

/// UI side of the relay, used from Slint callbacks
#[derive(Clone)]
pub struct UiBridge {
    endpoint: UiEndpoint,
}

impl UiBridge {
    pub fn new(endpoint: UiEndpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &UiEndpoint {
        &self.endpoint
    }

    /// Fire-and-forget push to the backend
    pub fn send(&self, request: UiRequest) {
        let channel = request.channel_name();
        if let Err(e) = self.endpoint.push(request) {
            tracing::warn!("[SLINT] dropped {channel}: {e}");
        }
    }

    /// Forward a finished drag on the overlay of the display at `origin`
    pub fn drag_finished(&self, origin: Point, start: (f32, f32), end: (f32, f32), min_size: u32) {
        match selection_from_drag(origin, start, end, min_size) {
            Some(rect) => {
                tracing::debug!("[SLINT] region selected {:?}", rect);
                self.send(UiRequest::RegionSelected(rect));
            }
            None => {
                tracing::debug!("[SLINT] selection too small, cancelled");
                self.send(UiRequest::SelectionCancelled);
            }
        }
    }

    /// Translate text typed into the panel. Errors come back as text.
    pub async fn translate(&self, text: String) -> Result<String, String> {
        match self.endpoint.translate(text, None, None).await {
            Ok(TranslateReply::Success { translation }) => Ok(translation),
            Ok(TranslateReply::Failure { error }) => Err(error),
            Err(e) => Err(e.to_string()),
        }
    }

    pub async fn clipboard_text(&self) -> String {
        match self.endpoint.get_clipboard().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("[SLINT] get-clipboard failed: {e}");
                String::new()
            }
        }
    }

    pub async fn resize(&self, width: Option<u32>, height: u32) -> Option<ScreenRect> {
        match self.endpoint.resize_window(width, height).await {
            Ok(bounds) => Some(bounds),
            Err(e) => {
                tracing::warn!("[SLINT] resize-window failed: {e}");
                None
            }
        }
    }
}

/// Screen rectangle of a drag between two window-local points. Drags smaller
/// than `min_size` on either axis count as a cancel.
pub fn selection_from_drag(
    origin: Point,
    start: (f32, f32),
    end: (f32, f32),
    min_size: u32,
) -> Option<ScreenRect> {
    let to_screen = |(x, y): (f32, f32)| {
        Point::new(
            origin.x.saturating_add(x.round() as i32),
            origin.y.saturating_add(y.round() as i32),
        )
    };

    let rect = normalize_drag(to_screen(start), to_screen(end));
    if rect.width < min_size || rect.height < min_size {
        return None;
    }
    Some(rect)
}
