//! Message relay between the backend tasks and the UI thread.
//!
//! Three kinds of traffic share two channels: UI requests that expect an
//! answer (`translate`, `get-clipboard`, `resize-window`) carry a oneshot
//! reply sender; UI pushes (`region-selected`, ...) and backend pushes
//! (`translation-update`, ...) are fire and forget.

use kanal::{AsyncReceiver, AsyncSender};
use polaris_types::{AppEvent, ScreenRect, TranslateReply, UiRequest};
use tokio::sync::oneshot;

use crate::error::IpcError;

/// OCR bursts and translation updates
const APP_TO_UI_CAPACITY: usize = 256;
/// UI interactions
const UI_TO_APP_CAPACITY: usize = 64;

/// Create a connected pair of endpoints
pub fn relay() -> (BackendEndpoint, UiEndpoint) {
    let (event_tx, event_rx) = kanal::bounded_async(APP_TO_UI_CAPACITY);
    let (request_tx, request_rx) = kanal::bounded_async(UI_TO_APP_CAPACITY);

    (
        BackendEndpoint {
            events: event_tx,
            requests: request_rx,
        },
        UiEndpoint {
            events: event_rx,
            requests: request_tx,
        },
    )
}

#[derive(Clone)]
pub struct BackendEndpoint {
    events: AsyncSender<AppEvent>,
    requests: AsyncReceiver<UiRequest>,
}

impl BackendEndpoint {
    pub async fn push(&self, event: AppEvent) -> Result<(), IpcError> {
        let channel = event.channel_name();
        tracing::trace!("push -> ui: {channel}");
        self.events
            .send(event)
            .await
            .map_err(|_| IpcError::Closed { channel })
    }

    pub async fn next_request(&self) -> Result<UiRequest, IpcError> {
        self.requests.recv().await.map_err(|_| IpcError::Closed {
            channel: "ui-requests",
        })
    }

    /// Sender half only, for tasks that never read requests
    pub fn pusher(&self) -> EventPusher {
        EventPusher {
            events: self.events.clone(),
        }
    }
}

#[derive(Clone)]
pub struct EventPusher {
    events: AsyncSender<AppEvent>,
}

impl EventPusher {
    pub async fn push(&self, event: AppEvent) -> Result<(), IpcError> {
        let channel = event.channel_name();
        self.events
            .send(event)
            .await
            .map_err(|_| IpcError::Closed { channel })
    }
}

#[derive(Clone)]
pub struct UiEndpoint {
    events: AsyncReceiver<AppEvent>,
    requests: AsyncSender<UiRequest>,
}

impl UiEndpoint {
    pub async fn next_event(&self) -> Result<AppEvent, IpcError> {
        self.events.recv().await.map_err(|_| IpcError::Closed {
            channel: "app-events",
        })
    }

    /// Non-blocking send for UI callbacks
    pub fn push(&self, request: UiRequest) -> Result<(), IpcError> {
        let channel = request.channel_name();
        match self.requests.try_send(request) {
            Ok(true) => Ok(()),
            Ok(false) => Err(IpcError::Full { channel }),
            Err(_) => Err(IpcError::Closed { channel }),
        }
    }

    async fn send(&self, request: UiRequest) -> Result<(), IpcError> {
        let channel = request.channel_name();
        self.requests
            .send(request)
            .await
            .map_err(|_| IpcError::Closed { channel })
    }

    /// `translate`: source and target default to the configured pair
    pub async fn translate(
        &self,
        text: impl Into<String>,
        source_lang: Option<String>,
        target_lang: Option<String>,
    ) -> Result<TranslateReply, IpcError> {
        let (reply, rx) = oneshot::channel();
        self.send(UiRequest::Translate {
            text: text.into(),
            source_lang,
            target_lang,
            reply,
        })
        .await?;
        rx.await.map_err(|_| IpcError::NoReply {
            channel: "translate",
        })
    }

    /// `get-clipboard`
    pub async fn get_clipboard(&self) -> Result<String, IpcError> {
        let (reply, rx) = oneshot::channel();
        self.send(UiRequest::GetClipboard { reply }).await?;
        rx.await.map_err(|_| IpcError::NoReply {
            channel: "get-clipboard",
        })
    }

    /// `resize-window`, answered with the bounds actually applied
    pub async fn resize_window(
        &self,
        width: Option<u32>,
        height: u32,
    ) -> Result<ScreenRect, IpcError> {
        let (reply, rx) = oneshot::channel();
        self.send(UiRequest::ResizeWindow {
            width,
            height,
            reply,
        })
        .await?;
        rx.await.map_err(|_| IpcError::NoReply {
            channel: "resize-window",
        })
    }
}
