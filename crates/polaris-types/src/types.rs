use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::rect::ScreenRect;

/// Events pushed from the backend to the UI thread
#[derive(Debug, Clone)]
pub enum AppEvent {
    TranslationUpdate(TranslationUpdate),
    /// Position and raise the main panel
    ShowPanel {
        bounds: ScreenRect,
    },
    /// Open the selection overlay over a display
    StartSelection {
        display: Display,
    },
    EndSelection,
    ShowBubble {
        bounds: ScreenRect,
        content: BubbleContent,
    },
    HideBubble,
    Status {
        message: String,
        active: bool,
    },
    Quit,
}

impl AppEvent {
    /// Name of the channel the event travels on
    pub fn channel_name(&self) -> &'static str {
        match self {
            AppEvent::TranslationUpdate(_) => "translation-update",
            AppEvent::ShowPanel { .. } => "show-panel",
            AppEvent::StartSelection { .. } => "start-selection",
            AppEvent::EndSelection => "end-selection",
            AppEvent::ShowBubble { .. } => "show-bubble",
            AppEvent::HideBubble => "hide-bubble",
            AppEvent::Status { .. } => "status",
            AppEvent::Quit => "quit",
        }
    }
}

/// Messages sent from the UI thread to the backend.
///
/// Variants carrying a `reply` are request/response pairs, the rest are pushes.
#[derive(Debug)]
pub enum UiRequest {
    Translate {
        text: String,
        source_lang: Option<String>,
        target_lang: Option<String>,
        reply: oneshot::Sender<TranslateReply>,
    },
    GetClipboard {
        reply: oneshot::Sender<String>,
    },
    ResizeWindow {
        width: Option<u32>,
        height: u32,
        reply: oneshot::Sender<ScreenRect>,
    },
    RegionSelected(ScreenRect),
    SelectionCancelled,
    ShowPanel,
    DismissBubble,
    Quit,
}

impl UiRequest {
    pub fn channel_name(&self) -> &'static str {
        match self {
            UiRequest::Translate { .. } => "translate",
            UiRequest::GetClipboard { .. } => "get-clipboard",
            UiRequest::ResizeWindow { .. } => "resize-window",
            UiRequest::RegionSelected(_) => "region-selected",
            UiRequest::SelectionCancelled => "selection-cancelled",
            UiRequest::ShowPanel => "show-panel",
            UiRequest::DismissBubble => "dismiss-bubble",
            UiRequest::Quit => "quit",
        }
    }
}

/// Answer to a `translate` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TranslateReply {
    Success { translation: String },
    Failure { error: String },
}

/// Payload of the `translation-update` channel.
///
/// Any combination of fields may be set; the panel applies each present field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationUpdate {
    pub original: Option<String>,
    pub translation: Option<String>,
    #[serde(default)]
    pub translating: bool,
    pub error: Option<String>,
}

impl TranslationUpdate {
    pub fn translating(original: impl Into<String>) -> Self {
        Self {
            original: Some(original.into()),
            translating: true,
            ..Default::default()
        }
    }

    pub fn completed(original: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            original: Some(original.into()),
            translation: Some(translation.into()),
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// What the floating bubble shows next to an OCR selection
#[derive(Debug, Clone, PartialEq)]
pub enum BubbleContent {
    Pending { original: String },
    Translated { original: String, translation: String },
    Failed { original: String, error: String },
    NoText,
}

impl BubbleContent {
    pub fn original(&self) -> &str {
        match self {
            BubbleContent::Pending { original }
            | BubbleContent::Translated { original, .. }
            | BubbleContent::Failed { original, .. } => original,
            BubbleContent::NoText => "",
        }
    }
}

/// A physical monitor as seen in logical screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Display {
    pub id: u32,
    pub bounds: ScreenRect,
    /// Bounds minus taskbars and docks
    pub work_area: ScreenRect,
    pub scale_factor: f32,
    #[serde(default)]
    pub is_primary: bool,
}

impl Display {
    pub fn new(id: u32, bounds: ScreenRect) -> Self {
        Self {
            id,
            bounds,
            work_area: bounds,
            scale_factor: 1.0,
            is_primary: false,
        }
    }
}
