use polaris_types::{BubbleContent, TranslationUpdate};

pub const STATUS_MONITORING: &str = "Monitoring clipboard for Japanese text...";
pub const STATUS_TRANSLATING: &str = "Translating...";
pub const STATUS_COMPLETE: &str = "Translation complete!";
pub const STATUS_ERROR: &str = "Translation error";
pub const NO_TEXT_FOUND: &str = "No text found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTone {
    #[default]
    Idle,
    Pending,
    Done,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelTab {
    #[default]
    Translation,
    Manual,
}

impl PanelTab {
    pub fn index(self) -> i32 {
        match self {
            PanelTab::Translation => 0,
            PanelTab::Manual => 1,
        }
    }
}

/// What the main panel shows
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub original: String,
    pub result: String,
    pub tone: ResultTone,
    pub status: String,
    pub status_active: bool,
    pub tab: PanelTab,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            original: String::new(),
            result: String::new(),
            tone: ResultTone::Idle,
            status: STATUS_MONITORING.to_string(),
            status_active: true,
            tab: PanelTab::Translation,
        }
    }
}

impl PanelState {
    /// Apply a `translation-update`. Returns true when the panel should be
    /// resized to fit its new content.
    pub fn apply(&mut self, update: &TranslationUpdate) -> bool {
        let mut fit = false;

        if update.original.is_some() || update.translation.is_some() {
            self.tab = PanelTab::Translation;
        }

        if let Some(original) = &update.original {
            self.original = original.clone();
        }

        if let Some(translation) = &update.translation {
            self.result = translation.clone();
            self.tone = ResultTone::Done;
            self.set_status(STATUS_COMPLETE, true);
            fit = true;
        }

        if let Some(error) = &update.error {
            self.result = format!("Error: {error}");
            self.tone = ResultTone::Error;
            self.set_status(STATUS_ERROR, false);
        }

        if update.translating {
            self.result = STATUS_TRANSLATING.to_string();
            self.tone = ResultTone::Pending;
            self.set_status(STATUS_TRANSLATING, true);
        }

        fit
    }

    pub fn set_status(&mut self, message: &str, active: bool) {
        self.status = message.to_string();
        self.status_active = active;
    }
}

/// Text and tone of the floating bubble
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleView {
    pub original: String,
    pub result: String,
    pub tone: ResultTone,
}

impl From<&BubbleContent> for BubbleView {
    fn from(content: &BubbleContent) -> Self {
        let (result, tone) = match content {
            BubbleContent::Pending { .. } => (STATUS_TRANSLATING.to_string(), ResultTone::Pending),
            BubbleContent::Translated { translation, .. } => (translation.clone(), ResultTone::Done),
            BubbleContent::Failed { error, .. } => (format!("Error: {error}"), ResultTone::Error),
            BubbleContent::NoText => (NO_TEXT_FOUND.to_string(), ResultTone::Idle),
        };
        Self {
            original: content.original().to_string(),
            result,
            tone,
        }
    }
}
