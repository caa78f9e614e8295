use std::time::Duration;

use arboard::Clipboard;
use tokio::time::{self, MissedTickBehavior};

/// Anything the watcher can read text from
pub trait ClipboardSource: Send {
    fn read_text(&mut self) -> anyhow::Result<String>;
}

impl ClipboardSource for Clipboard {
    fn read_text(&mut self) -> anyhow::Result<String> {
        Ok(self.get_text()?)
    }
}

pub type TextFilter = Box<dyn Fn(&str) -> bool + Send>;

/// Read-and-diff over a clipboard source.
///
/// Text is reported once: when it differs from the last accepted text, is
/// not blank and passes the filter. Rejected text does not replace the last
/// accepted one.
pub struct ClipboardWatcher<S> {
    source: S,
    last_text: String,
    filter: TextFilter,
}

impl<S: ClipboardSource> ClipboardWatcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            last_text: String::new(),
            filter: Box::new(|_| true),
        }
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> bool + Send + 'static,
    {
        self.filter = Box::new(filter);
        self
    }

    /// One read. Returns the trimmed text when it is accepted.
    pub fn poll(&mut self) -> Option<String> {
        let text = match self.source.read_text() {
            Ok(text) => text,
            Err(e) => {
                // Empty or non-text clipboards end up here
                tracing::trace!("clipboard read skipped: {e}");
                return None;
            }
        };

        if text == self.last_text {
            return None;
        }

        let trimmed = text.trim();
        if trimmed.is_empty() || !(self.filter)(&text) {
            return None;
        }

        let trimmed = trimmed.to_string();
        self.last_text = text;
        Some(trimmed)
    }
}

/// Poll `watcher` every `period` until the future is dropped
pub async fn watch<S, F>(
    mut watcher: ClipboardWatcher<S>,
    period: Duration,
    mut on_text: F,
) -> Result<(), anyhow::Error>
where
    S: ClipboardSource,
    F: FnMut(String) + Send + 'static,
{
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if let Some(text) = watcher.poll() {
            on_text(text);
        }
    }
}

/// The OS clipboard
pub fn system_clipboard() -> Result<Clipboard, anyhow::Error> {
    Ok(Clipboard::new()?)
}

/// Current clipboard text, read once
pub fn read_clipboard_text() -> Result<String, anyhow::Error> {
    let mut clipboard = system_clipboard()?;
    clipboard.read_text()
}
