use std::collections::VecDeque;
use std::time::Duration;

use polaris_core::ipc::relay;
use polaris_io::clipboard::ClipboardSource;
use polaris_types::AppEvent;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::support::{FakeTranslator, TestState};
use crate::io::run_clipboard_watcher;

/// Plays back a list of clipboard contents, then keeps the last one
struct Playback {
    queue: VecDeque<&'static str>,
    current: &'static str,
}

impl Playback {
    fn new(texts: &[&'static str]) -> Self {
        Self {
            queue: texts.iter().copied().collect(),
            current: "",
        }
    }
}

impl ClipboardSource for Playback {
    fn read_text(&mut self) -> anyhow::Result<String> {
        if let Some(next) = self.queue.pop_front() {
            self.current = next;
        }
        Ok(self.current.to_string())
    }
}

#[tokio::test]
async fn test_watcher_translates_new_japanese_text_only() {
    let translator = FakeTranslator::ok();
    let mut test_state = TestState::new().translator(translator.clone());
    test_state.config.clipboard.poll_interval_ms = 10;
    let state = test_state.build();

    let (backend, ui) = relay();
    let cancel = CancellationToken::new();
    let source = Playback::new(&["hello", "猫", "猫", "hello", "犬"]);
    let watcher = tokio::spawn(run_clipboard_watcher(
        state,
        backend.pusher(),
        source,
        cancel.clone(),
    ));

    let mut completed = Vec::new();
    while completed.len() < 2 {
        let event = timeout(Duration::from_secs(2), ui.next_event())
            .await
            .expect("watcher went quiet")
            .unwrap();
        if let AppEvent::TranslationUpdate(update) = event
            && let Some(translation) = update.translation
        {
            completed.push(translation);
        }
    }
    completed.sort();
    assert_eq!(completed, vec!["EN[犬]".to_string(), "EN[猫]".to_string()]);

    cancel.cancel();
    let result = timeout(Duration::from_secs(2), watcher).await.unwrap().unwrap();
    assert!(result.is_ok());

    let texts: Vec<String> = translator
        .calls
        .lock()
        .unwrap()
        .iter()
        .map(|(text, ..)| text.clone())
        .collect();
    assert_eq!(texts.len(), 2, "{texts:?}");
}
