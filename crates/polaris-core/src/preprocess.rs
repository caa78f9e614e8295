use unicode_normalization::UnicodeNormalization;

use crate::script::is_japanese_char;

pub trait Preprocessor {
    fn process(&self, text: &str) -> String {
        text.trim().to_string()
    }
}

/// Clipboard text is only trimmed before translation
pub struct ClipboardPreprocessor;
impl Preprocessor for ClipboardPreprocessor {}

/// Cleanup for recognizer output
pub struct OcrPreprocessor;

impl Preprocessor for OcrPreprocessor {
    fn process(&self, text: &str) -> String {
        // NFKC folds half-width katakana and full-width latin
        let text: String = text.nfkc().collect();

        text.lines()
            .map(|line| join_japanese(line.trim()))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Drop whitespace runs sitting between two Japanese characters
fn join_japanese(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            let start = i;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            let prev = start.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i).copied();
            let between_japanese = prev.is_some_and(is_japanese_char) && next.is_some_and(is_japanese_char);
            if !between_japanese {
                out.extend(&chars[start..i]);
            }
            continue;
        }
        out.push(c);
        i += 1;
    }

    out
}
