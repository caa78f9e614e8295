use std::sync::LazyLock;

use regex::Regex;

/// Hiragana, katakana and the CJK unified ideographs block
static JAPANESE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{3040}-\u{309F}\u{30A0}-\u{30FF}\u{4E00}-\u{9FAF}]").unwrap());

static ENGLISH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[a-zA-Z\s.,!?;:'"()\-]+$"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Japanese,
    English,
    Unknown,
}

impl Language {
    /// Code understood by the translation providers
    pub fn code(&self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::English => "en",
            Language::Unknown => "auto",
        }
    }
}

pub fn contains_japanese(text: &str) -> bool {
    JAPANESE.is_match(text)
}

pub fn is_japanese_char(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FAF}')
}

/// Rough guess from character classes, enough to pick a translation direction
pub fn detect_language(text: &str) -> Language {
    if contains_japanese(text) {
        Language::Japanese
    } else if ENGLISH.is_match(text) {
        Language::English
    } else {
        Language::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_japanese() {
        assert!(contains_japanese("ひらがな"));
        assert!(contains_japanese("カタカナ"));
        assert!(contains_japanese("漢字"));
        assert!(contains_japanese("mixed 日本 text"));
        assert!(!contains_japanese("plain english"));
        assert!(!contains_japanese("한국어"));
        assert!(!contains_japanese(""));
    }

    #[test]
    fn test_block_edges() {
        assert!(contains_japanese("\u{3040}"));
        assert!(contains_japanese("\u{30FF}"));
        assert!(contains_japanese("\u{9FAF}"));
        assert!(!contains_japanese("\u{9FB0}"));
        assert!(!contains_japanese("\u{303F}"));
    }

    #[test]
    fn test_char_check_agrees_with_regex() {
        for c in ['あ', 'ア', '語', 'a', '\u{9FB0}', '。'] {
            assert_eq!(is_japanese_char(c), contains_japanese(&c.to_string()), "{c}");
        }
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("こんにちは"), Language::Japanese);
        assert_eq!(detect_language("Hello, world!"), Language::English);
        assert_eq!(detect_language("Grüße"), Language::Unknown);
        assert_eq!(detect_language("1234"), Language::Unknown);
        assert_eq!(Language::Unknown.code(), "auto");
    }
}
