use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    MyMemory,
    LibreTranslate,
    Deepl,
}

fn default_providers() -> Vec<ProviderKind> {
    vec![ProviderKind::MyMemory, ProviderKind::LibreTranslate]
}

fn default_source_lang() -> String {
    "ja".to_string()
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_mymemory_url() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_libretranslate_url() -> String {
    "https://libretranslate.de/translate".to_string()
}

fn default_deepl_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Providers tried in order; later ones are fallbacks
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderKind>,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default = "default_mymemory_url")]
    pub mymemory_url: String,
    /// Optional contact address, raises the MyMemory daily quota
    pub mymemory_email: Option<String>,
    #[serde(default = "default_libretranslate_url")]
    pub libretranslate_url: String,
    pub libretranslate_api_key: Option<String>,
    #[serde(default = "default_deepl_url")]
    pub deepl_url: String,
    /// DeepL is put first in the chain when a key is present
    #[serde(default)]
    pub deepl_api_key: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            mymemory_url: default_mymemory_url(),
            mymemory_email: None,
            libretranslate_url: default_libretranslate_url(),
            libretranslate_api_key: None,
            deepl_url: default_deepl_url(),
            deepl_api_key: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl TranslatorConfig {
    /// Provider chain with DeepL prepended when a key is configured
    pub fn effective_providers(&self) -> Vec<ProviderKind> {
        let mut providers = self.providers.clone();
        if !self.deepl_api_key.is_empty() && !providers.contains(&ProviderKind::Deepl) {
            providers.insert(0, ProviderKind::Deepl);
        }
        providers
    }
}
