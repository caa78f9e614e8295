use std::sync::Arc;
use std::time::Duration;

use polaris_config::ProviderKind;
use polaris_config::translator::TranslatorConfig;
use reqwest::StatusCode;

mod deepl;
mod fallback;
mod libretranslate;
mod mymemory;

pub use deepl::DeeplTranslator;
pub use fallback::FallbackTranslator;
pub use libretranslate::LibreTranslateTranslator;
pub use mymemory::MyMemoryTranslator;

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Detect language of text. Providers without a detection endpoint use
    /// the local script check.
    async fn detect_language(&self, text: &str) -> Result<LanguageCode, TranslateError> {
        Ok(polaris_core::script::detect_language(text).code().to_string())
    }

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

impl Translation {
    /// Result of `provider`, named as in its metadata
    pub(crate) fn by(provider: &str, text: String, from: LanguageCode, to: LanguageCode) -> Self {
        Self {
            text,
            from,
            to,
            provider: provider.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("No text provided for translation")]
    EmptyInput,

    #[error("Translation failed: {0}")]
    AllProvidersFailed(Box<TranslateError>),
}

/// Map a non-success HTTP status to an error
pub(crate) fn check_status(status: StatusCode) -> Result<(), TranslateError> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(TranslateError::RateLimitExceeded);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(TranslateError::AuthenticationError);
    }
    Err(TranslateError::ApiError(format!("HTTP {status}")))
}

pub(crate) fn parse_error(e: impl std::fmt::Display) -> TranslateError {
    TranslateError::ApiError(format!("Failed to parse response: {e}"))
}

pub fn http_client(timeout: Duration) -> Result<reqwest::Client, TranslateError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Build the provider chain described by `config`
pub fn from_config(config: &TranslatorConfig) -> Result<FallbackTranslator, TranslateError> {
    let client = http_client(Duration::from_secs(config.timeout_seconds))?;

    let providers = config
        .effective_providers()
        .into_iter()
        .map(|kind| -> Arc<dyn Translator> {
            match kind {
                ProviderKind::MyMemory => Arc::new(MyMemoryTranslator::new(
                    client.clone(),
                    config.mymemory_url.clone(),
                    config.mymemory_email.clone(),
                )),
                ProviderKind::LibreTranslate => Arc::new(LibreTranslateTranslator::new(
                    client.clone(),
                    config.libretranslate_url.clone(),
                    config.libretranslate_api_key.clone(),
                )),
                ProviderKind::Deepl => Arc::new(DeeplTranslator::new(
                    client.clone(),
                    config.deepl_api_key.clone(),
                    config.deepl_url.clone(),
                )),
            }
        })
        .collect();

    Ok(FallbackTranslator::new(providers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(matches!(
            check_status(StatusCode::TOO_MANY_REQUESTS),
            Err(TranslateError::RateLimitExceeded)
        ));
        assert!(matches!(
            check_status(StatusCode::UNAUTHORIZED),
            Err(TranslateError::AuthenticationError)
        ));
        assert!(matches!(
            check_status(StatusCode::FORBIDDEN),
            Err(TranslateError::AuthenticationError)
        ));

        let err = check_status(StatusCode::BAD_GATEWAY).unwrap_err();
        assert_eq!(err.to_string(), "API error: HTTP 502 Bad Gateway");
    }

    #[test]
    fn test_chain_from_config() {
        let config = TranslatorConfig::default();
        let chain = from_config(&config).unwrap();
        assert_eq!(chain.provider_names(), vec!["MyMemory", "LibreTranslate"]);

        let config = TranslatorConfig {
            deepl_api_key: "key".to_string(),
            ..TranslatorConfig::default()
        };
        let chain = from_config(&config).unwrap();
        assert_eq!(
            chain.provider_names(),
            vec!["DeepL", "MyMemory", "LibreTranslate"]
        );
    }

    #[test]
    fn test_all_failed_message() {
        let err = TranslateError::AllProvidersFailed(Box::new(TranslateError::RateLimitExceeded));
        assert_eq!(err.to_string(), "Translation failed: Rate limit exceeded");
        assert_eq!(
            TranslateError::EmptyInput.to_string(),
            "No text provided for translation"
        );
    }
}
