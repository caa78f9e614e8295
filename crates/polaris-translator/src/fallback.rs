use std::sync::Arc;

use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

/// Tries each provider in order until one succeeds
pub struct FallbackTranslator {
    providers: Vec<Arc<dyn Translator>>,
}

impl FallbackTranslator {
    pub fn new(providers: Vec<Arc<dyn Translator>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.metadata().name).collect()
    }
}

#[async_trait]
impl Translator for FallbackTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let mut last_error = None;
        for provider in &self.providers {
            let name = provider.metadata().name;
            match provider.translate(text, from.clone(), to.clone()).await {
                Ok(translation) => {
                    tracing::debug!("{name} translated {} chars", text.chars().count());
                    return Ok(translation);
                }
                Err(e) => {
                    tracing::warn!("Translation error from {name}: {e}");
                    last_error = Some(e);
                }
            }
        }

        let last = last_error
            .unwrap_or_else(|| TranslateError::ApiError("no translation provider".to_string()));
        Err(TranslateError::AllProvidersFailed(Box::new(last)))
    }

    fn metadata(&self) -> ProviderMetadata {
        let names = self.provider_names();
        ProviderMetadata {
            name: names.join(" -> "),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}
