use async_trait::async_trait;
use serde_json::Value;

use crate::{
    LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, check_status,
    parse_error,
};

const NAME: &str = "DeepL";

#[derive(Clone)]
pub struct DeeplTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeeplTranslator {
    pub fn new(client: reqwest::Client, api_key: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }

    async fn post(&self, params: &[(&str, &str)]) -> Result<Value, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(params)
            .send()
            .await?;
        check_status(response.status())?;

        response.json().await.map_err(parse_error)
    }
}

fn first_translation<'a>(json: &'a Value, field: &str) -> Option<&'a str> {
    json["translations"].get(0).and_then(|t| t[field].as_str())
}

#[async_trait]
impl Translator for DeeplTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let source = from.to_uppercase();
        let target = to.to_uppercase();
        let json = self
            .post(&[
                ("text", text),
                ("source_lang", source.as_str()),
                ("target_lang", target.as_str()),
            ])
            .await?;

        let translated_text = first_translation(&json, "text")
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation::by(NAME, translated_text.to_string(), from, to))
    }

    async fn detect_language(&self, text: &str) -> Result<LanguageCode, TranslateError> {
        let json = self.post(&[("text", text), ("target_lang", "EN")]).await?;

        let detected = first_translation(&json, "detected_source_language")
            .ok_or_else(|| TranslateError::ApiError("No detected language".to_string()))?;

        Ok(detected.to_lowercase())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: NAME.to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}
