use async_trait::async_trait;
use serde_json::Value;

use crate::{
    LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, check_status,
    parse_error,
};

const NAME: &str = "MyMemory";

/// MyMemory public API. Free tier without a key; an email raises the quota.
#[derive(Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    api_url: String,
    email: Option<String>,
}

impl MyMemoryTranslator {
    pub fn new(client: reqwest::Client, api_url: String, email: Option<String>) -> Self {
        Self {
            client,
            api_url,
            email,
        }
    }
}

/// Pull the translation out of a MyMemory response body.
///
/// The API answers HTTP 200 even for failures and reports the real status in
/// `responseStatus`, sometimes as a string.
pub(crate) fn parse_response(json: &Value) -> Result<String, TranslateError> {
    let status = match &json["responseStatus"] {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };

    match status {
        Some(200) => {}
        Some(429) => return Err(TranslateError::RateLimitExceeded),
        Some(401) => return Err(TranslateError::AuthenticationError),
        // 403 is also an unsupported language pair, explained in responseDetails
        other => {
            let details = json["responseDetails"]
                .as_str()
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("status {other:?}"));
            return Err(TranslateError::ApiError(details));
        }
    }

    json["responseData"]["translatedText"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let langpair = format!("{from}|{to}");
        let mut query = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = &self.email {
            query.push(("de", email.as_str()));
        }

        let response = self.client.get(&self.api_url).query(&query).send().await?;
        check_status(response.status())?;

        let json: Value = response.json().await.map_err(parse_error)?;
        let translated_text = parse_response(&json)?;

        Ok(Translation::by(NAME, translated_text, from, to))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: NAME.to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_success() {
        let body = json!({
            "responseData": { "translatedText": "Cat", "match": 1 },
            "responseStatus": 200,
            "responseDetails": ""
        });
        assert_eq!(parse_response(&body).unwrap(), "Cat");
    }

    #[test]
    fn test_parse_string_status() {
        let body = json!({
            "responseData": { "translatedText": "Dog" },
            "responseStatus": "200"
        });
        assert_eq!(parse_response(&body).unwrap(), "Dog");
    }

    #[test]
    fn test_parse_quota_error() {
        let body = json!({
            "responseData": { "translatedText": "MYMEMORY WARNING: YOU USED ALL AVAILABLE FREE TRANSLATIONS" },
            "responseStatus": 429,
            "responseDetails": "MYMEMORY WARNING"
        });
        assert!(matches!(
            parse_response(&body),
            Err(TranslateError::RateLimitExceeded)
        ));
    }

    #[test]
    fn test_parse_invalid_langpair() {
        let body = json!({
            "responseData": { "translatedText": "'XX' IS AN INVALID SOURCE LANGUAGE" },
            "responseStatus": "403",
            "responseDetails": "'XX' IS AN INVALID SOURCE LANGUAGE"
        });
        let err = parse_response(&body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error: 'XX' IS AN INVALID SOURCE LANGUAGE"
        );

        let body = json!({
            "responseStatus": 400,
            "responseDetails": "INVALID LANGUAGE PAIR"
        });
        let err = parse_response(&body).unwrap_err();
        assert_eq!(err.to_string(), "API error: INVALID LANGUAGE PAIR");
    }

    #[test]
    fn test_parse_missing_text() {
        let body = json!({ "responseStatus": 200, "responseData": {} });
        assert!(matches!(
            parse_response(&body),
            Err(TranslateError::ApiError(_))
        ));
    }

    #[test]
    fn test_provider_name_matches_metadata() {
        let translator = MyMemoryTranslator::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/get".to_string(),
            None,
        );
        let translation = Translation::by(NAME, "Cat".into(), "ja".into(), "en".into());
        assert_eq!(translation.provider, translator.metadata().name);
    }
}
