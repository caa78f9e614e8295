use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::{
    LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, check_status,
    parse_error,
};

const NAME: &str = "LibreTranslate";

#[derive(Clone)]
pub struct LibreTranslateTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

impl LibreTranslateTranslator {
    pub fn new(client: reqwest::Client, api_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }
}

/// Translation from a reply body. The server's `error` message wins over
/// the bare HTTP status.
pub(crate) fn parse_response(status: StatusCode, body: &str) -> Result<String, TranslateError> {
    let json = serde_json::from_str::<Value>(body);

    let error = json.as_ref().ok().and_then(|j| j["error"].as_str());
    match error {
        Some(_) if status == StatusCode::TOO_MANY_REQUESTS => {
            return Err(TranslateError::RateLimitExceeded);
        }
        Some(error) => return Err(TranslateError::ApiError(error.to_string())),
        None => check_status(status)?,
    }

    let json = json.map_err(parse_error)?;
    json["translatedText"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))
}

#[async_trait]
impl Translator for LibreTranslateTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let body = TranslateRequest {
            q: text,
            source: &from,
            target: &to,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self.client.post(&self.api_url).json(&body).send().await?;
        let status = response.status();
        let reply = response.text().await?;
        let translated_text = parse_response(status, &reply)?;

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
    fn test_request_body() {
        let body = TranslateRequest {
            q: "ねこ",
            source: "ja",
            target: "en",
            format: "text",
            api_key: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "q": "ねこ", "source": "ja", "target": "en", "format": "text" })
        );
    }

    #[test]
    fn test_parse_response() {
        assert_eq!(
            parse_response(StatusCode::OK, r#"{ "translatedText": "cat" }"#).unwrap(),
            "cat"
        );

        let err = parse_response(StatusCode::OK, r#"{ "error": "Invalid API key" }"#).unwrap_err();
        assert_eq!(err.to_string(), "API error: Invalid API key");
    }

    #[test]
    fn test_error_message_kept_on_http_failure() {
        let body = r#"{ "error": "ja is not supported" }"#;
        let err = parse_response(StatusCode::BAD_REQUEST, body).unwrap_err();
        assert_eq!(err.to_string(), "API error: ja is not supported");

        let body = r#"{ "error": "Visit https://portal.libretranslate.com to get an API key" }"#;
        let err = parse_response(StatusCode::FORBIDDEN, body).unwrap_err();
        assert!(err.to_string().contains("get an API key"));

        let body = r#"{ "error": "Slowdown: 30 per 1 minute" }"#;
        assert!(matches!(
            parse_response(StatusCode::TOO_MANY_REQUESTS, body),
            Err(TranslateError::RateLimitExceeded)
        ));
    }

    #[test]
    fn test_http_failure_without_body() {
        let err = parse_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), "API error: HTTP 502 Bad Gateway");

        assert!(matches!(
            parse_response(StatusCode::UNAUTHORIZED, ""),
            Err(TranslateError::AuthenticationError)
        ));
        assert!(parse_response(StatusCode::OK, "not json").is_err());
    }

    #[test]
    fn test_provider_name_matches_metadata() {
        let translator = LibreTranslateTranslator::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/translate".to_string(),
            None,
        );
        let translation = Translation::by(NAME, "cat".into(), "ja".into(), "en".into());
        assert_eq!(translation.provider, translator.metadata().name);
    }
}
