//! Defines the translation service interface and its Amazon
//! Translate implementation.

use crate::error::RelayError;
use async_trait::async_trait;
use aws_sdk_translate::error::SdkError;
use aws_sdk_translate::operation::translate_text::TranslateTextError;
use aws_sdk_translate::Client;

/// A service turning a text from one language into another.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_code: &str,
        target_code: &str,
    ) -> Result<String, RelayError>;
}

/// Map a Translate failure onto the relay's error categories.
fn classify(
    error: SdkError<TranslateTextError>,
    source_code: &str,
    target_code: &str,
) -> RelayError {
    match error.into_service_error() {
        err @ TranslateTextError::UnsupportedLanguagePairException(_) => {
            RelayError::UnsupportedLanguage {
                source_code: source_code.to_string(),
                target_code: target_code.to_string(),
                source: Box::new(err),
            }
        }
        err @ TranslateTextError::TooManyRequestsException(_) => {
            RelayError::RateLimit(Box::new(err))
        }
        err => RelayError::Service {
            context: format!(
                "Failed to translate text from {:?} to {:?}",
                source_code, target_code
            ),
            source: Box::new(err),
        },
    }
}

#[async_trait]
impl Translator for Client {
    async fn translate(
        &self,
        text: &str,
        source_code: &str,
        target_code: &str,
    ) -> Result<String, RelayError> {
        let output = self
            .translate_text()
            .text(text)
            .source_language_code(source_code)
            .target_language_code(target_code)
            .send()
            .await
            .map_err(|e| classify(e, source_code, target_code))?;
        output
            .translated_text()
            .map(String::from)
            .ok_or_else(|| RelayError::Service {
                context: format!(
                    "Translation from {:?} to {:?} returned no text",
                    source_code, target_code
                ),
                source: "empty TranslatedText".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::primitives::SdkBody;
    use aws_sdk_translate::types::error::{
        InternalServerException, TooManyRequestsException, UnsupportedLanguagePairException,
    };

    fn service_error(err: TranslateTextError, status: u16) -> SdkError<TranslateTextError> {
        let raw = http::Response::builder()
            .status(status)
            .body(SdkBody::empty())
            .unwrap();
        SdkError::service_error(err, raw)
    }

    #[test]
    fn unsupported_pair_names_the_languages() {
        let err = TranslateTextError::UnsupportedLanguagePairException(
            UnsupportedLanguagePairException::builder()
                .message("Unsupported language pair: en to xx")
                .build(),
        );
        match classify(service_error(err, 400), "en", "xx") {
            RelayError::UnsupportedLanguage {
                source_code,
                target_code,
                ..
            } => {
                assert_eq!(source_code, "en");
                assert_eq!(target_code, "xx");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn throttling_is_a_rate_limit() {
        let err = TranslateTextError::TooManyRequestsException(
            TooManyRequestsException::builder()
                .message("Rate exceeded")
                .build(),
        );
        assert!(matches!(
            classify(service_error(err, 429), "en", "fr"),
            RelayError::RateLimit(_)
        ));
    }

    #[test]
    fn other_failures_are_service_errors() {
        let err = TranslateTextError::InternalServerException(
            InternalServerException::builder()
                .message("Internal failure")
                .build(),
        );
        assert!(matches!(
            classify(service_error(err, 500), "en", "fr"),
            RelayError::Service { .. }
        ));
    }
}
