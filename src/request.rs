//! Defines the translation request read from the input object and
//! the response document written to the response bucket.

use crate::error::RelayError;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// `Texts` as it may appear in the input document: either a single
/// string or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum Texts {
    Scalar(String),
    Sequence(Vec<String>),
}

impl From<Texts> for Vec<String> {
    fn from(texts: Texts) -> Self {
        match texts {
            Texts::Scalar(text) => vec![text],
            Texts::Sequence(texts) => texts,
        }
    }
}

/// The input document, before presence checks.
#[derive(Deserialize)]
struct RawRequest {
    #[serde(rename = "SourceLanguage", default)]
    source_language: Option<String>,
    #[serde(rename = "TargetLanguages", default)]
    target_languages: Option<Vec<String>>,
    #[serde(rename = "Texts", default)]
    texts: Option<Texts>,
}

/// A validated batch translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_language: String,
    pub target_languages: Vec<String>,
    pub texts: Vec<String>,
}

impl TranslationRequest {
    /// Parse and validate the content of an input object.
    pub fn parse(content: &[u8]) -> Result<Self, RelayError> {
        let raw: RawRequest = serde_json::from_slice(content)?;
        let source_language = raw.source_language.filter(|s| !s.is_empty());
        let target_languages = raw.target_languages.filter(|t| !t.is_empty());
        let texts = raw
            .texts
            .map(Vec::<String>::from)
            .filter(|t| !t.is_empty());
        match (source_language, target_languages, texts) {
            (Some(source_language), Some(target_languages), Some(texts)) => {
                Ok(TranslationRequest {
                    source_language,
                    target_languages,
                    texts,
                })
            }
            _ => Err(RelayError::missing_fields()),
        }
    }
}

/// Translated texts keyed by target language code, in the order
/// targets were first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations(Vec<(String, Vec<String>)>);

impl Translations {
    /// Set the translations for a target. A repeated target keeps its
    /// original position and takes the new values.
    pub fn insert(&mut self, target: String, translated: Vec<String>) {
        match self.0.iter_mut().find(|(code, _)| *code == target) {
            Some(entry) => entry.1 = translated,
            None => self.0.push((target, translated)),
        }
    }

    pub fn get(&self, target: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(code, _)| code == target)
            .map(|(_, translated)| translated.as_slice())
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(code, _)| code.as_str())
    }
}

impl Serialize for Translations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, translated) in &self.0 {
            map.serialize_entry(code, translated)?;
        }
        map.end()
    }
}

/// The document persisted for every handled request.
#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    #[serde(rename = "SourceLanguage")]
    pub source_language: String,
    #[serde(rename = "OriginalTexts")]
    pub original_texts: Vec<String>,
    #[serde(rename = "Translations")]
    pub translations: Translations,
}

impl TranslationResponse {
    pub fn new(request: TranslationRequest, translations: Translations) -> Self {
        TranslationResponse {
            source_language: request.source_language,
            original_texts: request.texts,
            translations,
        }
    }

    /// Serialize as indented JSON. Non-ASCII characters are written
    /// as-is.
    pub fn to_json(&self) -> Result<Vec<u8>, RelayError> {
        serde_json::to_vec_pretty(self).map_err(RelayError::Encoding)
    }
}
