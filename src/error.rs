//! Defines the failure categories of a relay invocation.

use thiserror::Error;

/// Boxed cause carried by errors that wrap an SDK failure.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every way a single relay invocation can fail. None of these are
/// recovered locally; they are logged and handed back to the runtime.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The notification didn't name an object.
    #[error("invalid trigger event: {0}")]
    Trigger(String),

    /// The object content isn't a JSON translation request.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// A required request field is missing or empty.
    #[error("{0}")]
    Validation(String),

    #[error("object {key:?} not found in bucket {bucket:?}")]
    NotFound { bucket: String, key: String },

    #[error("access denied to object {key:?} in bucket {bucket:?}")]
    Access {
        bucket: String,
        key: String,
        #[source]
        source: Cause,
    },

    #[error("unsupported language pair {source_code:?} -> {target_code:?}")]
    UnsupportedLanguage {
        source_code: String,
        target_code: String,
        #[source]
        source: Cause,
    },

    #[error("translation service rate limit exceeded")]
    RateLimit(#[source] Cause),

    #[error("{context}")]
    Service {
        context: String,
        #[source]
        source: Cause,
    },

    #[error("missing configuration: {0}")]
    Configuration(String),

    /// The response document couldn't be encoded.
    #[error("failed to encode the translation response: {0}")]
    Encoding(#[source] serde_json::Error),
}

impl RelayError {
    /// Build a `Validation` error with the message used for any absent
    /// request field.
    pub fn missing_fields() -> Self {
        RelayError::Validation(String::from(
            "Input JSON must include SourceLanguage, TargetLanguages, and Texts",
        ))
    }
}
