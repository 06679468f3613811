//! Defines a _trigger_, the object whose creation started an
//! invocation. The trigger is built from the S3 event.

use crate::error::RelayError;
use aws_lambda_events::event::s3::S3Event;
use tracing::{instrument, warn};

/// Prefix prepended to the input basename to form the output key.
pub const OUTPUT_KEY_PREFIX: &str = "translated_";

/// The location of a translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub bucket: String,
    pub key: String,
}

/// Decode an object key as it appears in S3 notifications, where
/// spaces are sent as `+` and other characters are percent-escaped.
fn decode_key(raw: &str) -> Result<String, RelayError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| RelayError::Trigger(format!("undecodable object key {:?}: {}", raw, e)))
}

impl Trigger {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Trigger {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Builds the trigger from the first record inside an S3
    /// event. Further records are ignored.
    #[instrument(skip(event))]
    pub fn from_event(event: &S3Event) -> Result<Self, RelayError> {
        let record = event
            .records
            .first()
            .ok_or_else(|| RelayError::Trigger(String::from("event holds no records")))?;
        if event.records.len() > 1 {
            warn!(
                "Event holds {} records; only the first one is processed",
                event.records.len()
            );
        }
        let bucket = record
            .s3
            .bucket
            .name
            .clone()
            .ok_or_else(|| RelayError::Trigger(String::from("record lacks a bucket name")))?;
        let key = record
            .s3
            .object
            .key
            .as_deref()
            .ok_or_else(|| RelayError::Trigger(String::from("record lacks an object key")))
            .and_then(decode_key)?;
        Ok(Trigger { bucket, key })
    }

    /// The key under which the translated document is stored: the
    /// basename of the input key with a fixed prefix.
    pub fn output_key(&self) -> String {
        let basename = self.key.rsplit('/').next().unwrap_or_default();
        format!("{}{}", OUTPUT_KEY_PREFIX, basename)
    }
}
