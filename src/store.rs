//! Defines the object storage interface and its S3 implementation.

use crate::error::RelayError;
use async_trait::async_trait;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

/// Key-addressed storage holding the requests and the responses.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Retrieve the full content of an object.
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RelayError>;

    /// Write or overwrite an object.
    async fn store(&self, bucket: &str, key: &str, content: Vec<u8>) -> Result<(), RelayError>;
}

/// Map an S3 failure onto the relay's error categories.
fn classify<E>(error: SdkError<E>, bucket: &str, key: &str, context: String) -> RelayError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    match error.code() {
        Some("NoSuchKey") | Some("NotFound") => RelayError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        Some("AccessDenied") | Some("Forbidden") | Some("AllAccessDisabled") => {
            RelayError::Access {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source: Box::new(error),
            }
        }
        _ => RelayError::Service {
            context,
            source: Box::new(error),
        },
    }
}

#[async_trait]
impl ObjectStore for Client {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RelayError> {
        let output = self
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                classify(
                    e,
                    bucket,
                    key,
                    format!("Failed to download object {:?} from bucket {:?}", key, bucket),
                )
            })?;
        let content = output
            .body
            .collect()
            .await
            .map_err(|e| RelayError::Service {
                context: format!(
                    "Failed to read the contents of remote object {:?} from bucket {:?}",
                    key, bucket
                ),
                source: Box::new(e),
            })?;
        Ok(content.into_bytes().to_vec())
    }

    async fn store(&self, bucket: &str, key: &str, content: Vec<u8>) -> Result<(), RelayError> {
        self.put_object()
            .bucket(bucket)
            .key(key)
            .content_type("application/json")
            .body(ByteStream::from(content))
            .send()
            .await
            .map_err(|e| {
                classify(
                    e,
                    bucket,
                    key,
                    format!("Failed to upload remote object {:?} in bucket {:?}", key, bucket),
                )
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::operation::get_object::GetObjectError;
    use aws_sdk_s3::operation::put_object::PutObjectError;
    use aws_sdk_s3::primitives::SdkBody;
    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_smithy_types::error::ErrorMetadata;

    fn raw(status: u16) -> http::Response<SdkBody> {
        http::Response::builder()
            .status(status)
            .body(SdkBody::empty())
            .unwrap()
    }

    fn with_code(code: &str) -> ErrorMetadata {
        ErrorMetadata::builder()
            .code(code)
            .message("from the test")
            .build()
    }

    fn classify_get(err: GetObjectError, status: u16) -> RelayError {
        classify(
            SdkError::service_error(err, raw(status)),
            "requests",
            "in/r.json",
            String::from("get failed"),
        )
    }

    #[test]
    fn missing_object_is_not_found() {
        let err = GetObjectError::NoSuchKey(
            NoSuchKey::builder().meta(with_code("NoSuchKey")).build(),
        );
        match classify_get(err, 404) {
            RelayError::NotFound { bucket, key } => {
                assert_eq!(bucket, "requests");
                assert_eq!(key, "in/r.json");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(matches!(
            classify_get(GetObjectError::generic(with_code("NotFound")), 404),
            RelayError::NotFound { .. }
        ));
    }

    #[test]
    fn denied_access_codes_are_access_errors() {
        for code in ["AccessDenied", "Forbidden", "AllAccessDisabled"] {
            let result = classify_get(GetObjectError::generic(with_code(code)), 403);
            assert!(
                matches!(result, RelayError::Access { .. }),
                "expected an access error for {}",
                code
            );
        }
    }

    #[test]
    fn denied_upload_is_an_access_error() {
        let result = classify(
            SdkError::service_error(PutObjectError::generic(with_code("AccessDenied")), raw(403)),
            "responses",
            "translated_r.json",
            String::from("put failed"),
        );
        assert!(matches!(result, RelayError::Access { .. }));
    }

    #[test]
    fn other_codes_are_service_errors() {
        match classify_get(GetObjectError::generic(with_code("SlowDown")), 503) {
            RelayError::Service { context, .. } => assert_eq!(context, "get failed"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
