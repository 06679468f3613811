//! Defines the global service clients. Both are built on first use
//! and reused by every later invocation in the same process.

use crate::conf::aws_service_config;
use tokio::sync::OnceCell;

/// Global S3 client instance.
static S3: OnceCell<aws_sdk_s3::Client> = OnceCell::const_new();

/// Global Translate client instance.
static TRANSLATE: OnceCell<aws_sdk_translate::Client> = OnceCell::const_new();

/// Get the S3 client, initializing it if needed.
pub async fn s3() -> &'static aws_sdk_s3::Client {
    S3.get_or_init(|| async { aws_sdk_s3::Client::new(aws_service_config().await) })
        .await
}

/// Get the Translate client, initializing it if needed.
pub async fn translate() -> &'static aws_sdk_translate::Client {
    TRANSLATE
        .get_or_init(|| async { aws_sdk_translate::Client::new(aws_service_config().await) })
        .await
}
