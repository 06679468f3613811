//! Defines configuration as read from the environment.

use crate::error::RelayError;
use aws_config::SdkConfig;
use serde::Deserialize;
use std::env;
use tokio::sync::OnceCell;

/// Default `bucket_var` value.
fn default_bucket_var() -> String {
    String::from("BUCKET")
}

/// Default `key_var` value.
fn default_key_var() -> String {
    String::from("KEY")
}

/// The relay reads a translation request from the triggering bucket
/// and writes the translated document to a response bucket. The
/// configuration must be given as environment variables.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Defines the bucket that receives the translated documents.
    pub response_bucket: String,

    /// The environment variable holding the source bucket name, read
    /// by the one-shot command.
    #[serde(default = "default_bucket_var")]
    pub bucket_var: String,

    /// The environment variable holding the source object key, read
    /// by the one-shot command.
    #[serde(default = "default_key_var")]
    pub key_var: String,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, RelayError> {
        envy::from_env().map_err(|e| RelayError::Configuration(e.to_string()))
    }

    /// Read settings from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, RelayError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars).map_err(|e| RelayError::Configuration(e.to_string()))
    }
}

/// Normalize an endpoint override so that it always carries a scheme.
fn endpoint_with_scheme(endpoint_url: String) -> String {
    if endpoint_url.starts_with("http://") || endpoint_url.starts_with("https://") {
        endpoint_url
    } else {
        format!("https://{}", endpoint_url)
    }
}

/// Shared AWS configuration, loaded once per process.
static AWS_CONFIG: OnceCell<SdkConfig> = OnceCell::const_new();

/// Get the AWS configuration used by every service client, loading
/// it on first use. Honors `AWS_ENDPOINT_URL` for local stacks.
pub async fn aws_service_config() -> &'static SdkConfig {
    AWS_CONFIG
        .get_or_init(|| async {
            if let Ok(endpoint_url) = env::var("AWS_ENDPOINT_URL") {
                aws_config::from_env()
                    .endpoint_url(endpoint_with_scheme(endpoint_url))
                    .region("us-east-1") // should be OK since the endpoint was overridden
                    .load()
                    .await
            } else {
                aws_config::from_env().load().await
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_response_bucket_and_defaults() {
        let settings = Settings::from_vars(vars(&[("RESPONSE_BUCKET", "out-bucket")])).unwrap();
        assert_eq!(settings.response_bucket, "out-bucket");
        assert_eq!(settings.bucket_var, "BUCKET");
        assert_eq!(settings.key_var, "KEY");
    }

    #[test]
    fn overrides_variable_names() {
        let settings = Settings::from_vars(vars(&[
            ("RESPONSE_BUCKET", "out-bucket"),
            ("BUCKET_VAR", "SRC_BUCKET"),
            ("KEY_VAR", "SRC_KEY"),
        ]))
        .unwrap();
        assert_eq!(settings.bucket_var, "SRC_BUCKET");
        assert_eq!(settings.key_var, "SRC_KEY");
    }

    #[test]
    fn missing_response_bucket_is_a_configuration_error() {
        let result = Settings::from_vars(vars(&[("BUCKET_VAR", "SRC_BUCKET")]));
        assert!(matches!(result, Err(RelayError::Configuration(_))));
    }

    #[test]
    fn endpoint_defaults_to_https() {
        assert_eq!(
            endpoint_with_scheme(String::from("localhost:4566")),
            "https://localhost:4566"
        );
        assert_eq!(
            endpoint_with_scheme(String::from("http://localhost:4566")),
            "http://localhost:4566"
        );
    }
}
