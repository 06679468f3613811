//! Defines the relay itself: fetch a request, translate it, store
//! the response.

use crate::conf::Settings;
use crate::error::RelayError;
use crate::request::{TranslationRequest, TranslationResponse, Translations};
use crate::store::ObjectStore;
use crate::translate::Translator;
use crate::trigger::Trigger;
use serde::Serialize;
use tracing::{error, info, instrument};

/// Status marker of a handled trigger.
pub const SUCCESS: &str = "success";

/// What a successful invocation reports back to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub status: String,
    #[serde(rename = "file")]
    pub output_key: String,
}

/// An App is the relay bound to its settings for one invocation.
pub struct App {
    /// The original settings.
    pub settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        App { settings }
    }

    /// Build an App from the process environment.
    pub fn from_env() -> Result<Self, RelayError> {
        Settings::from_env().map(App::new)
    }

    /// Handle an invocation trigger. Failures are logged and returned
    /// untouched; nothing is written unless every translation
    /// succeeded.
    #[instrument(skip(self, store, translator))]
    pub async fn handle(
        &self,
        trigger: &Trigger,
        store: &dyn ObjectStore,
        translator: &dyn Translator,
    ) -> Result<Outcome, RelayError> {
        self.relay(trigger, store, translator)
            .await
            .map_err(|e| {
                error!("Error processing file: {}", e);
                e
            })
    }

    async fn relay(
        &self,
        trigger: &Trigger,
        store: &dyn ObjectStore,
        translator: &dyn Translator,
    ) -> Result<Outcome, RelayError> {
        info!("Triggered by s3://{}/{}", trigger.bucket, trigger.key);
        let content = store.fetch(&trigger.bucket, &trigger.key).await?;
        let request = TranslationRequest::parse(&content)?;

        let mut translations = Translations::default();
        for target in &request.target_languages {
            let mut translated = Vec::with_capacity(request.texts.len());
            for text in &request.texts {
                translated.push(
                    translator
                        .translate(text, &request.source_language, target)
                        .await?,
                );
            }
            translations.insert(target.clone(), translated);
        }

        let body = TranslationResponse::new(request, translations).to_json()?;
        let output_key = trigger.output_key();
        let bucket = &self.settings.response_bucket;
        store.store(bucket, &output_key, body).await?;
        info!("Uploaded result to s3://{}/{}", bucket, output_key);

        Ok(Outcome {
            status: String::from(SUCCESS),
            output_key,
        })
    }
}
