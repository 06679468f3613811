use anyhow::anyhow;
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use s3_translation_relay::app::{App, Outcome};
use s3_translation_relay::client;
use s3_translation_relay::error::RelayError;
use s3_translation_relay::trigger::Trigger;
use tracing::error;

/// Log a failure that happened before the relay took over.
fn logged(e: RelayError) -> RelayError {
    error!("Error processing file: {}", e);
    e
}

/// Relay the object named by the first record of the S3 event
async fn function_handler(event: LambdaEvent<S3Event>) -> Result<Outcome, Error> {
    let trigger = Trigger::from_event(&event.payload).map_err(logged)?;
    let app = App::from_env().map_err(logged)?;
    Ok(app
        .handle(&trigger, client::s3().await, client::translate().await)
        .await?)
}

/// Run an AWS Lambda function that listens to S3 events announcing
/// translation requests, translates them through Amazon Translate,
/// and stores the results in the response bucket.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    run(service_fn(function_handler))
        .await
        .map_err(|e| anyhow!("{:?}", e))
}
