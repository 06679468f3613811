use anyhow::{Context, Result};
use s3_translation_relay::app::App;
use s3_translation_relay::client;
use s3_translation_relay::trigger::Trigger;
use std::env::var;

/// Relay a single translation request whose location is given
/// through the environment, printing the outcome.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    let app = App::from_env()?;

    let bucket = var(&app.settings.bucket_var).context(app.settings.bucket_var.clone())?;
    let key = var(&app.settings.key_var).context(app.settings.key_var.clone())?;
    let trigger = Trigger::new(bucket, key);

    let outcome = app
        .handle(&trigger, client::s3().await, client::translate().await)
        .await
        .with_context(|| format!("Failed to handle trigger {:?}", &trigger))?;
    println!("{}", serde_json::to_string(&outcome)?);

    Ok(())
}
