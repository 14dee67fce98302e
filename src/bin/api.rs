use std::sync::Arc;

use drawbrief::api::{AppState, function_handler};
use drawbrief::core::config::AppConfig;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    drawbrief::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let state = Arc::new(AppState::new(config).map_err(|e| {
        error!("Failed to initialize bot: {}", e);
        Error::from(format!("Failed to initialize bot: {e}"))
    })?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let state = Arc::clone(&state);
        async move { function_handler(&state, event).await }
    }))
    .await
}
