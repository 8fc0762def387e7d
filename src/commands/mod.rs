use crate::api::{ModerationClient, RunError, RunSummary};
use crate::core::config::Settings;

pub mod moderate;

/// Resolves the API key, builds the client and runs the batch.
pub async fn dispatch(settings: &Settings) -> Result<RunSummary, RunError> {
    let api_key = settings.api_key()?;
    let client = ModerationClient::new(settings, api_key).map_err(RunError::Client)?;
    moderate::run(settings, &client).await
}
