//! HTTP client for the moderation endpoint.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::error::ModerationError;
use crate::core::config::Settings;

#[derive(Serialize)]
struct ModerationRequest<'a> {
    model: &'a str,
    input: &'a str,
}

/// Sends single inputs to `{base_url}/moderations`.
///
/// Responses are returned untyped: the whole body is kept as written by the
/// provider so it can be persisted verbatim.
pub struct ModerationClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ModerationClient {
    pub fn new(settings: &Settings, api_key: impl Into<String>) -> Result<Self, ModerationError> {
        let http = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self {
            http,
            endpoint: format!(
                "{}/moderations",
                settings.provider.base_url.trim_end_matches('/')
            ),
            model: settings.provider.model.clone(),
            api_key: api_key.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Submits `input` and returns the decoded response body.
    pub async fn moderate(&self, input: &str) -> Result<Value, ModerationError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&ModerationRequest {
                model: &self.model,
                input,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ModerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        log::debug!("moderation endpoint answered {}", status);
        Ok(resp.json::<Value>().await?)
    }
}

/// Reads `results[0].flagged` from a moderation response, if present.
pub fn flagged(response: &Value) -> Option<bool> {
    response
        .get("results")?
        .get(0)?
        .get("flagged")?
        .as_bool()
}
