use anyhow::{Context, Result, anyhow};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{error, info};

use crate::domain::value_objects::contact::ContactMessage;

/// Fire-and-forget forwarder for the contact form. Nothing is stored locally;
/// the outcome is only surfaced back to the caller.
pub struct FormspreeClient {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct FormspreeErrorBody {
    #[serde(default)]
    errors: Vec<FormspreeFieldError>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FormspreeFieldError {
    message: String,
}

impl FormspreeClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    pub async fn submit(&self, message: &ContactMessage) -> Result<()> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(message)
            .send()
            .await
            .context("failed to reach form endpoint")?;

        if response.status().is_success() {
            info!("formspree: contact message forwarded");
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if let Ok(parsed) = serde_json::from_str::<FormspreeErrorBody>(&body) {
            let detail = if !parsed.errors.is_empty() {
                parsed
                    .errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join(", ")
            } else if let Some(error) = parsed.error {
                error
            } else {
                status.to_string()
            };
            error!(
                http_status = status.as_u16(),
                detail = %detail,
                "formspree: submission rejected"
            );
            return Err(anyhow!("form submission failed: {}", detail));
        }

        error!(
            http_status = status.as_u16(),
            body = %body,
            "formspree: submission failed with a non-JSON error"
        );
        Err(anyhow!("form submission failed: {}", status))
    }
}
