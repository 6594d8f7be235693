use anyhow::{Context, Result, anyhow, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::value_objects::generations::InputImage;

const TEXT_TO_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
const TRY_ON_MODEL: &str = "gemini-2.5-flash-image";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Minimal Google Generative Language client built on reqwest.
///
/// Two generation paths, matching what the storefront offers: plain
/// text-to-image through the Imagen predict endpoint, and "try-on"
/// generation that sends the uploaded product photos as inline parts.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidatePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetails {
    code: Option<i64>,
    status: Option<String>,
    message: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Generates `count` images for the prompt, routing through the try-on
    /// model when product photos are supplied. Returns data URLs.
    pub async fn generate_images(
        &self,
        prompt: &str,
        count: u32,
        input_images: &[InputImage],
    ) -> Result<Vec<String>> {
        let images = if input_images.is_empty() {
            self.text_to_image(prompt, count).await?
        } else {
            self.try_on(prompt, count, input_images).await?
        };

        if images.is_empty() {
            bail!("the model did not return any images");
        }
        Ok(images)
    }

    async fn text_to_image(&self, prompt: &str, count: u32) -> Result<Vec<String>> {
        let url = format!(
            "{}/v1beta/models/{}:predict",
            self.base_url, TEXT_TO_IMAGE_MODEL
        );
        let body = json!({
            "instances": [{ "prompt": prompt }],
            "parameters": {
                "sampleCount": count,
                "outputMimeType": "image/jpeg",
                "aspectRatio": "1:1",
            },
        });

        debug!(model = TEXT_TO_IMAGE_MODEL, count, "gemini: predict request");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .context("failed to reach generation API")?;

        if !response.status().is_success() {
            return Err(self.api_error(response).await);
        }

        let parsed: PredictResponse = response
            .json()
            .await
            .context("failed to decode predict response")?;

        Ok(parsed
            .predictions
            .into_iter()
            .filter_map(|p| {
                let data = p.bytes_base64_encoded?;
                let mime = p.mime_type.unwrap_or_else(|| "image/jpeg".to_string());
                Some(format!("data:{};base64,{}", mime, data))
            })
            .collect())
    }

    async fn try_on(
        &self,
        prompt: &str,
        count: u32,
        input_images: &[InputImage],
    ) -> Result<Vec<String>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, TRY_ON_MODEL
        );

        let mut parts = Vec::with_capacity(input_images.len() + 1);
        for image in input_images {
            // Reject malformed payloads before spending a call on them.
            BASE64
                .decode(&image.data_base64)
                .map_err(|_| anyhow!("input image is not valid base64"))?;
            parts.push(json!({
                "inline_data": {
                    "mime_type": image.mime_type,
                    "data": image.data_base64,
                },
            }));
        }
        parts.push(json!({ "text": prompt }));

        let body = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": { "responseModalities": ["IMAGE"] },
        });

        debug!(
            model = TRY_ON_MODEL,
            count,
            input_images = input_images.len(),
            "gemini: generateContent requests"
        );

        let mut images = Vec::new();
        for _ in 0..count {
            let response = self
                .http
                .post(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .header(CONTENT_TYPE, "application/json")
                .json(&body)
                .send()
                .await
                .context("failed to reach generation API")?;

            if !response.status().is_success() {
                return Err(self.api_error(response).await);
            }

            let parsed: GenerateContentResponse = response
                .json()
                .await
                .context("failed to decode generateContent response")?;

            for candidate in parsed.candidates {
                let Some(content) = candidate.content else {
                    continue;
                };
                for part in content.parts {
                    let Some(inline) = part.inline_data else {
                        continue;
                    };
                    if let Some(data) = inline.data {
                        let mime = inline.mime_type.unwrap_or_else(|| "image/png".to_string());
                        images.push(format!("data:{};base64,{}", mime, data));
                    }
                }
            }
        }

        Ok(images)
    }

    async fn api_error(&self, response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(&body) {
            error!(
                http_status = status.as_u16(),
                api_code = ?envelope.error.code,
                api_status = ?envelope.error.status,
                api_message = ?envelope.error.message,
                "gemini: generation API returned an error"
            );
            return anyhow!(
                "generation API error: {}",
                envelope
                    .error
                    .message
                    .unwrap_or_else(|| status.to_string())
            );
        }

        error!(
            http_status = status.as_u16(),
            body = %body,
            "gemini: generation API returned a non-JSON error"
        );
        anyhow!("generation API error: {}", status)
    }
}
