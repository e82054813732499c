use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use backend_domain::ports::ExtractionService;
use backend_domain::RuntimeConfig;

const PROMPT: &str = "Analyze the receipt image. Extract data according to the provided JSON \
schema. The receipt may be in Hebrew or English. Infer the category from the product name. \
If a field is not found, return null.";

/// Extraction client for the Generative Language API. Sends the prompt, the
/// caller's schema, and the image as inline base64 JPEG, requesting a JSON
/// response body.
pub struct GeminiExtractionService {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiExtractionService {
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.gemini_endpoint.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }
}

#[async_trait]
impl ExtractionService for GeminiExtractionService {
    async fn extract(&self, image: &[u8], schema: &Value) -> Result<Value> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("gemini_api_key is not configured"))?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, api_key
        );

        let body = json!({
            "generationConfig": { "responseMimeType": "application/json" },
            "contents": [{
                "parts": [
                    { "text": PROMPT },
                    { "text": schema.to_string() },
                    { "inlineData": { "mimeType": "image/jpeg", "data": BASE64.encode(image) } }
                ]
            }]
        });

        debug!("calling extraction model {}", self.model);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let payload: Value = response.json().await?;
        parse_generate_content(&payload)
    }
}

/// The API wraps its answer as candidates -> content -> parts -> text; the
/// text itself is the JSON document we asked for.
fn parse_generate_content(payload: &Value) -> Result<Value> {
    let text = payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| anyhow!("no text part in provider response"))?;
    serde_json::from_str(text).context("provider returned non-JSON text")
}
