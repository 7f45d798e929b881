use crate::{
    config::GeminiConfig,
    error::{MarkitError, Result},
    gemini::traits::ImageBackend,
    models::{
        gemini::{GenerateContentRequest, GenerateContentResponse},
        GeneratedImage, RequestPart,
    },
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl ImageClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                MarkitError::ConfigError("GEMINI_API_KEY environment variable not set".into())
            })?;

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| MarkitError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            endpoint: config.generate_content_url(),
        })
    }

    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("gemini-2.5-flash-image", "Gemini 2.5 Flash Image", "Google"),
            (
                "gemini-2.0-flash-preview-image-generation",
                "Gemini 2.0 Flash Image Preview",
                "Google",
            ),
        ]
    }

    pub async fn generate(&self, parts: Vec<RequestPart>) -> Result<GeneratedImage> {
        let request = GenerateContentRequest::image_output(parts);

        log::debug!("Requesting image from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MarkitError::ResponseError(e.to_string()))?;

        if !status.is_success() {
            return Err(MarkitError::RequestError(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| MarkitError::ResponseError(e.to_string()))?;

        parsed.first_image().ok_or(MarkitError::NoImageData)
    }
}

#[async_trait]
impl ImageBackend for ImageClient {
    async fn generate_image(&self, parts: Vec<RequestPart>) -> Result<GeneratedImage> {
        self.generate(parts).await
    }
}
