//! OpenAI provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use voxform_protocols::error::ProviderError;
use voxform_protocols::provider::{ChatProvider, ChatRequest};

use crate::api::{ApiMessage, ApiRequest, ApiResponse, ResponseFormat};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat completion provider.
pub struct OpenAIProvider {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, DEFAULT_API_URL.to_string())
    }

    /// Create provider with custom API URL (for OpenAI-compatible APIs).
    pub fn with_url(api_key: String, api_url: String) -> Self {
        Self {
            api_key,
            api_url,
            client: reqwest::Client::new(),
        }
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ProviderError> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Ok(self)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_request(&self, request: &ChatRequest) -> ApiRequest {
        ApiRequest {
            model: request.model.clone(),
            messages: vec![
                ApiMessage::system(request.system.clone()),
                ApiMessage::user(request.user.clone()),
            ],
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
            response_format: Some(ResponseFormat::json_object()),
        }
    }

    async fn send_request(&self, api_request: &ApiRequest) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError { status, message: text });
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatProvider for OpenAIProvider {
    fn id(&self) -> &str {
        "openai"
    }

    async fn complete_json(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let api_request = self.build_request(&request);
        let response = self.send_request(&api_request).await?;
        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyCompletion)?;
        debug!(
            model = api_response.model.as_deref().unwrap_or(request.model.as_str()),
            finish_reason = choice.finish_reason.as_deref().unwrap_or("unknown"),
            "Completion received"
        );
        choice.message.content.ok_or(ProviderError::EmptyCompletion)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
