//! Chat completion provider trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A single-turn chat completion that must answer with a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            user: user.into(),
            temperature: 0.3,
            max_tokens: 150,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Backend able to answer a [`ChatRequest`] with raw model output.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn id(&self) -> &str;

    /// Returns the message content of the first choice, untrimmed.
    async fn complete_json(&self, request: ChatRequest) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned;

    #[async_trait]
    impl ChatProvider for Canned {
        fn id(&self) -> &str {
            "canned"
        }

        async fn complete_json(&self, request: ChatRequest) -> Result<String, ProviderError> {
            Ok(format!("{{\"value\":\"{}\"}}", request.user))
        }
    }

    #[test]
    fn test_request_defaults() {
        let request = ChatRequest::new("gpt-4o-mini", "system", "John Smith");
        assert_eq!(request.temperature, 0.3);
        assert_eq!(request.max_tokens, 150);

        let tuned = request.with_temperature(0.0).with_max_tokens(64);
        assert_eq!(tuned.temperature, 0.0);
        assert_eq!(tuned.max_tokens, 64);
    }

    #[tokio::test]
    async fn test_provider_trait_object() {
        let provider: Box<dyn ChatProvider> = Box::new(Canned);
        assert_eq!(provider.id(), "canned");
        let output = provider
            .complete_json(ChatRequest::new("m", "s", "Acme"))
            .await
            .unwrap();
        assert_eq!(output, r#"{"value":"Acme"}"#);
    }
}
