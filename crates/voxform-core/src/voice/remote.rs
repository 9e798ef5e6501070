use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use voxform_protocols::{FillInstruction, InterpretError, InterpretRequest, TranscriptInterpreter};

/// Interpreter backed by a voice agent endpoint over HTTP.
///
/// The response body is parsed as a [`FillInstruction`] whatever the status
/// code; a rejected request still carries a zero-confidence instruction.
#[derive(Debug, Clone)]
pub struct RemoteInterpreter {
    client: Client,
    endpoint: String,
}

impl RemoteInterpreter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranscriptInterpreter for RemoteInterpreter {
    async fn interpret(&self, request: InterpretRequest) -> Result<FillInstruction, InterpretError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| InterpretError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InterpretError::Transport(e.to_string()))?;
        debug!(status = %status, "Voice agent responded");

        serde_json::from_str(&body).map_err(|e| InterpretError::Malformed(e.to_string()))
    }
}
