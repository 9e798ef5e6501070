//! Voice agent: transcript in, fill instruction out.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};
use voxform_config::ProviderConfig;
use voxform_protocols::{
    ChatProvider, ChatRequest, FillAction, FillInstruction, InterpretError, InterpretRequest,
    ProviderError, TranscriptInterpreter, ValueType,
};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Confidence assumed when the model leaves it out.
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are an intelligent form-filling assistant. Analyze voice commands and return JSON only.

Rules:
1. If user says a value (name, number, text), use action: "replace"
2. If user says "add" or "append", use action: "append"
3. If user says "clear", "delete", or "remove", use action: "clear"
4. Extract the actual value from the transcript
5. Determine if it's text, number, date, or email
6. Return confidence 0-1 (higher = more certain)

Examples:
- "John Smith" → {"action": "replace", "value": "John Smith", "type": "text", "confidence": 0.95}
- "add incorporated" → {"action": "append", "value": "incorporated", "type": "text", "confidence": 0.9}
- "clear this field" → {"action": "clear", "value": "", "type": "text", "confidence": 0.95}
- "12345" → {"action": "replace", "value": "12345", "type": "number", "confidence": 0.9}

Return ONLY valid JSON, no other text."#;

/// Body of a voice agent response: the instruction, plus the reason when it
/// had to be degraded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentReply {
    #[serde(flatten)]
    pub instruction: FillInstruction,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentReply {
    pub fn ok(instruction: FillInstruction) -> Self {
        Self {
            instruction,
            error: None,
        }
    }

    pub fn rejected(instruction: FillInstruction, error: impl Into<String>) -> Self {
        Self {
            instruction,
            error: Some(error.into()),
        }
    }
}

/// Prompts a chat provider with a transcript and normalizes its answer.
pub struct VoiceAgent {
    provider: Option<Arc<dyn ChatProvider>>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl VoiceAgent {
    /// Without a provider every request fails upstream and degrades.
    pub fn new(provider: Option<Arc<dyn ChatProvider>>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            max_tokens: 150,
        }
    }

    pub fn from_config(config: &ProviderConfig, provider: Option<Arc<dyn ChatProvider>>) -> Self {
        Self::new(provider)
            .with_model(config.model.clone())
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Answer an endpoint request. Only a missing transcript is an error;
    /// upstream failures come back as the fallback instruction with `error` set.
    pub async fn respond(&self, request: &InterpretRequest) -> Result<AgentReply, InterpretError> {
        match self.complete(request).await {
            Ok(instruction) => Ok(AgentReply::ok(instruction)),
            Err(InterpretError::MissingTranscript) => Err(InterpretError::MissingTranscript),
            Err(e) => {
                error!(error = %e, "Voice agent upstream call failed");
                Ok(AgentReply::rejected(
                    FillInstruction::fallback(request.transcript.clone()),
                    e.to_string(),
                ))
            }
        }
    }

    async fn complete(&self, request: &InterpretRequest) -> Result<FillInstruction, InterpretError> {
        if request.transcript.is_empty() {
            return Err(InterpretError::MissingTranscript);
        }
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| ProviderError::NotConfigured("OPENAI_API_KEY is not set".to_string()))?;

        let system = request
            .prompt
            .as_deref()
            .filter(|prompt| !prompt.is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT);
        let chat = ChatRequest::new(&self.model, system, &request.transcript)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        debug!(provider = provider.id(), transcript = %request.transcript, "Interpreting transcript");
        let output = provider.complete_json(chat).await?;
        Ok(normalize_output(&output, &request.transcript))
    }
}

#[async_trait]
impl TranscriptInterpreter for VoiceAgent {
    async fn interpret(&self, request: InterpretRequest) -> Result<FillInstruction, InterpretError> {
        self.complete(&request).await
    }
}

/// Parse raw model output into an instruction, filling in whatever the
/// model left out. Unparseable output yields the fallback instruction.
pub fn normalize_output(output: &str, transcript: &str) -> FillInstruction {
    let fields = match serde_json::from_str::<Value>(output.trim()) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            warn!(output = %other, "Model output is not a JSON object");
            return FillInstruction::fallback(transcript);
        }
        Err(e) => {
            warn!(error = %e, "Model output is not valid JSON");
            return FillInstruction::fallback(transcript);
        }
    };

    let action = match fields.get("action") {
        Some(action) if is_truthy(action) => {
            serde_json::from_value(action.clone()).unwrap_or(FillAction::Unknown)
        }
        _ => FillAction::Replace,
    };

    let value = match fields.get("value") {
        None => transcript.to_string(),
        Some(Value::Null) => String::new(),
        Some(Value::String(value)) => value.clone(),
        Some(other) => other.to_string(),
    };

    let value_type = match fields.get("type") {
        Some(value_type) if is_truthy(value_type) => {
            serde_json::from_value(value_type.clone()).unwrap_or(ValueType::Other)
        }
        _ => ValueType::Text,
    };

    let confidence = match fields.get("confidence") {
        None => DEFAULT_CONFIDENCE,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(_) => 0.0,
    };

    FillInstruction::new(action, value, confidence).with_type(value_type)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
