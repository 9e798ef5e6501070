//! Fill instructions: how a transcript should mutate an editable region.

use serde::{Deserialize, Serialize};

/// Confidence attached to the degraded instruction used when interpretation fails.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Mutation to apply to a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillAction {
    /// Region content becomes the value.
    Replace,
    /// Value is appended after a single space.
    Append,
    /// Region content is emptied.
    Clear,
    /// Anything the model made up. Applying it is a no-op.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Kind of value the model believes it extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Text,
    Number,
    Date,
    Email,
    #[serde(other)]
    Other,
}

/// Structured result of interpreting a voice transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillInstruction {
    #[serde(default)]
    pub action: FillAction,

    #[serde(default)]
    pub value: String,

    #[serde(rename = "type", default)]
    pub value_type: ValueType,

    /// Model confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,
}

impl FillInstruction {
    pub fn new(action: FillAction, value: impl Into<String>, confidence: f64) -> Self {
        Self {
            action,
            value: value.into(),
            value_type: ValueType::Text,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn replace(value: impl Into<String>, confidence: f64) -> Self {
        Self::new(FillAction::Replace, value, confidence)
    }

    pub fn append(value: impl Into<String>, confidence: f64) -> Self {
        Self::new(FillAction::Append, value, confidence)
    }

    pub fn clear(confidence: f64) -> Self {
        Self::new(FillAction::Clear, "", confidence)
    }

    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Degraded instruction used whenever interpretation cannot complete:
    /// the raw transcript replaces the region content.
    pub fn fallback(transcript: impl Into<String>) -> Self {
        Self::replace(transcript, FALLBACK_CONFIDENCE)
    }

    /// Instruction returned alongside a rejected request without transcript.
    pub fn missing_transcript() -> Self {
        Self::replace("", 0.0)
    }

    /// Whether the instruction clears the (strict) confidence gate.
    pub fn is_confident(&self, threshold: f64) -> bool {
        self.confidence > threshold
    }
}

/// Request sent to an interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretRequest {
    /// Optional system instruction overriding the built-in prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    pub transcript: String,
}

impl InterpretRequest {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            prompt: None,
            transcript: transcript.into(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

#[cfg(test)]
#[path = "fill_tests.rs"]
mod tests;
