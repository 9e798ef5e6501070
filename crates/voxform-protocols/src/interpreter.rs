//! Transcript interpreter trait.

use async_trait::async_trait;

use crate::error::InterpretError;
use crate::fill::{FillInstruction, InterpretRequest};

/// Turns a finalized voice transcript into a [`FillInstruction`].
///
/// Implementations report failures as errors; callers decide how to degrade
/// (the form engine substitutes [`FillInstruction::fallback`]).
#[async_trait]
pub trait TranscriptInterpreter: Send + Sync {
    async fn interpret(&self, request: InterpretRequest) -> Result<FillInstruction, InterpretError>;
}
