//! Voice command interpreter.
//!
//! Drives one recognition session at a time through
//! `idle -> listening -> interpreting -> idle`. The remote interpretation
//! step is split out ([`interpret_with_fallback`]) so callers can run it
//! without holding the form session lock.

mod remote;

use std::time::Instant;

use tracing::{debug, info, warn};
use voxform_protocols::{FillAction, FillInstruction, InterpretRequest, TranscriptInterpreter};

use crate::dom::Document;
use crate::region::{Cue, RegionId, RegionKind, RegionRouter};

pub use remote::RemoteInterpreter;

/// Confidence an instruction must exceed to be applied.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening { target: RegionId },
    Interpreting { target: RegionId },
}

/// A finalized transcript waiting for interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub target: RegionId,
    pub transcript: String,
}

#[derive(Debug)]
pub struct VoiceCommandInterpreter {
    state: VoiceState,
    available: bool,
    threshold: f64,
    prompt: Option<String>,
}

impl Default for VoiceCommandInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl VoiceCommandInterpreter {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: VoiceState::Idle,
            available: true,
            threshold,
            prompt: None,
        }
    }

    /// Mark speech recognition as unavailable; every activation is ignored.
    pub fn without_recognition(mut self) -> Self {
        self.available = false;
        self
    }

    /// System prompt sent with every request instead of the server default.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn state(&self) -> &VoiceState {
        &self.state
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start listening for `target`. Returns `false` when recognition is
    /// unavailable or a session is already active.
    pub fn listen(&mut self, target: RegionId) -> bool {
        if !self.available {
            debug!(region = %target, "Speech recognition unavailable");
            return false;
        }
        if self.state != VoiceState::Idle {
            debug!(region = %target, "Recognition already active, ignoring activation");
            return false;
        }
        info!(region = %target, "Listening");
        self.state = VoiceState::Listening { target };
        true
    }

    /// Hand over the recognized transcript. Ignored unless listening.
    pub fn finalize(&mut self, transcript: impl Into<String>) -> Option<PendingCommand> {
        let VoiceState::Listening { target } = &self.state else {
            debug!("Transcript received while not listening");
            return None;
        };
        let target = target.clone();
        self.state = VoiceState::Interpreting {
            target: target.clone(),
        };
        Some(PendingCommand {
            target,
            transcript: transcript.into(),
        })
    }

    /// Recognition engine failure. The region is left untouched.
    pub fn fail(&mut self, error: &str) {
        warn!(error = %error, state = ?self.state, "Speech recognition failed");
        self.state = VoiceState::Idle;
    }

    /// Build the interpretation request for a pending command.
    pub fn request(&self, pending: &PendingCommand) -> InterpretRequest {
        let request = InterpretRequest::new(pending.transcript.clone());
        match &self.prompt {
            Some(prompt) => request.with_prompt(prompt.clone()),
            None => request,
        }
    }

    /// Apply an instruction to the pending target and return to idle.
    ///
    /// Returns whether the region content changed hands. Instructions at or
    /// below the threshold, unknown actions, frozen or missing targets are
    /// all no-ops.
    pub fn apply(
        &mut self,
        pending: &PendingCommand,
        instruction: &FillInstruction,
        doc: &mut Document,
        regions: &mut RegionRouter,
    ) -> bool {
        self.state = VoiceState::Idle;

        if !instruction.is_confident(self.threshold) {
            debug!(
                region = %pending.target,
                confidence = instruction.confidence,
                threshold = self.threshold,
                "Instruction below confidence threshold"
            );
            return false;
        }

        let Some(region) = regions.get_mut(&pending.target) else {
            debug!(region = %pending.target, "Voice target no longer exists");
            return false;
        };
        if region.kind() != RegionKind::Field || region.is_frozen() {
            return false;
        }

        let node = region.node();
        let current = doc.text_content(node);
        let Some(content) = fill_content(&current, instruction) else {
            debug!(region = %pending.target, "Unknown fill action ignored");
            return false;
        };

        doc.set_text_content(node, &content);
        region.signal(Cue::success(Instant::now()));
        info!(region = %pending.target, action = ?instruction.action, "Voice instruction applied");
        true
    }
}

/// New region content for an instruction, or `None` for unknown actions.
pub fn fill_content(current: &str, instruction: &FillInstruction) -> Option<String> {
    match instruction.action {
        FillAction::Replace => Some(instruction.value.clone()),
        FillAction::Append => Some(format!("{} {}", current, instruction.value).trim().to_string()),
        FillAction::Clear => Some(String::new()),
        FillAction::Unknown => None,
    }
}

/// Ask the interpreter, degrading to [`FillInstruction::fallback`] on any failure.
pub async fn interpret_with_fallback(
    interpreter: &dyn TranscriptInterpreter,
    request: InterpretRequest,
) -> FillInstruction {
    let transcript = request.transcript.clone();
    match interpreter.interpret(request).await {
        Ok(instruction) => instruction,
        Err(e) => {
            warn!(error = %e, "Interpretation failed, using raw transcript");
            FillInstruction::fallback(transcript)
        }
    }
}

#[cfg(test)]
#[path = "voice_tests.rs"]
mod tests;
