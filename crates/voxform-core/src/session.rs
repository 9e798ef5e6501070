//! A loaded form and everything attached to it.

use std::time::Instant;

use serde::Serialize;
use tracing::info;
use voxform_protocols::{FillInstruction, InterpretRequest, TranscriptInterpreter};

use crate::context::InteractionContext;
use crate::dom::Document;
use crate::error::FormError;
use crate::image::{AttachOutcome, ImageAttachmentHandler, ImageFile, UploadedImages};
use crate::region::{EventOutcome, RegionEvent, RegionId, RegionKind, RegionRouter, RegionState};
use crate::transform::{EditableTransformer, TransformReport};
use crate::voice::{
    DEFAULT_CONFIDENCE_THRESHOLD, PendingCommand, VoiceCommandInterpreter, interpret_with_fallback,
};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub confidence_threshold: f64,
    /// System prompt forwarded with every voice request.
    pub prompt: Option<String>,
    pub voice_available: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            prompt: None,
            voice_available: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    /// 1-based position in document registration order.
    pub index: usize,
    pub id: RegionId,
    pub kind: RegionKind,
    pub state: RegionState,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSummary {
    pub file_name: String,
    pub regions: Vec<RegionSummary>,
}

/// Result of one voice round trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceOutcome {
    pub region: RegionId,
    pub transcript: String,
    pub instruction: FillInstruction,
    pub applied: bool,
}

/// The single active form: document, regions, uploaded images and
/// interaction state. Replaced wholesale by the next upload.
#[derive(Debug)]
pub struct FormSession {
    file_name: String,
    document: Document,
    regions: RegionRouter,
    images: UploadedImages,
    context: InteractionContext,
    transformer: EditableTransformer,
    attachments: ImageAttachmentHandler,
}

impl FormSession {
    /// Parse uploaded markup and convert its blanks into regions.
    pub fn load(
        file_name: impl Into<String>,
        html: &str,
        options: SessionOptions,
    ) -> Result<Self, FormError> {
        let file_name = file_name.into();
        let mut voice = VoiceCommandInterpreter::new(options.confidence_threshold);
        if let Some(prompt) = options.prompt {
            voice = voice.with_prompt(prompt);
        }
        if !options.voice_available {
            voice = voice.without_recognition();
        }

        let mut session = Self {
            file_name,
            document: Document::parse(html),
            regions: RegionRouter::new(),
            images: UploadedImages::new(),
            context: InteractionContext::new(voice),
            transformer: EditableTransformer::new()?,
            attachments: ImageAttachmentHandler::new(),
        };
        let report = session.retransform()?;
        info!(
            file = %session.file_name,
            bytes = html.len(),
            regions = report.total(),
            "Form loaded"
        );
        Ok(session)
    }

    /// Run the transformer again; already registered nodes are left alone.
    pub fn retransform(&mut self) -> Result<TransformReport, FormError> {
        self.transformer.transform(&mut self.document, &mut self.regions)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn regions(&self) -> &RegionRouter {
        &self.regions
    }

    pub fn images(&self) -> &UploadedImages {
        &self.images
    }

    pub fn context(&self) -> &InteractionContext {
        &self.context
    }

    /// Identifier of the region at a 1-based summary index.
    pub fn region_at(&self, index: usize) -> Option<RegionId> {
        let position = index.checked_sub(1)?;
        self.regions.iter().nth(position).map(|region| region.id().clone())
    }

    /// Current text of a region.
    pub fn text(&self, id: &RegionId) -> Option<String> {
        let region = self.regions.get(id)?;
        Some(self.document.text_content(region.node()))
    }

    pub fn summary(&self) -> FormSummary {
        let regions = self
            .regions
            .iter()
            .enumerate()
            .map(|(position, region)| RegionSummary {
                index: position + 1,
                id: region.id().clone(),
                kind: region.kind(),
                state: region.state(),
                text: self.document.text_content(region.node()).trim().to_string(),
            })
            .collect();
        FormSummary {
            file_name: self.file_name.clone(),
            regions,
        }
    }

    pub fn dispatch(&mut self, id: &RegionId, event: RegionEvent) -> Result<EventOutcome, FormError> {
        self.regions.dispatch(id, event, &mut self.context)
    }

    /// Direct typing into a field.
    pub fn set_text(&mut self, id: &RegionId, text: &str) -> Result<(), FormError> {
        let region = self
            .regions
            .get(id)
            .ok_or_else(|| FormError::RegionNotFound(id.to_string()))?;
        if region.kind() != RegionKind::Field {
            return Err(FormError::NotATextRegion(id.to_string()));
        }
        if region.is_frozen() {
            return Err(FormError::RegionFrozen(id.to_string()));
        }
        let node = region.node();
        self.document.set_text_content(node, text);
        Ok(())
    }

    /// Hand a recognized transcript to the voice interpreter.
    pub fn finalize_transcript(&mut self, transcript: &str) -> Option<PendingCommand> {
        self.context.voice.finalize(transcript)
    }

    pub fn voice_request(&self, pending: &PendingCommand) -> InterpretRequest {
        self.context.voice.request(pending)
    }

    pub fn apply_instruction(
        &mut self,
        pending: PendingCommand,
        instruction: FillInstruction,
    ) -> VoiceOutcome {
        let applied =
            self.context
                .voice
                .apply(&pending, &instruction, &mut self.document, &mut self.regions);
        VoiceOutcome {
            region: pending.target,
            transcript: pending.transcript,
            instruction,
            applied,
        }
    }

    pub fn recognition_failed(&mut self, error: &str) {
        self.context.voice.fail(error);
    }

    /// Finalize, interpret and apply in one step. Holds `&mut self` across
    /// the interpreter call, so servers use the three steps separately.
    pub async fn handle_transcript(
        &mut self,
        interpreter: &dyn TranscriptInterpreter,
        transcript: &str,
    ) -> Option<VoiceOutcome> {
        let pending = self.finalize_transcript(transcript)?;
        let request = self.voice_request(&pending);
        let instruction = interpret_with_fallback(interpreter, request).await;
        Some(self.apply_instruction(pending, instruction))
    }

    /// Target a region and attach a file to it.
    pub fn attach_image(&mut self, id: &RegionId, file: &ImageFile) -> Result<AttachOutcome, FormError> {
        self.dispatch(id, RegionEvent::AttachImage)?;
        Ok(self.receive_image(file))
    }

    /// Attach a file to whichever region is awaiting one.
    pub fn receive_image(&mut self, file: &ImageFile) -> AttachOutcome {
        self.attachments.attach(
            &mut self.document,
            &mut self.regions,
            &mut self.context,
            &mut self.images,
            file,
        )
    }

    /// Markup of the form as the user sees it, with focus and cue styling.
    pub fn live_view(&self) -> Result<String, FormError> {
        self.live_view_at(Instant::now())
    }

    pub fn live_view_at(&self, now: Instant) -> Result<String, FormError> {
        let mut view = self.document.clone();
        for region in self.regions.iter() {
            region.decorate(&mut view, now);
        }
        Ok(view.to_html()?)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
