use std::time::Instant;

use tracing::debug;

use super::{
    Cue, CueKind, EventOutcome, FOCUS_BACKGROUND, FOCUS_OUTLINE, LISTENING_BORDER, Region,
    RegionId, RegionKind, RegionState, SUCCESS_BACKGROUND,
};
use crate::context::InteractionContext;
use crate::dom::{Document, NodeId};

/// A text region created by the transformer.
#[derive(Debug, Clone)]
pub struct FieldRegion {
    id: RegionId,
    node: NodeId,
    original: String,
    state: RegionState,
    focused: bool,
    cue: Option<Cue>,
}

impl FieldRegion {
    pub fn new(id: RegionId, node: NodeId, original: impl Into<String>) -> Self {
        Self {
            id,
            node,
            original: original.into(),
            state: RegionState::Live,
            focused: false,
            cue: None,
        }
    }

    pub fn with_state(mut self, state: RegionState) -> Self {
        self.state = state;
        self
    }

    /// Text the node held before conversion.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn cue(&self) -> Option<Cue> {
        self.cue
    }
}

impl Region for FieldRegion {
    fn id(&self) -> &RegionId {
        &self.id
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn kind(&self) -> RegionKind {
        RegionKind::Field
    }

    fn state(&self) -> RegionState {
        self.state
    }

    fn on_focus(&mut self, ctx: &mut InteractionContext) -> EventOutcome {
        self.focused = true;
        ctx.set_focused(Some(self.id.clone()));
        EventOutcome::Focused
    }

    fn on_blur(&mut self, ctx: &mut InteractionContext) -> EventOutcome {
        self.focused = false;
        if ctx.focused() == Some(&self.id) {
            ctx.set_focused(None);
        }
        EventOutcome::Blurred
    }

    fn on_activate_voice(&mut self, ctx: &mut InteractionContext) -> EventOutcome {
        if self.is_frozen() {
            debug!(region = %self.id, "Voice ignored on frozen region");
            return EventOutcome::Ignored;
        }
        if !ctx.voice.listen(self.id.clone()) {
            return EventOutcome::Ignored;
        }
        self.cue = Some(Cue::listening(Instant::now()));
        EventOutcome::Listening
    }

    fn on_click(&mut self, ctx: &mut InteractionContext) -> EventOutcome {
        if self.is_frozen() {
            return self.on_attach_image(ctx);
        }
        self.on_focus(ctx)
    }

    fn freeze(&mut self) {
        self.state = RegionState::Frozen;
        self.cue = None;
    }

    fn signal(&mut self, cue: Cue) {
        self.cue = Some(cue);
    }

    fn decorate(&self, doc: &mut Document, now: Instant) {
        let cue = self.cue.filter(|cue| cue.is_active(now));
        if !self.focused && cue.is_none() {
            return;
        }
        doc.update_style(self.node, |style| {
            if self.focused {
                style.set("outline", FOCUS_OUTLINE);
                style.set("background-color", FOCUS_BACKGROUND);
            }
            match cue.map(|cue| cue.kind) {
                Some(CueKind::Listening) => style.set("border", LISTENING_BORDER),
                Some(CueKind::Success) => style.set("background-color", SUCCESS_BACKGROUND),
                None => {}
            }
        });
    }
}
