//! Editable regions and the event router.
//!
//! Every addressable part of a live form is a [`Region`]: text fields created
//! by the transformer and image slots that accept click-to-replace. The
//! [`RegionRouter`] owns all of them and dispatches [`RegionEvent`]s with an
//! explicit [`InteractionContext`](crate::context::InteractionContext).

mod field;
mod image_slot;
mod router;

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::InteractionContext;
use crate::dom::{Document, NodeId};

pub use field::FieldRegion;
pub use image_slot::ImageSlot;
pub use router::RegionRouter;

/// Attribute holding a field region's identifier.
pub const EDITABLE_ID_ATTR: &str = "data-editable-id";
/// Attribute holding the text a field had before conversion.
pub const ORIGINAL_ATTR: &str = "data-original";
/// Attribute holding an image slot's identifier.
pub const IMAGE_ID_ATTR: &str = "data-image-id";
/// Class added to every field region.
pub const EDITABLE_CLASS: &str = "editable";

pub const FOCUS_OUTLINE: &str = "2px solid #00aaff";
pub const FOCUS_BACKGROUND: &str = "#e6f7ff";
pub const LISTENING_BORDER: &str = "2px dashed #ff6b6b";
pub const SUCCESS_BACKGROUND: &str = "#e9ffe9";

/// How long the listening cue stays on a region.
pub const LISTENING_CUE: Duration = Duration::from_secs(3);
/// How long the success flash stays on a region.
pub const SUCCESS_FLASH: Duration = Duration::from_millis(800);

/// Unique region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    /// Allocate a fresh `<prefix>-<uuid>` identifier.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RegionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Field,
    ImageSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionState {
    #[default]
    Live,
    /// An image was inserted; text edits and voice are ignored.
    Frozen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionEvent {
    Focus,
    Blur,
    ActivateVoice,
    AttachImage,
    Click,
}

/// What a region did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    Focused,
    Blurred,
    Listening,
    AwaitingImage,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    Listening,
    Success,
}

/// Transient visual cue with an expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    pub kind: CueKind,
    pub expires_at: Instant,
}

impl Cue {
    pub fn listening(now: Instant) -> Self {
        Self {
            kind: CueKind::Listening,
            expires_at: now + LISTENING_CUE,
        }
    }

    pub fn success(now: Instant) -> Self {
        Self {
            kind: CueKind::Success,
            expires_at: now + SUCCESS_FLASH,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// An addressable part of the live form.
pub trait Region: Send + Sync + fmt::Debug {
    fn id(&self) -> &RegionId;

    fn node(&self) -> NodeId;

    fn kind(&self) -> RegionKind;

    fn state(&self) -> RegionState {
        RegionState::Live
    }

    fn is_frozen(&self) -> bool {
        self.state() == RegionState::Frozen
    }

    fn on_focus(&mut self, ctx: &mut InteractionContext) -> EventOutcome;

    fn on_blur(&mut self, ctx: &mut InteractionContext) -> EventOutcome;

    fn on_activate_voice(&mut self, ctx: &mut InteractionContext) -> EventOutcome;

    /// Make this region the target of the next image attachment.
    fn on_attach_image(&mut self, ctx: &mut InteractionContext) -> EventOutcome {
        ctx.request_image(self.id().clone());
        EventOutcome::AwaitingImage
    }

    fn on_click(&mut self, ctx: &mut InteractionContext) -> EventOutcome;

    /// Mark the region as holding an image.
    fn freeze(&mut self) {}

    /// Start a transient cue.
    fn signal(&mut self, _cue: Cue) {}

    /// Render focus and cue styling into a live-view copy of the document.
    fn decorate(&self, _doc: &mut Document, _now: Instant) {}
}

#[cfg(test)]
#[path = "region_tests.rs"]
mod tests;
