use super::{EventOutcome, Region, RegionId, RegionKind};
use crate::context::InteractionContext;
use crate::dom::NodeId;

/// An `<img>` that can be replaced by clicking it.
#[derive(Debug, Clone)]
pub struct ImageSlot {
    id: RegionId,
    node: NodeId,
    placeholder: bool,
}

impl ImageSlot {
    pub fn new(id: RegionId, node: NodeId, placeholder: bool) -> Self {
        Self {
            id,
            node,
            placeholder,
        }
    }

    /// Whether the slot renders the "add image" placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

impl Region for ImageSlot {
    fn id(&self) -> &RegionId {
        &self.id
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn kind(&self) -> RegionKind {
        RegionKind::ImageSlot
    }

    fn on_focus(&mut self, _ctx: &mut InteractionContext) -> EventOutcome {
        EventOutcome::Ignored
    }

    fn on_blur(&mut self, _ctx: &mut InteractionContext) -> EventOutcome {
        EventOutcome::Ignored
    }

    fn on_activate_voice(&mut self, _ctx: &mut InteractionContext) -> EventOutcome {
        EventOutcome::Ignored
    }

    fn on_click(&mut self, ctx: &mut InteractionContext) -> EventOutcome {
        self.on_attach_image(ctx)
    }

    fn freeze(&mut self) {
        self.placeholder = false;
    }
}
