use std::collections::HashMap;

use tracing::debug;

use super::{EventOutcome, Region, RegionEvent, RegionId, RegionKind};
use crate::context::InteractionContext;
use crate::dom::NodeId;
use crate::error::FormError;

/// Owns every region of a form, in the order they were registered.
///
/// Registration is the single record of which nodes are already converted;
/// the transformer consults it instead of probing attributes.
#[derive(Debug, Default)]
pub struct RegionRouter {
    regions: Vec<Box<dyn Region>>,
    by_id: HashMap<RegionId, usize>,
    by_node: HashMap<NodeId, usize>,
}

impl RegionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, region: Box<dyn Region>) -> Result<(), FormError> {
        if self.by_id.contains_key(region.id()) {
            return Err(FormError::DuplicateRegion(region.id().to_string()));
        }
        let index = self.regions.len();
        self.by_id.insert(region.id().clone(), index);
        self.by_node.insert(region.node(), index);
        self.regions.push(region);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn contains(&self, id: &RegionId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.by_node.contains_key(&node)
    }

    pub fn get(&self, id: &RegionId) -> Option<&dyn Region> {
        self.by_id.get(id).map(|index| self.regions[*index].as_ref())
    }

    pub fn get_mut(&mut self, id: &RegionId) -> Option<&mut (dyn Region + 'static)> {
        let index = *self.by_id.get(id)?;
        self.regions.get_mut(index).map(|region| region.as_mut())
    }

    pub fn by_node(&self, node: NodeId) -> Option<&dyn Region> {
        self.by_node.get(&node).map(|index| self.regions[*index].as_ref())
    }

    /// All regions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Region> + '_ {
        self.regions.iter().map(|region| region.as_ref())
    }

    /// Text regions in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &dyn Region> + '_ {
        self.iter().filter(|region| region.kind() == RegionKind::Field)
    }

    /// Route an event to a region.
    ///
    /// Focusing a region blurs the previously focused one first.
    pub fn dispatch(
        &mut self,
        id: &RegionId,
        event: RegionEvent,
        ctx: &mut InteractionContext,
    ) -> Result<EventOutcome, FormError> {
        let index = *self
            .by_id
            .get(id)
            .ok_or_else(|| FormError::RegionNotFound(id.to_string()))?;

        if event == RegionEvent::Focus {
            if let Some(previous) = ctx.focused().cloned() {
                if &previous != id {
                    if let Some(previous_index) = self.by_id.get(&previous).copied() {
                        self.regions[previous_index].on_blur(ctx);
                    }
                }
            }
        }

        let region = &mut self.regions[index];
        let outcome = match event {
            RegionEvent::Focus => region.on_focus(ctx),
            RegionEvent::Blur => region.on_blur(ctx),
            RegionEvent::ActivateVoice => region.on_activate_voice(ctx),
            RegionEvent::AttachImage => region.on_attach_image(ctx),
            RegionEvent::Click => region.on_click(ctx),
        };
        debug!(region = %id, ?event, ?outcome, "Region event dispatched");
        Ok(outcome)
    }
}
