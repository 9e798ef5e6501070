//! Interaction state shared by region event handlers.

use crate::region::RegionId;
use crate::voice::VoiceCommandInterpreter;

/// Everything a region handler may read or change besides its own state.
#[derive(Debug)]
pub struct InteractionContext {
    focused: Option<RegionId>,
    image_target: Option<RegionId>,
    pub voice: VoiceCommandInterpreter,
}

impl InteractionContext {
    pub fn new(voice: VoiceCommandInterpreter) -> Self {
        Self {
            focused: None,
            image_target: None,
            voice,
        }
    }

    pub fn focused(&self) -> Option<&RegionId> {
        self.focused.as_ref()
    }

    pub fn set_focused(&mut self, region: Option<RegionId>) {
        self.focused = region;
    }

    /// Remember which region the next image attachment goes to.
    pub fn request_image(&mut self, region: RegionId) {
        self.image_target = Some(region);
    }

    pub fn image_target(&self) -> Option<&RegionId> {
        self.image_target.as_ref()
    }

    pub fn take_image_target(&mut self) -> Option<RegionId> {
        self.image_target.take()
    }
}

impl Default for InteractionContext {
    fn default() -> Self {
        Self::new(VoiceCommandInterpreter::default())
    }
}
