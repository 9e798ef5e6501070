//! Image attachment: embedding uploaded files into regions.

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info};

use crate::context::InteractionContext;
use crate::dom::Document;
use crate::region::{RegionId, RegionKind, RegionRouter};
use crate::transform::PLACEHOLDER_STYLE;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Style of an image inserted into a text field.
pub const INSERTED_IMAGE_STYLE: &str = "max-width: 100%; height: auto; display: block; margin: 10px 0;";

/// A file chosen by the user.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Media type from the declared content type, else sniffed from the bytes.
    pub fn mime_type(&self) -> String {
        if let Some(content_type) = self
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            return content_type.to_string();
        }
        image::guess_format(&self.bytes)
            .map(|format| format.to_mime_type().to_string())
            .unwrap_or_else(|_| FALLBACK_MIME.to_string())
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }
}

/// Region identifier to embedded image payload.
#[derive(Debug, Clone, Default)]
pub struct UploadedImages {
    entries: HashMap<RegionId, String>,
}

impl UploadedImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, region: RegionId, data_url: String) {
        self.entries.insert(region, data_url);
    }

    pub fn get(&self, region: &RegionId) -> Option<&str> {
        self.entries.get(region).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, &str)> + '_ {
        self.entries.iter().map(|(id, url)| (id, url.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// An image slot got a new source.
    Replaced(RegionId),
    /// A text field now holds the image and is frozen.
    Inserted(RegionId),
    /// No target or an empty file.
    Ignored,
}

/// Places uploaded images into the region awaiting one.
#[derive(Debug, Default)]
pub struct ImageAttachmentHandler;

impl ImageAttachmentHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn attach(
        &self,
        doc: &mut Document,
        regions: &mut RegionRouter,
        ctx: &mut InteractionContext,
        images: &mut UploadedImages,
        file: &ImageFile,
    ) -> AttachOutcome {
        let Some(target) = ctx.take_image_target() else {
            debug!("Image received without a target");
            return AttachOutcome::Ignored;
        };
        if file.bytes.is_empty() {
            debug!(region = %target, "Empty image file ignored");
            return AttachOutcome::Ignored;
        }
        let Some(region) = regions.get_mut(&target) else {
            debug!(region = %target, "Image target no longer exists");
            return AttachOutcome::Ignored;
        };

        let data_url = file.to_data_url();
        let node = region.node();
        let outcome = match region.kind() {
            RegionKind::ImageSlot => {
                doc.set_attr(node, "src", data_url.as_str());
                doc.set_attr(node, "alt", file.name.as_str());
                doc.update_style(node, |style| {
                    for (property, value) in PLACEHOLDER_STYLE {
                        if style.get(property) == Some(value) {
                            style.remove(property);
                        }
                    }
                });
                AttachOutcome::Replaced(target.clone())
            }
            RegionKind::Field => {
                doc.clear_children(node);
                let img = doc.create_element(
                    "img",
                    &[
                        ("src", data_url.as_str()),
                        ("alt", file.name.as_str()),
                        ("style", INSERTED_IMAGE_STYLE),
                    ],
                );
                doc.append_child(node, img);
                doc.set_attr(node, "contenteditable", "false");
                doc.set_style_property(node, "cursor", "pointer");
                AttachOutcome::Inserted(target.clone())
            }
        };
        region.freeze();
        images.insert(target.clone(), data_url);

        info!(region = %target, file = %file.name, bytes = file.bytes.len(), "Image attached");
        outcome
    }
}

#[cfg(test)]
#[path = "image_tests.rs"]
mod tests;
