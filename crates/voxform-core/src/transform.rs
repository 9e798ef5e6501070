//! Converts detected blanks into editable regions.

use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::FieldClassifier;
use crate::dom::{Document, NodeId};
use crate::error::FormError;
use crate::region::{
    EDITABLE_CLASS, EDITABLE_ID_ATTR, FieldRegion, IMAGE_ID_ATTR, ImageSlot, ORIGINAL_ATTR,
    RegionId, RegionRouter, RegionState,
};

/// Tag categories visited by the priority pass, in order.
pub const PRIORITY_TAGS: [&str; 5] = ["th", "td", "p", "span", "div"];

/// A candidate containing any of these is not a leaf field.
const BLOCKING_TAGS: [&str; 8] = ["img", "table", "tr", "th", "td", "p", "span", "div"];

const CELL_TAGS: [&str; 2] = ["th", "td"];

/// Alt text of an image that has nothing to show yet.
pub const PLACEHOLDER_ALT: &str = "Image placeholder - Right-click to add";

/// Styling of an image whose source cannot resolve.
pub const PLACEHOLDER_STYLE: [(&str, &str); 5] = [
    ("border", "2px dashed #ccc"),
    ("background-color", "#f5f5f5"),
    ("display", "inline-block"),
    ("min-width", "100px"),
    ("min-height", "100px"),
];

const FIELD_STYLE_DEFAULTS: [(&str, &str); 3] = [
    ("min-width", "50px"),
    ("min-height", "20px"),
    ("cursor", "text"),
];

/// Sources an uploaded form can actually load.
const RESOLVABLE_PREFIXES: [&str; 5] = ["http://", "https://", "//", "data:", "blob:"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    /// Text fields created by this pass.
    pub fields: usize,
    /// Image slots created by this pass.
    pub image_slots: usize,
    /// Regions taken over from markup that was already transformed.
    pub adopted: usize,
}

impl TransformReport {
    pub fn total(&self) -> usize {
        self.fields + self.image_slots + self.adopted
    }
}

/// Walks a document and registers every fillable leaf with the router.
///
/// Running it again over the same document is a no-op: nodes already known
/// to the router are skipped.
#[derive(Debug, Clone)]
pub struct EditableTransformer {
    classifier: FieldClassifier,
}

impl EditableTransformer {
    pub fn new() -> Result<Self, FormError> {
        Ok(Self::with_classifier(FieldClassifier::new()?))
    }

    pub fn with_classifier(classifier: FieldClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &FieldClassifier {
        &self.classifier
    }

    pub fn transform(
        &self,
        doc: &mut Document,
        regions: &mut RegionRouter,
    ) -> Result<TransformReport, FormError> {
        let mut report = TransformReport::default();

        self.adopt_existing(doc, regions, &mut report)?;
        self.process_images(doc, regions, &mut report)?;

        for tag in PRIORITY_TAGS {
            for node in doc.elements_by_tag(tag) {
                if self.should_convert(doc, regions, node) {
                    self.convert(doc, regions, node)?;
                    report.fields += 1;
                }
            }
        }

        info!(
            fields = report.fields,
            image_slots = report.image_slots,
            adopted = report.adopted,
            total_regions = regions.len(),
            "Form transformed"
        );
        Ok(report)
    }

    /// Register nodes that carry identifiers from an earlier transformation.
    fn adopt_existing(
        &self,
        doc: &mut Document,
        regions: &mut RegionRouter,
        report: &mut TransformReport,
    ) -> Result<(), FormError> {
        let nodes: Vec<NodeId> = doc.descendants(doc.root()).collect();
        for node in nodes {
            if regions.contains_node(node) {
                continue;
            }
            if let Some(existing) = doc.attr(node, EDITABLE_ID_ATTR).map(str::to_string) {
                let id = self.claim_id(doc, regions, node, EDITABLE_ID_ATTR, existing, "editable");
                let original = doc
                    .attr(node, ORIGINAL_ATTR)
                    .map(str::to_string)
                    .unwrap_or_else(|| doc.text_content(node));
                let state = if doc.attr(node, "contenteditable") == Some("false") {
                    RegionState::Frozen
                } else {
                    RegionState::Live
                };
                debug!(region = %id, ?state, "Adopted field");
                regions.register(Box::new(FieldRegion::new(id, node, original).with_state(state)))?;
                report.adopted += 1;
            } else if doc.is_tag(node, "img") {
                if let Some(existing) = doc.attr(node, IMAGE_ID_ATTR).map(str::to_string) {
                    let id = self.claim_id(doc, regions, node, IMAGE_ID_ATTR, existing, "image");
                    let placeholder = !is_resolvable(doc.attr(node, "src"));
                    debug!(region = %id, "Adopted image slot");
                    regions.register(Box::new(ImageSlot::new(id, node, placeholder)))?;
                    report.adopted += 1;
                }
            }
        }
        Ok(())
    }

    /// Keep an identifier found in markup unless another node already owns it.
    fn claim_id(
        &self,
        doc: &mut Document,
        regions: &RegionRouter,
        node: NodeId,
        attr: &str,
        existing: String,
        prefix: &str,
    ) -> RegionId {
        let candidate = RegionId::from(existing);
        if !candidate.as_str().trim().is_empty() && !regions.contains(&candidate) {
            return candidate;
        }
        let fresh = RegionId::generate(prefix);
        doc.set_attr(node, attr, fresh.as_str());
        fresh
    }

    fn process_images(
        &self,
        doc: &mut Document,
        regions: &mut RegionRouter,
        report: &mut TransformReport,
    ) -> Result<(), FormError> {
        for node in doc.elements_by_tag("img") {
            if regions.contains_node(node) {
                continue;
            }
            let src = doc.attr(node, "src");
            if src.is_some_and(is_embedded) {
                continue;
            }
            let placeholder = !is_resolvable(src);
            let has_height = doc.has_attr(node, "height") || doc.style_property(node, "height").is_some();

            let id = RegionId::generate("image");
            doc.set_attr(node, IMAGE_ID_ATTR, id.as_str());
            doc.update_style(node, |style| {
                style.set("max-width", "100%");
                if !has_height {
                    style.set("height", "auto");
                }
                style.set("cursor", "pointer");
                if placeholder {
                    for (property, value) in PLACEHOLDER_STYLE {
                        style.set(property, value);
                    }
                }
            });
            if placeholder && doc.attr(node, "alt").is_none_or(|alt| alt.trim().is_empty()) {
                doc.set_attr(node, "alt", PLACEHOLDER_ALT);
            }

            debug!(region = %id, placeholder, "Image slot created");
            regions.register(Box::new(ImageSlot::new(id, node, placeholder)))?;
            report.image_slots += 1;
        }
        Ok(())
    }

    fn should_convert(&self, doc: &Document, regions: &RegionRouter, node: NodeId) -> bool {
        if regions.contains_node(node) || !doc.is_attached(node) {
            return false;
        }
        if doc.has_descendant_tag(node, &BLOCKING_TAGS) {
            return false;
        }
        let text = doc.text_content(node);
        let is_cell = doc.tag_name(node).is_some_and(|tag| CELL_TAGS.contains(&tag));
        (is_cell && text.trim().is_empty()) || self.classifier.is_fillable(&text)
    }

    fn convert(
        &self,
        doc: &mut Document,
        regions: &mut RegionRouter,
        node: NodeId,
    ) -> Result<(), FormError> {
        let id = RegionId::generate("editable");
        let original = doc.text_content(node);

        doc.set_attr(node, EDITABLE_ID_ATTR, id.as_str());
        doc.set_attr(node, ORIGINAL_ATTR, original.as_str());
        doc.set_attr(node, "contenteditable", "true");
        doc.add_class(node, EDITABLE_CLASS);
        for (property, value) in FIELD_STYLE_DEFAULTS {
            doc.set_style_default(node, property, value);
        }
        let cleaned = self.classifier.strip_placeholders(&original);
        doc.set_text_content(node, &cleaned);

        debug!(region = %id, tag = doc.tag_name(node).unwrap_or_default(), "Converted field");
        regions.register(Box::new(FieldRegion::new(id, node, original)))
    }
}

fn is_embedded(src: &str) -> bool {
    src.trim_start()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Whether a source can load outside the uploader's file system.
pub fn is_resolvable(src: Option<&str>) -> bool {
    let Some(src) = src.map(str::trim).filter(|src| !src.is_empty()) else {
        return false;
    };
    let lower = src.to_ascii_lowercase();
    RESOLVABLE_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
