//! Shared building blocks for standalone pages.

use voxform_core::dom::{Document, NodeId};
use voxform_core::region::{EDITABLE_CLASS, EDITABLE_ID_ATTR, IMAGE_ID_ATTR, ORIGINAL_ATTR};
use voxform_core::{FormSession, RegionKind};

use crate::error::ExportError;

const FALLBACK_TITLE: &str = "Form";

/// Head elements carried over from the uploaded form.
const CARRIED_HEAD_TAGS: [&str; 2] = ["style", "link"];

/// Deep copy of the session document with uploaded images embedded.
pub(crate) fn prepared_copy(session: &FormSession) -> Document {
    let mut doc = session.document().clone();
    for (id, data_url) in session.images().iter() {
        let Some(region) = session.regions().get(id) else {
            continue;
        };
        let node = region.node();
        if doc.is_tag(node, "img") {
            doc.set_attr(node, "src", data_url);
            continue;
        }
        let images: Vec<NodeId> = doc
            .descendants(node)
            .filter(|child| doc.is_tag(*child, "img"))
            .collect();
        for img in images {
            doc.set_attr(img, "src", data_url);
        }
    }
    doc
}

/// Remove region identifiers. Field nodes lose `contenteditable` and,
/// unless `keep_class`, the `editable` class.
pub(crate) fn strip_markers(doc: &mut Document, session: &FormSession, keep_class: bool) {
    for region in session.regions().iter() {
        let node = region.node();
        match region.kind() {
            RegionKind::Field => {
                doc.remove_attr(node, EDITABLE_ID_ATTR);
                doc.remove_attr(node, ORIGINAL_ATTR);
                doc.remove_attr(node, "contenteditable");
                if !keep_class {
                    doc.remove_class(node, EDITABLE_CLASS);
                }
            }
            RegionKind::ImageSlot => {
                doc.remove_attr(node, IMAGE_ID_ATTR);
            }
        }
    }
}

pub(crate) fn page_title(session: &FormSession) -> &str {
    let name = session.file_name().trim();
    if name.is_empty() { FALLBACK_TITLE } else { name }
}

/// Wrap the head styles and body content of `content` in a new document.
pub(crate) fn standalone_page(
    content: &Document,
    title: &str,
    style: &str,
    script: Option<&str>,
) -> Result<String, ExportError> {
    let mut page = Document::new();
    let root = page.root();
    let html = append_element(&mut page, root, "html", &[]);
    let head = append_element(&mut page, html, "head", &[]);
    append_element(&mut page, head, "meta", &[("charset", "UTF-8")]);
    let title_node = append_element(&mut page, head, "title", &[]);
    page.set_text_content(title_node, title);
    let style_node = append_element(&mut page, head, "style", &[]);
    page.set_text_content(style_node, style);

    if let Some(source_head) = content.head() {
        for child in content.children(source_head) {
            let carried = content
                .tag_name(*child)
                .is_some_and(|tag| CARRIED_HEAD_TAGS.contains(&tag));
            if carried {
                let copy = page.import(content, *child);
                page.append_child(head, copy);
            }
        }
    }
    if let Some(script) = script {
        let script_node = append_element(&mut page, head, "script", &[]);
        page.set_text_content(script_node, script);
    }

    let body = append_element(&mut page, html, "body", &[]);
    if let Some(source_body) = content.body() {
        for child in content.children(source_body) {
            let copy = page.import(content, *child);
            page.append_child(body, copy);
        }
    }

    Ok(format!("<!DOCTYPE html>\n{}\n", page.outer_html(html)?))
}

fn append_element(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let node = doc.create_element(tag, attrs);
    doc.append_child(parent, node);
    node
}
