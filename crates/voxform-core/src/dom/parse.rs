//! html5ever parsing into the arena.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::{Attr, Document, ElementData, NodeData, NodeId};

pub(super) fn parse_html(html: &str) -> Document {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    let mut doc = Document::new();
    let root = doc.root();

    // Explicit stack instead of recursion: uploaded forms can nest deeply.
    let mut pending: Vec<(NodeId, Handle)> = dom
        .document
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (root, child.clone()))
        .collect();

    while let Some((parent, handle)) = pending.pop() {
        let data = match &handle.data {
            RcNodeData::Document => continue,
            RcNodeData::Doctype { name, .. } => NodeData::Doctype {
                name: name.to_string(),
            },
            RcNodeData::Text { contents } => NodeData::Text(contents.borrow().to_string()),
            RcNodeData::Comment { contents } => NodeData::Comment(contents.to_string()),
            RcNodeData::ProcessingInstruction { target, contents } => {
                NodeData::ProcessingInstruction {
                    target: target.to_string(),
                    data: contents.to_string(),
                }
            }
            RcNodeData::Element { name, attrs, .. } => NodeData::Element(ElementData {
                name: name.clone(),
                attrs: attrs
                    .borrow()
                    .iter()
                    .map(|attr| Attr {
                        name: attr.name.clone(),
                        value: attr.value.to_string(),
                    })
                    .collect(),
            }),
        };

        let id = doc.push_node(data);
        doc.append_child(parent, id);

        let mut children: Vec<Handle> = handle.children.borrow().iter().cloned().collect();
        // <template> content lives in a separate fragment; inline it.
        if let RcNodeData::Element { template_contents, .. } = &handle.data {
            if let Some(contents) = template_contents.borrow().as_ref() {
                children.extend(contents.children.borrow().iter().cloned());
            }
        }
        pending.extend(children.into_iter().rev().map(|child| (id, child)));
    }

    doc
}
