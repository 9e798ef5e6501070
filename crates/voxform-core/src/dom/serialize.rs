//! html5ever serialization of the arena.

use std::io;

use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::QualName;

use super::{Document, NodeData, NodeId};

struct SerializableNode<'a> {
    doc: &'a Document,
    id: NodeId,
}

enum Step {
    Open(NodeId),
    Close(QualName),
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let mut steps: Vec<Step> = match traversal_scope {
            TraversalScope::IncludeNode => vec![Step::Open(self.id)],
            TraversalScope::ChildrenOnly(_) => self
                .doc
                .children(self.id)
                .iter()
                .rev()
                .map(|child| Step::Open(*child))
                .collect(),
        };

        while let Some(step) = steps.pop() {
            let id = match step {
                Step::Close(name) => {
                    serializer.end_elem(name)?;
                    continue;
                }
                Step::Open(id) => id,
            };

            match &self.doc.node(id).data {
                NodeData::Element(element) => {
                    serializer.start_elem(
                        element.name.clone(),
                        element.attrs.iter().map(|attr| (&attr.name, attr.value.as_str())),
                    )?;
                    steps.push(Step::Close(element.name.clone()));
                }
                NodeData::Document => {}
                NodeData::Doctype { name } => {
                    serializer.write_doctype(name)?;
                    continue;
                }
                NodeData::Text(text) => {
                    serializer.write_text(text)?;
                    continue;
                }
                NodeData::Comment(text) => {
                    serializer.write_comment(text)?;
                    continue;
                }
                NodeData::ProcessingInstruction { target, data } => {
                    serializer.write_processing_instruction(target, data)?;
                    continue;
                }
            }

            steps.extend(self.doc.children(id).iter().rev().map(|child| Step::Open(*child)));
        }

        Ok(())
    }
}

impl Document {
    fn serialize_node(&self, id: NodeId, scope: TraversalScope) -> io::Result<String> {
        let mut buffer = Vec::new();
        let opts = SerializeOpts {
            traversal_scope: scope,
            ..Default::default()
        };
        serialize(&mut buffer, &SerializableNode { doc: self, id }, opts)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Serialize the whole document, doctype included.
    pub fn to_html(&self) -> io::Result<String> {
        self.serialize_node(self.root(), TraversalScope::ChildrenOnly(None))
    }

    /// Markup of the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> io::Result<String> {
        self.serialize_node(id, TraversalScope::ChildrenOnly(None))
    }

    /// Markup of `id` and its children.
    pub fn outer_html(&self, id: NodeId) -> io::Result<String> {
        self.serialize_node(id, TraversalScope::IncludeNode)
    }
}
