//! In-memory document tree.
//!
//! Markup is parsed with html5ever and copied into an arena of [`Node`]s
//! addressed by [`NodeId`]. The arena owns plain data only, so a
//! [`Document`] is `Send`, cheap to deep-clone for exports, and can be
//! mutated in place by the transformer and the image handler. Detached nodes
//! stay in the arena until the document is dropped.

mod parse;
mod serialize;
mod style;

use html5ever::{LocalName, Namespace, QualName};

pub use style::InlineStyle;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Element attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: QualName,
    pub value: String,
}

impl Attr {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
            value: value.into(),
        }
    }

    pub fn local_name(&self) -> &str {
        &self.name.local
    }
}

/// Element name and attributes.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub name: QualName,
    pub attrs: Vec<Attr>,
}

impl ElementData {
    pub fn tag(&self) -> &str {
        &self.name.local
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Doctype { name: String },
    Text(String),
    Comment(String),
    Element(ElementData),
    ProcessingInstruction { target: String, data: String },
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub data: NodeData,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// Parsed form markup.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
        }
    }

    /// Parse HTML or XHTML markup. Parsing never fails; malformed markup is
    /// repaired the way browsers do.
    pub fn parse(html: &str) -> Self {
        parse::parse_html(html)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).as_element()
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.node_mut(id).data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Lowercase local name of an element node.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(ElementData::tag)
    }

    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag_name(id) == Some(tag)
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Whether `id` is still reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root() || self.ancestors(id).any(|ancestor| ancestor == self.root())
    }

    /// All elements with the given tag attached under the root, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .filter(|id| self.is_tag(*id, tag))
            .collect()
    }

    /// Elements under `id` carrying the given class.
    pub fn elements_with_class(&self, id: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(id)
            .filter(|node| self.has_class(*node, class))
            .collect()
    }

    /// Whether any descendant of `id` is one of `tags`.
    pub fn has_descendant_tag(&self, id: NodeId, tags: &[&str]) -> bool {
        self.descendants(id)
            .any(|node| self.tag_name(node).is_some_and(|tag| tags.contains(&tag)))
    }

    /// First element with the given tag anywhere in the document.
    pub fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root()).find(|id| self.is_tag(*id, tag))
    }

    pub fn body(&self) -> Option<NodeId> {
        self.first_by_tag("body")
    }

    pub fn head(&self) -> Option<NodeId> {
        self.first_by_tag("head")
    }

    /// Concatenated text of every descendant text node (DOM `textContent`).
    pub fn text_content(&self, id: NodeId) -> String {
        if let NodeData::Text(text) = &self.node(id).data {
            return text.clone();
        }
        self.descendants(id)
            .filter_map(|node| match &self.node(node).data {
                NodeData::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attrs
            .iter()
            .find(|attr| attr.local_name() == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Set an attribute, replacing an existing value. No-op on non-elements.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let value = value.into();
        match element.attrs.iter_mut().find(|attr| attr.local_name() == name) {
            Some(attr) => attr.value = value,
            None => element.attrs.push(Attr::new(name, value)),
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        let element = self.element_mut(id)?;
        let position = element.attrs.iter().position(|attr| attr.local_name() == name)?;
        Some(element.attrs.remove(position).value)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        let classes = match self.attr(id, "class").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attr(id, "class", classes);
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        let Some(existing) = self.attr(id, "class") else {
            return;
        };
        let remaining: Vec<&str> = existing.split_whitespace().filter(|c| *c != class).collect();
        if remaining.is_empty() {
            self.remove_attr(id, "class");
        } else {
            let joined = remaining.join(" ");
            self.set_attr(id, "class", joined);
        }
    }

    // ------------------------------------------------------------------
    // Inline style
    // ------------------------------------------------------------------

    pub fn style(&self, id: NodeId) -> InlineStyle {
        InlineStyle::parse(self.attr(id, "style").unwrap_or_default())
    }

    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        self.style(id).get(property).map(str::to_string)
    }

    /// Edit the inline style; the attribute is removed when it ends up empty.
    pub fn update_style(&mut self, id: NodeId, edit: impl FnOnce(&mut InlineStyle)) {
        if self.element(id).is_none() {
            return;
        }
        let mut style = self.style(id);
        edit(&mut style);
        if style.is_empty() {
            self.remove_attr(id, "style");
        } else {
            self.set_attr(id, "style", style.to_string());
        }
    }

    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) {
        self.update_style(id, |style| style.set(property, value));
    }

    /// Set a property only when the element does not style it already.
    pub fn set_style_default(&mut self, id: NodeId, property: &str, value: &str) {
        self.update_style(id, |style| {
            if style.get(property).is_none() {
                style.set(property, value);
            }
        });
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    /// Create a detached HTML element.
    pub fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let name = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag));
        let attrs = attrs.iter().map(|(name, value)| Attr::new(name, *value)).collect();
        self.push_node(NodeData::Element(ElementData { name, attrs }))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeData::Text(text.into()))
    }

    /// Append a node, detaching it from its previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|child| *child != id);
        }
    }

    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
    }

    /// Deep-copy a subtree of another document. The copy starts detached.
    pub fn import(&mut self, source: &Document, id: NodeId) -> NodeId {
        let copy = self.push_node(source.node(id).data.clone());
        let mut stack = vec![(id, copy)];
        while let Some((from, to)) = stack.pop() {
            for child in source.children(from) {
                let child_copy = self.push_node(source.node(*child).data.clone());
                self.append_child(to, child_copy);
                stack.push((*child, child_copy));
            }
        }
        copy
    }

    /// Replace all content with a single text node (DOM `textContent = ...`).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
    }
}

/// Pre-order iterator over descendants.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.doc.children(id).iter().rev());
        Some(id)
    }
}

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;
