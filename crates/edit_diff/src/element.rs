//! Element capability used by path extraction, plus an arena-backed tree that implements it.
//!
//! The diff engine never talks to a live DOM. Hosts hand it anything that can answer the
//! questions in [`ElementLike`]; [`DomTree`] is the in-process implementation used by tooling
//! and tests.

use std::fmt::Write as _;

/// Tag names serialized without a closing tag.
pub const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "meta", "link"];

/// Read-only view of one element and its neighbourhood.
///
/// Handles compare equal when they point at the same element, not when their markup matches.
pub trait ElementLike: Clone + PartialEq {
    fn tag_name(&self) -> &str;

    /// Value of the `id` attribute, if present.
    fn id(&self) -> Option<&str>;

    fn parent(&self) -> Option<Self>;

    /// Element children in document order. Text nodes are not included.
    fn children(&self) -> Vec<Self>;

    /// True for the document element (`<html>`), which never appears in a path.
    fn is_document_root(&self) -> bool;

    fn outer_html(&self) -> String;
}

/// Index of a node inside a [`DomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeData {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Minimal owned element tree rooted at an `<html>` document element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Element {
                    tag: "html".to_string(),
                    attributes: Vec::new(),
                },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates an element that is not attached to any parent.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.into(),
            attributes: Vec::new(),
        })
    }

    pub fn append_element(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        let child = self.create_element(tag);
        self.attach(parent, child);
        child
    }

    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let child = self.push(NodeData::Text(text.into()));
        self.attach(parent, child);
        child
    }

    /// Sets or replaces an attribute. Ignored for text nodes.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        let NodeData::Element { attributes, .. } = &mut self.nodes[node.0].data else {
            return;
        };
        let value = value.into();
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => attributes.push((name.to_string(), value)),
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let NodeData::Element { attributes, .. } = &mut self.nodes[node.0].data {
            attributes.retain(|(key, _)| key != name);
        }
    }

    /// Replaces every child of `node` with a single text node.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        for child in std::mem::take(&mut self.nodes[node.0].children) {
            self.nodes[child.0].parent = None;
        }
        self.append_text(node, text);
    }

    #[must_use]
    pub fn element(&self, node: NodeId) -> ElementRef<'_> {
        ElementRef { tree: self, node }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].data {
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    let _ = write!(out, " {name}=\"{}\"", escape_attribute(value));
                }
                out.push('>');
                if VOID_ELEMENTS
                    .iter()
                    .any(|void| tag.eq_ignore_ascii_case(void))
                {
                    return;
                }
                for child in &self.nodes[node.0].children {
                    self.write_node(*child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

/// Borrowed handle to one node of a [`DomTree`].
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a DomTree,
    node: NodeId,
}

impl ElementRef<'_> {
    #[must_use]
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// Value of an arbitrary attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match &self.tree.nodes[self.node.0].data {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeData::Text(_) => None,
        }
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl ElementLike for ElementRef<'_> {
    fn tag_name(&self) -> &str {
        match &self.tree.nodes[self.node.0].data {
            NodeData::Element { tag, .. } => tag,
            NodeData::Text(_) => "",
        }
    }

    fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    fn parent(&self) -> Option<Self> {
        self.tree.nodes[self.node.0].parent.map(|node| Self {
            tree: self.tree,
            node,
        })
    }

    fn children(&self) -> Vec<Self> {
        self.tree.nodes[self.node.0]
            .children
            .iter()
            .filter(|child| matches!(self.tree.nodes[child.0].data, NodeData::Element { .. }))
            .map(|node| Self {
                tree: self.tree,
                node: *node,
            })
            .collect()
    }

    fn is_document_root(&self) -> bool {
        self.node == self.tree.root()
    }

    fn outer_html(&self) -> String {
        let mut out = String::new();
        self.tree.write_node(self.node, &mut out);
        out
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_html_serializes_attributes_text_and_void_elements() {
        let mut tree = DomTree::new();
        let body = tree.append_element(tree.root(), "body");
        let card = tree.append_element(body, "div");
        tree.set_attribute(card, "class", "card \"wide\"");
        tree.append_text(card, "a < b");
        tree.append_element(card, "br");

        assert_eq!(
            tree.element(card).outer_html(),
            "<div class=\"card &quot;wide&quot;\">a &lt; b<br></div>"
        );
    }

    #[test]
    fn set_attribute_replaces_existing_value() {
        let mut tree = DomTree::new();
        let node = tree.append_element(tree.root(), "p");
        tree.set_attribute(node, "contenteditable", "true");
        tree.set_attribute(node, "contenteditable", "false");
        assert_eq!(tree.element(node).attribute("contenteditable"), Some("false"));

        tree.remove_attribute(node, "contenteditable");
        assert_eq!(tree.element(node).outer_html(), "<p></p>");
    }

    #[test]
    fn set_text_detaches_previous_children() {
        let mut tree = DomTree::new();
        let node = tree.append_element(tree.root(), "h1");
        let old = tree.append_element(node, "span");
        tree.set_text(node, "Hello");

        assert!(tree.element(old).parent().is_none());
        assert!(tree.element(node).children().is_empty());
        assert_eq!(tree.element(node).outer_html(), "<h1>Hello</h1>");
    }

    #[test]
    fn children_skip_text_nodes_and_root_is_flagged() {
        let mut tree = DomTree::new();
        let body = tree.append_element(tree.root(), "body");
        tree.append_text(body, "lead");
        let first = tree.append_element(body, "p");

        let children = tree.element(body).children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].node_id(), first);
        assert!(tree.element(tree.root()).is_document_root());
        assert!(!tree.element(body).is_document_root());
    }
}
