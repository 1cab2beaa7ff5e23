//! Arena-backed DOM (Document Object Model)
//!
//! Nodes live in a single vector owned by the [`Document`] and refer to each
//! other through [`NodeId`] handles. Detached nodes stay in the arena but are
//! unreachable from the root, so queries never see them.

use cssparser::{Delimiter, ParseError, Parser, ParserInput};
use std::collections::BTreeMap;

/// Handle to a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Node types in the DOM
#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    /// Document root
    Document,
    /// Element node (e.g., <div>)
    Element(ElementData),
    /// Text node
    Text(String),
    /// Comment node
    Comment(String),
}

/// Inline `style` declarations of an element, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parse a `style` attribute value. Malformed declarations are skipped.
    pub fn parse(text: &str) -> Self {
        let mut style = Self::default();
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);

        loop {
            parser.skip_whitespace();
            if parser.is_exhausted() {
                break;
            }
            let before = parser.position();
            // On error the rest of the declaration is consumed up to `;`
            if let Ok((property, value)) =
                parser.parse_until_after(Delimiter::Semicolon, |p| parse_declaration(p))
            {
                if !value.is_empty() {
                    style.set(property, value);
                }
            }
            if parser.position() == before {
                break;
            }
        }
        style
    }

    /// Get a property value
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set a property, replacing an existing value in place
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.declarations.iter_mut().find(|(name, _)| *name == property) {
            Some(slot) => slot.1 = value,
            None => self.declarations.push((property, value)),
        }
    }

    /// Whether no declarations are set
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate over declarations
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Serialize back to `style` attribute text
    pub fn to_css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One `property: value` declaration. The value is kept as source text, so
/// nested functions and strings containing `;` survive intact.
fn parse_declaration<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<(String, String), ParseError<'i, ()>> {
    let property = parser.expect_ident()?.to_string();
    parser.expect_colon()?;
    parser.skip_whitespace();

    let start = parser.position();
    while parser.next().is_ok() {}
    let value = parser.slice_from(start).trim().to_string();

    let property = if property.starts_with("--") {
        property
    } else {
        property.to_ascii_lowercase()
    };
    Ok((property, value))
}

/// Data for element nodes
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Tag name (e.g., "div", "span")
    pub tag_name: String,
    /// Element attributes, excluding `style`
    pub attributes: BTreeMap<String, String>,
    /// Inline style declarations
    pub style: InlineStyle,
}

impl ElementData {
    /// Create a new element
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: BTreeMap::new(),
            style: InlineStyle::default(),
        }
    }

    /// Get an attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute value. `style` is parsed into [`InlineStyle`].
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if name == "style" {
            self.style = InlineStyle::parse(&value);
        } else {
            self.attributes.insert(name, value);
        }
    }

    /// Get the ID attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Get class names
    pub fn classes(&self) -> Vec<&str> {
        self.attributes
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Check for a class name
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// Add a class name if absent
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            let mut classes: Vec<String> = self.classes().into_iter().map(String::from).collect();
            classes.push(class.to_string());
            self.attributes.insert("class".to_string(), classes.join(" "));
        }
    }

    /// Remove a class name if present
    pub fn remove_class(&mut self, class: &str) {
        if self.has_class(class) {
            let classes: Vec<&str> = self.classes().into_iter().filter(|c| *c != class).collect();
            let joined = classes.join(" ");
            self.attributes.insert("class".to_string(), joined);
        }
    }

    /// Toggle a class name, returning whether it is now present
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }
}

/// A node in the DOM arena
#[derive(Debug, Clone)]
pub struct Node {
    /// Node type and data
    pub node_type: NodeType,
    /// Parent node, `None` for the root and detached nodes
    pub parent: Option<NodeId>,
    /// Child nodes
    pub children: Vec<NodeId>,
}

impl Node {
    /// Create a new node
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Get element data if this is an element
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }
}

/// The DOM document
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Doctype name, if the source had one
    pub doctype: Option<String>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeType::Document)],
            doctype: None,
        }
    }

    /// The document root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Borrow element data, if `id` is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).as_element()
    }

    /// Mutably borrow element data, if `id` is an element
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[id.0].node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Allocate a detached node
    pub fn create_node(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(node_type));
        id
    }

    /// Allocate a detached element
    pub fn create_element(&mut self, tag_name: impl Into<String>) -> NodeId {
        self.create_node(NodeType::Element(ElementData::new(tag_name)))
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Remove a node from its parent
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    /// Detach every child of `id`
    pub fn remove_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Children of a node
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Ancestors of a node, nearest first, excluding the node itself
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parent(parent);
        }
        ancestors
    }

    /// Descendants of a node in document order, excluding the node itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Whether the node is reachable from the root
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == self.root() || self.ancestors(id).last() == Some(&self.root())
    }

    /// First connected element with the given `id` attribute, in document order
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|node| self.element(*node).and_then(ElementData::id) == Some(id))
    }

    /// Concatenated text of a node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        if let NodeType::Text(t) = &self.node(id).node_type {
            text.push_str(t);
        }
        for node in self.descendants(id) {
            if let NodeType::Text(t) = &self.node(node).node_type {
                text.push_str(t);
            }
        }
        text
    }

    /// Deep-copy a subtree of another document into this one, detached
    pub fn import_node(&mut self, source: &Document, id: NodeId) -> NodeId {
        let copy = self.create_node(source.node(id).node_type.clone());
        for child in source.children(id) {
            let child_copy = self.import_node(source, *child);
            self.append_child(copy, child_copy);
        }
        copy
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
