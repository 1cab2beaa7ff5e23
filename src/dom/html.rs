//! HTML5 parser implementation using html5ever

use super::node::{Document, ElementData, NodeId, NodeType};
use crate::utils::Result;
use crate::utils::error::RenderError;
use html5ever::parse_document;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{LocalName, Namespace, ParseOpts, QualName};
use markup5ever::Attribute;
use markup5ever::interface::tree_builder::NodeOrText;
use markup5ever::interface::tree_builder::TreeSink;
use std::borrow::Cow;
use std::cell::RefCell;
use std::sync::OnceLock;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Handle type for nodes in the sink arena
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handle(usize);

/// Tree sink that collects html5ever output before it becomes a [`Document`]
pub struct DomSink {
    /// Arena of nodes
    nodes: RefCell<Vec<SinkNode>>,
    /// Boxed QualNames so references stay valid while the vector grows
    qual_names: RefCell<Vec<Box<QualName>>>,
    /// Doctype name seen during parsing
    doctype: RefCell<Option<String>>,
    /// Document handle
    document_handle: Handle,
}

/// Internal node representation during parsing
struct SinkNode {
    node_type: SinkNodeType,
    children: Vec<Handle>,
    /// Index into qual_names for elements
    qual_name_idx: Option<usize>,
}

enum SinkNodeType {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
    ProcessingInstruction,
}

impl SinkNode {
    fn new(node_type: SinkNodeType) -> Self {
        Self {
            node_type,
            children: Vec::new(),
            qual_name_idx: None,
        }
    }
}

impl DomSink {
    fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![SinkNode::new(SinkNodeType::Document)]),
            qual_names: RefCell::new(Vec::new()),
            doctype: RefCell::new(None),
            document_handle: Handle(0),
        }
    }

    fn new_handle(&self, node: SinkNode) -> Handle {
        let mut nodes = self.nodes.borrow_mut();
        let handle = Handle(nodes.len());
        nodes.push(node);
        handle
    }

    fn add_qual_name(&self, qn: QualName) -> usize {
        let mut qual_names = self.qual_names.borrow_mut();
        let idx = qual_names.len();
        qual_names.push(Box::new(qn));
        idx
    }

    fn text_handle(&self, child: NodeOrText<Handle>) -> Handle {
        match child {
            NodeOrText::AppendNode(h) => h,
            NodeOrText::AppendText(text) => {
                self.new_handle(SinkNode::new(SinkNodeType::Text(text.to_string())))
            }
        }
    }

    /// Convert to our Document format
    fn into_document(self) -> Document {
        let nodes = self.nodes.into_inner();
        let mut document = Document::new();
        document.doctype = self.doctype.into_inner();

        let root = document.root();
        if let Some(doc_node) = nodes.first() {
            for child_handle in &doc_node.children {
                Self::convert_node(&nodes, *child_handle, &mut document, root);
            }
        }

        document
    }

    fn convert_node(nodes: &[SinkNode], handle: Handle, document: &mut Document, parent: NodeId) {
        let Some(sink_node) = nodes.get(handle.0) else {
            return;
        };

        let node_type = match &sink_node.node_type {
            SinkNodeType::Element(data) => NodeType::Element(data.clone()),
            SinkNodeType::Text(text) => NodeType::Text(text.clone()),
            SinkNodeType::Comment(text) => NodeType::Comment(text.clone()),
            SinkNodeType::Document | SinkNodeType::ProcessingInstruction => return,
        };

        let id = document.create_node(node_type);
        document.append_child(parent, id);
        for child_handle in &sink_node.children {
            Self::convert_node(nodes, *child_handle, document, id);
        }
    }
}

impl TreeSink for DomSink {
    type Handle = Handle;
    type Output = Self;
    type ElemName<'a> = &'a QualName where Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        log::trace!("html parse error: {}", msg);
    }

    fn get_document(&self) -> Handle {
        self.document_handle
    }

    fn elem_name<'a>(&'a self, target: &'a Handle) -> Self::ElemName<'a> {
        let idx = self.nodes.borrow().get(target.0).and_then(|n| n.qual_name_idx);
        if let Some(idx) = idx {
            let qual_names = self.qual_names.borrow();
            let qn_ptr: *const QualName = &*qual_names[idx];
            // SAFETY: names are boxed and never removed while the sink lives,
            // so the pointee stays put even when the outer vector reallocates.
            return unsafe { &*qn_ptr };
        }
        static DEFAULT_QNAME: OnceLock<QualName> = OnceLock::new();
        DEFAULT_QNAME.get_or_init(|| {
            QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(""))
        })
    }

    fn create_element(&self, name: QualName, attrs: Vec<Attribute>, _flags: html5ever::tree_builder::ElementFlags) -> Handle {
        let mut data = ElementData::new(name.local.to_string());
        for attr in attrs {
            data.set_attribute(attr.name.local.to_string(), attr.value.to_string());
        }
        let mut node = SinkNode::new(SinkNodeType::Element(data));
        node.qual_name_idx = Some(self.add_qual_name(name));
        self.new_handle(node)
    }

    fn create_comment(&self, text: StrTendril) -> Handle {
        self.new_handle(SinkNode::new(SinkNodeType::Comment(text.to_string())))
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Handle {
        self.new_handle(SinkNode::new(SinkNodeType::ProcessingInstruction))
    }

    fn append(&self, parent: &Handle, child: NodeOrText<Handle>) {
        // Adjacent text merges, the way a browser tree builder does
        if let NodeOrText::AppendText(text) = &child {
            let mut nodes = self.nodes.borrow_mut();
            let last = nodes[parent.0].children.last().copied();
            if let Some(last) = last {
                if let SinkNodeType::Text(existing) = &mut nodes[last.0].node_type {
                    existing.push_str(text);
                    return;
                }
            }
        }
        let child_handle = self.text_handle(child);
        self.nodes.borrow_mut()[parent.0].children.push(child_handle);
    }

    fn append_based_on_parent_node(&self, _element: &Handle, prev: &Handle, child: NodeOrText<Handle>) {
        self.append(prev, child);
    }

    fn append_doctype_to_document(&self, name: StrTendril, _public: StrTendril, _system: StrTendril) {
        *self.doctype.borrow_mut() = Some(name.to_string());
    }

    fn get_template_contents(&self, target: &Handle) -> Handle {
        *target
    }

    fn same_node(&self, x: &Handle, y: &Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, _mode: html5ever::tree_builder::QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Handle, new_node: NodeOrText<Handle>) {
        let parent = self
            .nodes
            .borrow()
            .iter()
            .enumerate()
            .find_map(|(idx, node)| {
                node.children
                    .iter()
                    .position(|h| h.0 == sibling.0)
                    .map(|pos| (idx, pos))
            });
        if let Some((idx, pos)) = parent {
            let child_handle = self.text_handle(new_node);
            self.nodes.borrow_mut()[idx].children.insert(pos, child_handle);
        }
    }

    fn add_attrs_if_missing(&self, target: &Handle, attrs: Vec<Attribute>) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(node) = nodes.get_mut(target.0) {
            if let SinkNodeType::Element(data) = &mut node.node_type {
                for attr in attrs {
                    let name = attr.name.local.to_string();
                    if data.get_attribute(&name).is_none() {
                        data.set_attribute(name, attr.value.to_string());
                    }
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Handle) {
        let mut nodes = self.nodes.borrow_mut();
        for node in nodes.iter_mut() {
            node.children.retain(|h| h.0 != target.0);
        }
    }

    fn reparent_children(&self, node: &Handle, new_parent: &Handle) {
        let mut nodes = self.nodes.borrow_mut();
        let children: Vec<Handle> = nodes[node.0].children.drain(..).collect();
        nodes[new_parent.0].children.extend(children);
    }
}

/// HTML5 parser using html5ever
#[derive(Clone)]
pub struct HtmlParser {
    opts: ParseOpts,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self {
            opts: ParseOpts {
                tree_builder: TreeBuilderOpts {
                    drop_doctype: false,
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    /// Parse HTML content into a DOM document
    pub fn parse(&self, content: &str) -> Result<Document> {
        if content.trim().is_empty() {
            return Ok(Document::new());
        }

        let sink = DomSink::new();
        let dom = parse_document(sink, self.opts.clone())
            .from_utf8()
            .read_from(&mut content.as_bytes())
            .map_err(|e| RenderError::HtmlParse(e.to_string()))?;

        Ok(dom.into_document())
    }

    /// Parse a markup fragment. The root's children are the fragment's
    /// top-level nodes: whatever the tree builder placed in `<head>`
    /// followed by whatever it placed in `<body>`.
    pub fn parse_fragment(&self, content: &str) -> Result<Document> {
        let parsed = self.parse(content)?;
        let mut fragment = Document::new();
        let root = fragment.root();

        let sections = parsed
            .children(parsed.root())
            .iter()
            .filter(|id| parsed.element(**id).is_some_and(|e| e.tag_name == "html"))
            .flat_map(|html| parsed.children(*html).iter().copied());
        for section in sections {
            for child in parsed.children(section) {
                let copy = fragment.import_node(&parsed, *child);
                fragment.append_child(root, copy);
            }
        }

        Ok(fragment)
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Replace the children of `id` with parsed markup, like `innerHTML`
    pub fn set_inner_html(&mut self, id: NodeId, markup: &str) -> Result<()> {
        let fragment = HtmlParser::new().parse_fragment(markup)?;
        self.remove_children(id);
        for child in fragment.children(fragment.root()) {
            let copy = self.import_node(&fragment, *child);
            self.append_child(id, copy);
        }
        Ok(())
    }
}
