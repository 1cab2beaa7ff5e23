//! CSS selector matching for DOM queries, tokenized with cssparser
//!
//! Supports selector lists of compound selectors (type, `*`, `#id`, `.class`
//! and attribute selectors) joined by descendant or child combinators. This
//! covers what `querySelector`-style lookups on marketing pages need; pseudo
//! classes are rejected as invalid.

use super::node::{Document, ElementData, NodeId};
use crate::utils::Result;
use crate::utils::error::RenderError;
use cssparser::{BasicParseErrorKind, ParseError, Parser, ParserInput, Token};

/// Attribute selector operator
#[derive(Debug, Clone, PartialEq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Suffix(String),
    Substring(String),
    Includes(String),
    DashMatch(String),
}

impl AttrOp {
    fn matches(&self, value: &str) -> bool {
        match self {
            Self::Exists => true,
            Self::Equals(v) => value == v,
            Self::Prefix(v) => !v.is_empty() && value.starts_with(v.as_str()),
            Self::Suffix(v) => !v.is_empty() && value.ends_with(v.as_str()),
            Self::Substring(v) => !v.is_empty() && value.contains(v.as_str()),
            Self::Includes(v) => value.split_whitespace().any(|word| word == v),
            Self::DashMatch(v) => {
                value == v || value.strip_prefix(v.as_str()).is_some_and(|rest| rest.starts_with('-'))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct AttrSelector {
    name: String,
    op: AttrOp,
}

/// A sequence of simple selectors with no combinator between them
#[derive(Debug, Clone, Default, PartialEq)]
struct Compound {
    tag_name: Option<String>,
    universal: bool,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttrSelector>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag_name.is_none()
            && !self.universal
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }

    fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag_name {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|attr| {
            let value = if attr.name == "style" {
                (!element.style.is_empty()).then(|| element.style.to_css_text())
            } else {
                element.get_attribute(&attr.name).map(String::from)
            };
            value.is_some_and(|v| attr.op.matches(&v))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// Compounds left to right, each paired with the combinator preceding it
#[derive(Debug, Clone, Default, PartialEq)]
struct ComplexSelector {
    parts: Vec<(Combinator, Compound)>,
}

impl ComplexSelector {
    fn matches(&self, document: &Document, id: NodeId) -> bool {
        match self.parts.len() {
            0 => false,
            n => self.matches_at(document, id, n - 1),
        }
    }

    fn matches_at(&self, document: &Document, id: NodeId, idx: usize) -> bool {
        let (combinator, compound) = &self.parts[idx];
        let Some(element) = document.element(id) else {
            return false;
        };
        if !compound.matches(element) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match combinator {
            Combinator::Child => document
                .parent(id)
                .is_some_and(|parent| self.matches_at(document, parent, idx - 1)),
            Combinator::Descendant => document
                .ancestors(id)
                .into_iter()
                .any(|ancestor| self.matches_at(document, ancestor, idx - 1)),
        }
    }
}

/// A parsed, comma-separated selector list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self> {
        let mut parser_input = ParserInput::new(input);
        let mut parser = Parser::new(&mut parser_input);
        let selectors = parse_selector_list(&mut parser).map_err(|e| RenderError::Selector {
            selector: input.to_string(),
            reason: format!("{:?}", e.kind),
        })?;
        Ok(Self { selectors })
    }

    /// Whether the element `id` matches any selector in the list
    pub fn matches(&self, document: &Document, id: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(document, id))
    }
}

fn parse_selector_list<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<Vec<ComplexSelector>, ParseError<'i, ()>> {
    let mut list = Vec::new();
    let mut current = ComplexSelector::default();
    let mut compound = Compound::default();
    let mut combinator = Combinator::Descendant;
    let mut saw_whitespace = false;

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) => {
                saw_whitespace = true;
                continue;
            }
            Token::Comma => {
                if compound.is_empty() {
                    return Err(parser.new_error(BasicParseErrorKind::UnexpectedToken(token)));
                }
                current.parts.push((combinator, std::mem::take(&mut compound)));
                list.push(std::mem::take(&mut current));
                combinator = Combinator::Descendant;
                saw_whitespace = false;
                continue;
            }
            Token::Delim('>') => {
                if compound.is_empty() {
                    return Err(parser.new_error(BasicParseErrorKind::UnexpectedToken(token)));
                }
                current.parts.push((combinator, std::mem::take(&mut compound)));
                combinator = Combinator::Child;
                saw_whitespace = false;
                continue;
            }
            _ => {}
        }

        // Whitespace between two compounds is the descendant combinator
        if saw_whitespace && !compound.is_empty() {
            current.parts.push((combinator, std::mem::take(&mut compound)));
            combinator = Combinator::Descendant;
        }
        saw_whitespace = false;

        match token {
            Token::Ident(name) if compound.is_empty() => {
                compound.tag_name = Some(name.to_ascii_lowercase());
            }
            Token::Delim('*') if compound.is_empty() => compound.universal = true,
            Token::IDHash(id) => compound.id = Some(id.to_string()),
            Token::Delim('.') => {
                let class = parser.expect_ident()?.to_string();
                compound.classes.push(class);
            }
            Token::SquareBracketBlock => {
                let attr = parser.parse_nested_block(|p| parse_attribute(p))?;
                compound.attributes.push(attr);
            }
            other => return Err(parser.new_error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    if compound.is_empty() {
        return Err(parser.new_error(BasicParseErrorKind::EndOfInput));
    }
    current.parts.push((combinator, compound));
    list.push(current);
    Ok(list)
}

fn parse_attribute<'i>(parser: &mut Parser<'i, '_>) -> std::result::Result<AttrSelector, ParseError<'i, ()>> {
    let name = parser.expect_ident()?.to_ascii_lowercase();
    if parser.is_exhausted() {
        return Ok(AttrSelector { name, op: AttrOp::Exists });
    }

    let op_token = parser.next()?.clone();
    let value = parser.expect_ident_or_string()?.to_string();
    let op = match op_token {
        Token::Delim('=') => AttrOp::Equals(value),
        Token::PrefixMatch => AttrOp::Prefix(value),
        Token::SuffixMatch => AttrOp::Suffix(value),
        Token::SubstringMatch => AttrOp::Substring(value),
        Token::IncludeMatch => AttrOp::Includes(value),
        Token::DashMatch => AttrOp::DashMatch(value),
        other => return Err(parser.new_error(BasicParseErrorKind::UnexpectedToken(other))),
    };
    parser.expect_exhausted()?;
    Ok(AttrSelector { name, op })
}

impl Document {
    /// All connected elements matching `selectors`, in document order
    pub fn query_selector_all(&self, selectors: &str) -> Result<Vec<NodeId>> {
        self.query_selector_all_in(self.root(), selectors)
    }

    /// Descendants of `scope` matching `selectors`, in document order
    pub fn query_selector_all_in(&self, scope: NodeId, selectors: &str) -> Result<Vec<NodeId>> {
        let list = SelectorList::parse(selectors)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .filter(|id| list.matches(self, *id))
            .collect())
    }

    /// First connected element matching `selectors`
    pub fn query_selector(&self, selectors: &str) -> Result<Option<NodeId>> {
        self.query_selector_in(self.root(), selectors)
    }

    /// First descendant of `scope` matching `selectors`
    pub fn query_selector_in(&self, scope: NodeId, selectors: &str) -> Result<Option<NodeId>> {
        let list = SelectorList::parse(selectors)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|id| list.matches(self, *id)))
    }
}
