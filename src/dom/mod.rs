//! Document model for Veneer
//!
//! Parses HTML with html5ever into a mutable arena, answers selector queries
//! and serializes the result back to markup.

pub mod html;
mod node;
mod selector;
mod serialize;

pub use html::HtmlParser;
pub use node::{Document, ElementData, InlineStyle, Node, NodeId, NodeType};
pub use selector::SelectorList;
