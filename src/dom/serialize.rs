//! HTML serialization of the DOM arena

use super::node::{Document, NodeId, NodeType};

/// Elements that never have children or an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text content is written without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

impl Document {
    /// Serialize the whole document, including the doctype
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = &self.doctype {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype);
            out.push('>');
        }
        for child in self.children(self.root()) {
            self.write_node(*child, false, &mut out);
        }
        out
    }

    /// Serialize the children of a node, like `innerHTML`
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        let raw = self
            .element(id)
            .is_some_and(|e| RAW_TEXT_ELEMENTS.contains(&e.tag_name.as_str()));
        for child in self.children(id) {
            self.write_node(*child, raw, &mut out);
        }
        out
    }

    /// Serialize a node and its subtree, like `outerHTML`
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, false, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, raw_text: bool, out: &mut String) {
        match &self.node(id).node_type {
            NodeType::Document => {
                for child in self.children(id) {
                    self.write_node(*child, false, out);
                }
            }
            NodeType::Text(text) if raw_text => out.push_str(text),
            NodeType::Text(text) => escape_text(text, out),
            NodeType::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeType::Element(element) => {
                out.push('<');
                out.push_str(&element.tag_name);
                for (name, value) in &element.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_attribute(value, out);
                    out.push('"');
                }
                if !element.style.is_empty() {
                    out.push_str(" style=\"");
                    escape_attribute(&element.style.to_css_text(), out);
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&element.tag_name.as_str()) {
                    return;
                }
                let raw = RAW_TEXT_ELEMENTS.contains(&element.tag_name.as_str());
                for child in self.children(id) {
                    self.write_node(*child, raw, out);
                }
                out.push_str("</");
                out.push_str(&element.tag_name);
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::HtmlParser;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_body() {
        let doc = HtmlParser::new()
            .parse(r#"<!DOCTYPE html><html><head></head><body><p class="a">x &amp; y</p><br></body></html>"#)
            .unwrap();
        assert_eq!(
            doc.to_html(),
            r#"<!DOCTYPE html><html><head></head><body><p class="a">x &amp; y</p><br></body></html>"#
        );
    }

    #[test]
    fn test_style_is_serialized_last() {
        let mut doc = HtmlParser::new().parse(r#"<div id="fx"></div>"#).unwrap();
        let fx = doc.get_element_by_id("fx").unwrap();
        doc.element_mut(fx).unwrap().style.set("opacity", "0");
        assert_eq!(doc.outer_html(fx), r#"<div id="fx" style="opacity: 0;"></div>"#);
    }

    #[test]
    fn test_data_uri_style_round_trips() {
        let doc = HtmlParser::new()
            .parse(r#"<div id="bg" style="background-image: url(data:image/png;base64,AAAA); color: red"></div>"#)
            .unwrap();
        let bg = doc.get_element_by_id("bg").unwrap();
        assert_eq!(
            doc.outer_html(bg),
            r#"<div id="bg" style="background-image: url(data:image/png;base64,AAAA); color: red;"></div>"#
        );
    }

    #[test]
    fn test_script_text_is_raw() {
        let doc = HtmlParser::new()
            .parse("<html><head><script>if (a < b) {}</script></head><body></body></html>")
            .unwrap();
        let script = doc.query_selector("script").unwrap().unwrap();
        assert_eq!(doc.inner_html(script), "if (a < b) {}");
    }
}
