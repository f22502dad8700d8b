//! Shared HTML tree-walk serialization helpers.
//!
//! Article HTML is never mutated in place: the sanitizer and the image
//! localizer each parse with `scraper`, walk the tree, and emit a fresh
//! string. These helpers cover the pieces both walkers share.

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{Html, Node};

/// Elements with no closing tag, serialized as `<name .../>`.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// The fragment parser wraps parsed content in a synthetic `<html>` element;
/// this returns the real top-level nodes of the fragment.
pub fn fragment_children<'a>(doc: &'a Html) -> Vec<NodeRef<'a, Node>> {
    let mut nodes = Vec::new();
    for child in doc.tree.root().children() {
        match child.value() {
            Node::Element(el) if el.name() == "html" => nodes.extend(child.children()),
            _ => nodes.push(child),
        }
    }
    nodes
}

/// Write `<name attr="...">`, self-closing for void elements.
pub fn write_open_tag(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.name());
    for (name, value) in element.attrs() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        // encode_safe also covers '<', which XHTML forbids in attribute values
        out.push_str(&html_escape::encode_safe(value));
        out.push('"');
    }
    if is_void(element.name()) {
        out.push_str("/>");
    } else {
        out.push('>');
    }
}

pub fn write_close_tag(out: &mut String, element: &Element) {
    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}

pub fn write_text(out: &mut String, text: &str) {
    out.push_str(&html_escape::encode_text(text));
}

pub fn write_comment(out: &mut String, comment: &str) {
    out.push_str("<!--");
    out.push_str(comment);
    out.push_str("-->");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_element_markup(html: &str) -> String {
        let doc = Html::parse_fragment(html);
        let mut out = String::new();
        for node in fragment_children(&doc) {
            if let Node::Element(el) = node.value() {
                write_open_tag(&mut out, el);
                break;
            }
        }
        out
    }

    #[test]
    fn test_void_element_self_closes() {
        let markup = first_element_markup("<br>");
        assert_eq!(markup, "<br/>");
    }

    #[test]
    fn test_attribute_values_escaped() {
        let markup = first_element_markup(r#"<p title="a&quot;b">x</p>"#);
        assert!(markup.starts_with("<p"));
        assert!(markup.contains("a&quot;b"));
    }

    #[test]
    fn test_text_escaped() {
        let mut out = String::new();
        write_text(&mut out, "a < b & c");
        assert_eq!(out, "a &lt; b &amp; c");
    }

    #[test]
    fn test_fragment_children_unwraps_synthetic_html() {
        let doc = Html::parse_fragment("<p>one</p><p>two</p>");
        let elements = fragment_children(&doc)
            .into_iter()
            .filter(|n| n.value().is_element())
            .count();
        assert_eq!(elements, 2);
    }
}
