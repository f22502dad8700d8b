//! Article HTML cleanup.
//!
//! Drops executable and style markup (`<script>`/`<style>` and their
//! subtrees) while leaving structure, attributes, and media markup alone.

use ego_tree::NodeRef;
use scraper::{Html, Node};

use crate::markup;

/// Tags removed together with their entire subtree.
const STRIPPED_TAGS: &[&str] = &["script", "style"];

/// Return the HTML with script and style subtrees removed.
///
/// Empty input yields empty output. The input is never mutated; the result
/// is a fresh serialization of the remaining tree.
pub fn sanitize(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let doc = Html::parse_fragment(html);
    let mut out = String::new();
    for node in markup::fragment_children(&doc) {
        walk(&mut out, node);
    }
    out
}

fn walk(out: &mut String, node: NodeRef<Node>) {
    match node.value() {
        Node::Element(el) => {
            if STRIPPED_TAGS.contains(&el.name()) {
                return;
            }
            markup::write_open_tag(out, &el);
            if !markup::is_void(el.name()) {
                for child in node.children() {
                    walk(out, child);
                }
                markup::write_close_tag(out, &el);
            }
        }
        Node::Text(text) => markup::write_text(out, &text.text),
        Node::Comment(comment) => markup::write_comment(out, &comment.comment),
        _ => {
            for child in node.children() {
                walk(out, child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_script_and_contents() {
        let out = sanitize("<p>before</p><script>alert('x')</script><p>after</p>");
        assert!(!out.contains("script"));
        assert!(!out.contains("alert"));
        assert!(out.contains("<p>before</p>"));
        assert!(out.contains("<p>after</p>"));
    }

    #[test]
    fn test_removes_style_and_contents() {
        let out = sanitize("<style>p { color: red; }</style><p>text</p>");
        assert!(!out.contains("style"));
        assert!(!out.contains("color"));
        assert!(out.contains("<p>text</p>"));
    }

    #[test]
    fn test_removes_nested_script() {
        let out = sanitize("<div><p>keep</p><script>var x = 1;</script></div>");
        assert!(!out.contains("script"));
        assert!(out.contains("<p>keep</p>"));
        assert!(out.starts_with("<div>"));
    }

    #[test]
    fn test_preserves_structure_and_attributes() {
        let out = sanitize(r#"<div class="post"><img src="https://example.com/a.png" alt="pic"><p>hi</p></div>"#);
        assert!(out.contains(r#"class="post""#));
        assert!(out.contains(r#"src="https://example.com/a.png""#));
        assert!(out.contains(r#"alt="pic""#));
        assert!(out.contains("<p>hi</p>"));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(sanitize("just text"), "just text");
    }
}
