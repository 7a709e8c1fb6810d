//! HTML5 parser using html5ever
//!
//! Author content is an HTML *fragment*, not a document. It is parsed with the
//! full WHATWG document algorithm and the children of the resulting `<body>`
//! are taken as the fragment. That keeps malformed markup handling identical
//! to what a browser does when the fragment is assigned to a container, and
//! means stray document-level elements (`<html>`, `<head>`, `<meta>` before
//! any content) never reach the sanitizer.
//!
//! The document is parsed in no-quirks mode, as the page hosting the preview
//! is. In quirks mode `<table>` does not close an open `<p>`, which would let
//! foster-parented blocks end up inside a paragraph.
//!
//! # Configuration
//!
//! The parser uses default html5ever configuration:
//! - **Scripting flag**: On, so `<noscript>` content is raw text (nothing is
//!   ever executed)
//! - **Error Handling**: Errors are collected but parsing continues
//! - **Tree Builder**: Uses RcDom for reference-counted DOM nodes
//!
//! # Examples
//!
//! ```rust
//! use zemon_content::parser::{parse_fragment, body_children};
//!
//! let dom = parse_fragment("<p>Hello<p>World");
//! assert_eq!(body_children(&dom).len(), 2);
//! ```

use html5ever::parse_document;
use html5ever::tendril::{StrTendril, TendrilSink};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Fed ahead of the fragment to select no-quirks mode
const NO_QUIRKS_DOCTYPE: &str = "<!DOCTYPE html>";

/// Parse an HTML fragment into a DOM tree
///
/// Parsing never fails: html5ever repairs any input according to the HTML5
/// error-recovery rules. Empty input yields a document with an empty body.
/// A doctype inside the fragment is ignored.
pub fn parse_fragment(html: &str) -> RcDom {
    let mut parser = parse_document(RcDom::default(), Default::default());
    parser.process(StrTendril::from(NO_QUIRKS_DOCTYPE));
    parser.process(StrTendril::from(html));
    parser.finish()
}

/// Children of the `<body>` element, in document order
///
/// Returns an empty list when the document has no body (for example when the
/// input was a `<frameset>`).
pub fn body_children(dom: &RcDom) -> Vec<Handle> {
    find_element(&dom.document, "html")
        .and_then(|html| find_element(&html, "body"))
        .map(|body| body.children.borrow().clone())
        .unwrap_or_default()
}

/// First direct child element of `node` with the given local name
fn find_element(node: &Handle, local_name: &str) -> Option<Handle> {
    node.children
        .borrow()
        .iter()
        .find(|child| match child.data {
            NodeData::Element { ref name, .. } => name.local.as_ref() == local_name,
            _ => false,
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn child_names(dom: &RcDom) -> Vec<String> {
        body_children(dom)
            .iter()
            .map(|child| match child.data {
                NodeData::Element { ref name, .. } => name.local.to_string(),
                NodeData::Text { .. } => "#text".to_string(),
                NodeData::Comment { .. } => "#comment".to_string(),
                _ => "#other".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_parse_simple_fragment() {
        let dom = parse_fragment("<h1>Hello</h1><p>World</p>");
        assert_eq!(child_names(&dom), vec!["h1", "p"]);
    }

    #[test]
    fn test_parse_malformed_html() {
        // Missing closing tags
        let dom = parse_fragment("<p>one<p>two");
        assert_eq!(child_names(&dom), vec!["p", "p"]);
    }

    #[test]
    fn test_parse_empty_input() {
        let dom = parse_fragment("");
        assert!(body_children(&dom).is_empty());
    }

    #[test]
    fn test_leading_whitespace_is_dropped() {
        let dom = parse_fragment("   \n<p>x</p>");
        assert_eq!(child_names(&dom), vec!["p"]);
    }

    #[test]
    fn test_head_elements_stay_out_of_body() {
        let dom = parse_fragment("<meta charset=utf-8><link rel=stylesheet href=x.css><p>Body</p>");
        assert_eq!(child_names(&dom), vec!["p"]);
    }

    #[test]
    fn test_text_and_comments() {
        let dom = parse_fragment("plain <!-- note --> text");
        assert_eq!(child_names(&dom), vec!["#text", "#comment", "#text"]);
    }

    #[test]
    fn test_frameset_has_no_body() {
        let dom = parse_fragment("<frameset><frame src=x></frameset>");
        assert!(body_children(&dom).is_empty());
    }

    #[test]
    fn test_table_closes_open_paragraph() {
        let dom = parse_fragment("<p>Intro<table><tr><td>x</td></tr></table>");
        assert_eq!(child_names(&dom), vec!["p", "table"]);
    }

    #[test]
    fn test_fragment_doctype_ignored() {
        let dom = parse_fragment("<!DOCTYPE foo><p>x</p>");
        assert_eq!(child_names(&dom), vec!["p"]);
    }

    #[test]
    fn test_misnested_tags() {
        let dom = parse_fragment("<b><i>text</b></i>");
        assert_eq!(child_names(&dom), vec!["b"]);
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(input in "\\PC{0,200}") {
            let dom = parse_fragment(&input);
            let _ = body_children(&dom);
        }

        #[test]
        fn prop_unclosed_tags_handled(
            tag in prop::sample::select(vec!["div", "p", "span", "h1", "ul", "li", "table"]),
            content in "[a-zA-Z0-9 ]{1,50}",
        ) {
            let dom = parse_fragment(&format!("<{tag}>{content}"));
            prop_assert!(!body_children(&dom).is_empty());
        }
    }
}
