//! HTML sanitizer - filters a parsed fragment down to a safe subset
//!
//! The sanitizer parses author HTML with html5ever, walks the resulting DOM
//! depth-first and serializes only what the [`SanitizationPolicy`] and the
//! [`SecurityValidator`] let through. The output is markup as a string, never
//! a live tree.
//!
//! # Element Handling
//!
//! Every element gets one of three outcomes:
//!
//! - **Allow**: the element is written with its surviving attributes
//! - **Unwrap**: the element is dropped but its sanitized children are kept
//! - **Remove**: the element and everything inside it are dropped
//!
//! Elements outside the HTML namespace (inline SVG and MathML) are removed.
//! Comments, doctypes and processing instructions never reach the output.
//!
//! # Idempotence
//!
//! Sanitizing already-sanitized output is a byte-for-byte no-op. The
//! serializer writes what the parser would read back unchanged:
//!
//! - text escapes `&`, `<`, `>` and NBSP; attribute values escape `&`, `"`
//!   and NBSP
//! - void elements get no end tag
//! - an extra newline is written after `<pre>`, `<textarea>` and `<listing>`
//!   when their content starts with one, because the parser drops the first
//! - leading whitespace is trimmed, because the parser discards it before the
//!   body starts
//!
//! # Examples
//!
//! ```rust
//! use zemon_content::sanitizer::Sanitizer;
//!
//! let sanitizer = Sanitizer::new();
//! let clean = sanitizer.sanitize(r#"<p onclick="steal()">Hi <script>alert(1)</script></p>"#);
//! assert_eq!(clean, "<p>Hi </p>");
//! ```

use crate::parser::{body_children, parse_fragment};
use crate::policy::SanitizationPolicy;
use crate::security::{AttributeVerdict, DropReason, SanitizeAction, SecurityValidator};
use html5ever::LocalName;
use markup5ever_rcdom::{Handle, NodeData};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Elements that never have content or an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose first newline is swallowed by the parser
const LEADING_NEWLINE_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

/// Elements whose children are raw text and are not rendered
const OPAQUE_CONTENT_ELEMENTS: &[&str] = &["iframe"];

/// Allowed elements in the parser's "special" category
const SPECIAL_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "button", "caption", "col", "colgroup",
    "dd", "details", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "iframe", "img", "input", "li", "main",
    "nav", "ol", "p", "pre", "section", "select", "source", "summary", "table", "tbody", "td",
    "textarea", "tfoot", "th", "thead", "tr", "track", "ul",
];

/// Allowed elements whose start tag closes a `<p>` open in button scope
///
/// `table` is left out: the fragment is parsed in no-quirks mode, so the
/// parser has already closed the paragraph.
const P_CLOSING_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "dialog", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "ul",
];

/// Allowed elements that bound the default scope
const SCOPE_BOUNDARIES: &[&str] = &["caption", "table", "td", "th"];

/// Allowed elements that bound button scope
const BUTTON_SCOPE_BOUNDARIES: &[&str] = &["button", "caption", "table", "td", "th"];

/// Allowed elements that put a marker on the active formatting list
const FORMATTING_MARKERS: &[&str] = &["caption", "td", "th"];

/// Counters describing what a sanitize pass removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Elements removed together with their content
    pub removed_elements: usize,
    /// Elements dropped while keeping their children
    pub unwrapped_elements: usize,
    /// Inline event handlers dropped
    pub dropped_event_handlers: usize,
    /// Attributes with unsafe URI values dropped
    pub dropped_unsafe_uris: usize,
    /// Other attributes dropped by the policy
    pub dropped_attributes: usize,
    /// Subtrees dropped because they exceeded the nesting limit
    pub truncated_subtrees: usize,
    /// Comments, doctypes and processing instructions dropped
    pub dropped_other_nodes: usize,
}

impl SanitizeReport {
    /// True when the input needed no changes beyond re-serialization
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Output of a sanitize pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub html: String,
    pub report: SanitizeReport,
}

/// HTML sanitizer bound to a policy
pub struct Sanitizer<'p> {
    policy: &'p SanitizationPolicy,
    security_validator: SecurityValidator,
}

impl Sanitizer<'static> {
    /// Create a sanitizer using the shared standard policy
    pub fn new() -> Self {
        Self::with_policy(SanitizationPolicy::standard())
    }
}

impl Default for Sanitizer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p> Sanitizer<'p> {
    /// Create a sanitizer for a custom policy
    pub fn with_policy(policy: &'p SanitizationPolicy) -> Self {
        Self {
            policy,
            security_validator: SecurityValidator::new(),
        }
    }

    /// Use a custom maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.security_validator = SecurityValidator::with_max_depth(max_depth);
        self
    }

    pub fn policy(&self) -> &SanitizationPolicy {
        self.policy
    }

    /// Sanitize HTML and return safe markup
    pub fn sanitize(&self, html: &str) -> String {
        self.sanitize_with_report(html).html
    }

    /// Sanitize HTML and report what was removed
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zemon_content::sanitizer::Sanitizer;
    ///
    /// let result = Sanitizer::new().sanitize_with_report("<img src=x onerror=alert(1)>");
    /// assert_eq!(result.html, r#"<img src="x">"#);
    /// assert_eq!(result.report.dropped_event_handlers, 1);
    /// ```
    pub fn sanitize_with_report(&self, html: &str) -> Sanitized {
        let mut walk = Walk::default();
        if html.trim().is_empty() {
            return Sanitized {
                html: String::new(),
                report: walk.report,
            };
        }

        let dom = parse_fragment(html);
        let mut output = String::with_capacity(html.len());
        for child in body_children(&dom) {
            self.traverse_node(&child, &mut output, 1, &mut walk);
        }

        let trimmed_len = output
            .trim_start_matches(['\t', '\n', '\u{000C}', '\r', ' '])
            .len();
        let html = output.split_off(output.len() - trimmed_len);
        let report = walk.report;

        if report.truncated_subtrees > 0 {
            tracing::warn!(
                truncated = report.truncated_subtrees,
                max_depth = self.security_validator.max_depth(),
                "Dropped content nested beyond the maximum depth"
            );
        }
        tracing::debug!(
            output_len = html.len(),
            removed = report.removed_elements,
            unwrapped = report.unwrapped_elements,
            event_handlers = report.dropped_event_handlers,
            unsafe_uris = report.dropped_unsafe_uris,
            attributes = report.dropped_attributes,
            "Sanitized HTML fragment"
        );

        Sanitized { html, report }
    }

    /// Write a node and its sanitized subtree
    fn traverse_node(&self, node: &Handle, output: &mut String, depth: usize, walk: &mut Walk) {
        match node.data {
            NodeData::Element { ref name, .. } => {
                if self.security_validator.validate_depth(depth).is_err() {
                    walk.report.truncated_subtrees += 1;
                    return;
                }
                if name.ns.as_ref() != HTML_NAMESPACE {
                    walk.report.removed_elements += 1;
                    return;
                }
                let tag_name = name.local.as_ref();
                match self.security_validator.check_element(tag_name, self.policy) {
                    SanitizeAction::Remove => {
                        walk.report.removed_elements += 1;
                    }
                    SanitizeAction::Allow if !walk.reopens_open_element(tag_name) => {
                        walk.open.push(name.local.clone());
                        self.write_element(node, tag_name, output, depth, walk);
                        walk.open.pop();
                    }
                    // Unwrapped, or would be closed early when the output is parsed again
                    SanitizeAction::Allow | SanitizeAction::Unwrap => {
                        walk.report.unwrapped_elements += 1;
                        self.traverse_children(node, output, depth + 1, walk);
                    }
                }
            }
            NodeData::Text { ref contents } => {
                escape_text(&contents.borrow(), output);
            }
            NodeData::Document => {
                self.traverse_children(node, output, depth, walk);
            }
            NodeData::Comment { .. }
            | NodeData::Doctype { .. }
            | NodeData::ProcessingInstruction { .. } => {
                walk.report.dropped_other_nodes += 1;
            }
        }
    }

    fn traverse_children(&self, node: &Handle, output: &mut String, depth: usize, walk: &mut Walk) {
        for child in node.children.borrow().iter() {
            self.traverse_node(child, output, depth, walk);
        }
    }

    /// Write an allowed element: start tag, filtered attributes, content, end tag
    fn write_element(
        &self,
        node: &Handle,
        tag_name: &str,
        output: &mut String,
        depth: usize,
        walk: &mut Walk,
    ) {
        output.push('<');
        output.push_str(tag_name);

        if let NodeData::Element { ref attrs, .. } = node.data {
            for attr in attrs.borrow().iter() {
                let attr_name = attr.name.local.as_ref();
                match self
                    .security_validator
                    .check_attribute(attr_name, &attr.value, self.policy)
                {
                    AttributeVerdict::Keep => {
                        output.push(' ');
                        output.push_str(attr_name);
                        output.push_str("=\"");
                        escape_attribute(&attr.value, output);
                        output.push('"');
                    }
                    AttributeVerdict::Drop(DropReason::EventHandler) => {
                        walk.report.dropped_event_handlers += 1;
                    }
                    AttributeVerdict::Drop(DropReason::UnsafeUri) => {
                        walk.report.dropped_unsafe_uris += 1;
                    }
                    AttributeVerdict::Drop(DropReason::Dangerous | DropReason::NotAllowed) => {
                        walk.report.dropped_attributes += 1;
                    }
                }
            }
        }
        output.push('>');

        if VOID_ELEMENTS.contains(&tag_name) {
            return;
        }

        if !OPAQUE_CONTENT_ELEMENTS.contains(&tag_name) {
            let mut content = String::new();
            self.traverse_children(node, &mut content, depth + 1, walk);
            if LEADING_NEWLINE_ELEMENTS.contains(&tag_name) && content.starts_with('\n') {
                output.push('\n');
            }
            output.push_str(&content);
        }

        output.push_str("</");
        output.push_str(tag_name);
        output.push('>');
    }
}

/// Mutable state of one sanitize pass
#[derive(Default)]
struct Walk {
    report: SanitizeReport,
    /// Elements written so far and not yet closed, outermost first
    open: Vec<LocalName>,
}

impl Walk {
    /// Whether a start tag for `tag_name` would implicitly close an element
    /// that is still open in the output
    ///
    /// Unwrapping a special element such as `<center>` can leave an `<li>`
    /// nested in another `<li>`, which the parser splits apart on the next
    /// pass. Foster parenting out of a table does the same with blocks inside
    /// a `<p>` and with nested anchors.
    fn reopens_open_element(&self, tag_name: &str) -> bool {
        if P_CLOSING_ELEMENTS.contains(&tag_name) && self.has_in_scope("p", BUTTON_SCOPE_BOUNDARIES) {
            return true;
        }
        let current = self.open.last().map(|name| name.as_ref());
        match tag_name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => current.is_some_and(is_heading),
            "option" | "optgroup" => current == Some("option"),
            "li" => self.has_open_list_item(&["li"]),
            "dd" | "dt" => self.has_open_list_item(&["dd", "dt"]),
            // The parser ignores a form start tag while another form is open
            "form" => self.open.iter().any(|name| name.as_ref() == "form"),
            "button" => self.has_in_scope("button", SCOPE_BOUNDARIES),
            // An anchor start tag closes any anchor after the last marker
            "a" => self.has_open_anchor(),
            _ => false,
        }
    }

    fn has_in_scope(&self, target: &str, boundaries: &[&str]) -> bool {
        for name in self.open.iter().rev() {
            let name = name.as_ref();
            if name == target {
                return true;
            }
            if boundaries.contains(&name) {
                return false;
            }
        }
        false
    }

    fn has_open_anchor(&self) -> bool {
        self.open
            .iter()
            .rev()
            .take_while(|name| !FORMATTING_MARKERS.contains(&name.as_ref()))
            .any(|name| name.as_ref() == "a")
    }

    fn has_open_list_item(&self, items: &[&str]) -> bool {
        for name in self.open.iter().rev() {
            let name = name.as_ref();
            if items.contains(&name) {
                return true;
            }
            if SPECIAL_ELEMENTS.contains(&name) && !matches!(name, "address" | "div" | "p") {
                return false;
            }
        }
        false
    }
}

fn is_heading(tag_name: &str) -> bool {
    matches!(tag_name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn escape_text(text: &str, output: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{00A0}' => output.push_str("&nbsp;"),
            _ => output.push(ch),
        }
    }
}

fn escape_attribute(value: &str, output: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '\u{00A0}' => output.push_str("&nbsp;"),
            _ => output.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyBuilder;
    use proptest::prelude::*;

    fn clean(html: &str) -> String {
        Sanitizer::new().sanitize(html)
    }

    #[test]
    fn test_allowed_markup_passes_through() {
        let html = r#"<h2 id="intro">Intro</h2><p class="lead">Some <strong>bold</strong> and <em>em</em>.</p>"#;
        assert_eq!(clean(html), html);
    }

    #[test]
    fn test_script_removed_with_content() {
        assert_eq!(clean("<p>a</p><script>alert(1)</script><p>b</p>"), "<p>a</p><p>b</p>");
        assert_eq!(clean("<script>alert(1)</script>"), "");
    }

    #[test]
    fn test_style_tag_removed() {
        assert_eq!(clean("<style>p { color: red }</style><p>x</p>"), "<p>x</p>");
        assert_eq!(clean("<p>x<style>p{}</style></p>"), "<p>x</p>");
    }

    #[test]
    fn test_unknown_element_unwrapped() {
        assert_eq!(clean("<p><font color=red>warn</font>ing</p>"), "<p>warning</p>");
        assert_eq!(clean("<custom-card><b>x</b></custom-card>"), "<b>x</b>");
    }

    #[test]
    fn test_forbidden_elements_removed() {
        assert_eq!(clean("<p>a<object data=x>fallback</object>b</p>"), "<p>ab</p>");
        assert_eq!(clean("<p>a<embed src=x>b</p>"), "<p>ab</p>");
        assert_eq!(clean("<template><p>hidden</p></template><p>shown</p>"), "<p>shown</p>");
    }

    #[test]
    fn test_svg_and_math_removed() {
        assert_eq!(clean("<p>a<svg><a href=x>y</a></svg>b</p>"), "<p>ab</p>");
        assert_eq!(clean("<p>a<math><mi>x</mi></math>b</p>"), "<p>ab</p>");
    }

    #[test]
    fn test_event_handlers_removed() {
        let result = Sanitizer::new().sanitize_with_report(r#"<div onclick="x()" onmouseover="y()" class="c">t</div>"#);
        assert_eq!(result.html, r#"<div class="c">t</div>"#);
        assert_eq!(result.report.dropped_event_handlers, 2);
    }

    #[test]
    fn test_javascript_href_removed() {
        assert_eq!(clean(r#"<a href="javascript:alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(clean(r#"<a href="  JaVaScRiPt:alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(clean(r#"<a href="jav&#x09;ascript:alert(1)">x</a>"#), "<a>x</a>");
    }

    #[test]
    fn test_safe_href_kept() {
        let html = r#"<a href="https://zemon.dev/forge?id=1&amp;x=2" target="_blank" rel="noopener">x</a>"#;
        assert_eq!(clean(html), html);
        assert_eq!(clean(r#"<a href="mailto:team@zemon.dev">m</a>"#), r#"<a href="mailto:team@zemon.dev">m</a>"#);
    }

    #[test]
    fn test_unknown_scheme_removed() {
        assert_eq!(clean(r#"<a href="ftp://files">x</a>"#), "<a>x</a>");
        assert_eq!(clean(r#"<img src="data:image/png;base64,AAAA" alt="a">"#), r#"<img alt="a">"#);
    }

    #[test]
    fn test_form_action_checked() {
        assert_eq!(
            clean(r#"<form action="javascript:go()"><button formaction="vbscript:x">Go</button></form>"#),
            "<form><button>Go</button></form>"
        );
    }

    #[test]
    fn test_iframe_kept_without_srcdoc_or_content() {
        assert_eq!(
            clean(r#"<iframe src="https://www.youtube.com/embed/x" srcdoc="<script>x</script>" allowfullscreen>fallback</iframe>"#),
            r#"<iframe src="https://www.youtube.com/embed/x" allowfullscreen=""></iframe>"#
        );
    }

    #[test]
    fn test_style_attribute_removed() {
        assert_eq!(clean(r#"<p style="background:url(javascript:x)">x</p>"#), "<p>x</p>");
    }

    #[test]
    fn test_data_and_aria_attributes_kept() {
        let html = r#"<div data-id="7" aria-label="card" role="note" tabindex="0">x</div>"#;
        assert_eq!(clean(html), html);
    }

    #[test]
    fn test_comments_dropped() {
        let result = Sanitizer::new().sanitize_with_report("<p>a<!-- secret -->b</p>");
        assert_eq!(result.html, "<p>ab</p>");
        assert_eq!(result.report.dropped_other_nodes, 1);
    }

    #[test]
    fn test_void_elements() {
        assert_eq!(clean("<p>a<br/>b</p><hr>"), "<p>a<br>b</p><hr>");
        assert_eq!(clean(r#"<img src="a.png" alt="A">"#), r#"<img src="a.png" alt="A">"#);
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(clean("<p>1 &lt; 2 &amp;&amp; 3 &gt; 2</p>"), "<p>1 &lt; 2 &amp;&amp; 3 &gt; 2</p>");
        assert_eq!(clean("<p>a&nbsp;b</p>"), "<p>a&nbsp;b</p>");
        assert_eq!(clean("<p title='say \"hi\"'>x</p>"), r#"<p title="say &quot;hi&quot;">x</p>"#);
    }

    #[test]
    fn test_pre_leading_newline_preserved() {
        let once = clean("<pre>\n\ncode</pre>");
        assert_eq!(once, "<pre>\n\ncode</pre>");
        assert_eq!(clean(&once), once);
        assert_eq!(clean("<pre>\ncode</pre>"), "<pre>code</pre>");
    }

    #[test]
    fn test_leading_whitespace_trimmed() {
        assert_eq!(clean("<object></object>   text"), "text");
        assert_eq!(clean("  <p>x</p>  "), "<p>x</p>  ");
    }

    #[test]
    fn test_table_structure() {
        assert_eq!(
            clean("<table><tr><td colspan=2 onclick=x>a</td></tr></table>"),
            r#"<table><tbody><tr><td colspan="2">a</td></tr></tbody></table>"#
        );
    }

    #[test]
    fn test_depth_limit_truncates() {
        let mut html = String::new();
        for _ in 0..20 {
            html.push_str("<div>");
        }
        html.push_str("deep");
        let result = Sanitizer::new().with_max_depth(5).sanitize_with_report(&html);
        assert_eq!(result.html, "<div><div><div><div><div></div></div></div></div></div>");
        assert_eq!(result.report.truncated_subtrees, 1);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("  \n "), "");
        assert!(Sanitizer::new().sanitize_with_report("").report.is_clean());
    }

    #[test]
    fn test_custom_policy_deny_wins() {
        let policy = PolicyBuilder::standard().forbid_tags(["table"]).build();
        let sanitizer = Sanitizer::with_policy(&policy);
        assert_eq!(sanitizer.sanitize("<p>a</p><table><tr><td>x</td></tr></table>"), "<p>a</p>");
    }

    #[test]
    fn test_sanitizer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Sanitizer<'static>>();
    }

    #[test]
    fn test_custom_policy_cannot_allow_script() {
        let policy = PolicyBuilder::standard().allow_tags(["script"]).build();
        let sanitizer = Sanitizer::with_policy(&policy);
        assert_eq!(sanitizer.sanitize("<script>alert(1)</script><p>x</p>"), "<p>x</p>");
    }

    #[test]
    fn test_marquee_removed_not_unwrapped() {
        assert_eq!(clean("<a href=x>1<marquee><a href=y>2</a></marquee></a>"), r#"<a href="x">1</a>"#);
    }

    #[test]
    fn test_unwrapping_never_nests_implicitly_closed_elements() {
        let once = clean("<ul><li>a<center><li>b</li></center></li></ul>");
        assert_eq!(once, "<ul><li>ab</li></ul>");
        assert_eq!(clean(&once), once);

        let once = clean("<h3>a<font><h3>b</h3></font></h3>");
        assert_eq!(once, "<h3>ab</h3>");
        assert_eq!(clean(&once), once);

        let once = clean("<form><div></form><form><input name=q></form></div>");
        assert_eq!(once, r#"<form><div><input name="q"></div></form>"#);
        assert_eq!(clean(&once), once);
    }

    #[test]
    fn test_foster_parented_blocks_stay_stable() {
        let once = clean("<p>Intro<table><div>cell</div><tr><td>x</td></tr></table></p>");
        assert_eq!(
            once,
            "<p>Intro</p><div>cell</div><table><tbody><tr><td>x</td></tr></tbody></table><p></p>"
        );
        assert_eq!(clean(&once), once);

        let once = clean("<p><table><h1>");
        assert_eq!(clean(&once), once);
        assert!(!once.contains("<p><h1>"));
    }

    #[test]
    fn test_foster_parented_anchor_not_nested() {
        let once = clean("<a href=x><table><a href=y>z</a></table></a>");
        assert_eq!(once.matches("<a").count(), 1);
        assert_eq!(clean(&once), once);
    }

    #[test]
    fn test_foster_parented_button_not_nested() {
        let once = clean("<button>a<table><button>b</button></table></button>");
        assert_eq!(once.matches("<button").count(), 1);
        assert_eq!(clean(&once), once);
    }

    #[test]
    fn test_block_inside_button_in_paragraph_kept() {
        let html = "<p><button><div>go</div></button></p>";
        assert_eq!(clean(html), html);
    }

    #[test]
    fn test_anchor_inside_table_cell_kept() {
        let html = r#"<a href="x"><table><tbody><tr><td><a href="y">in</a></td></tr></tbody></table></a>"#;
        assert_eq!(clean(html), html);
    }

    #[test]
    fn test_list_item_inside_nested_list_kept() {
        let html = "<ul><li>a<ul><li>b</li></ul></li></ul>";
        assert_eq!(clean(html), html);
    }

    fn fragment_strategy() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            "[a-zA-Z0-9 .,!?]{0,12}",
            Just("&amp;".to_string()),
            Just("&lt;tag&gt;".to_string()),
            Just("<br>".to_string()),
            Just("<img src=x onerror=alert(1)>".to_string()),
            Just("<script>alert(1)</script>".to_string()),
            Just("<!-- c -->".to_string()),
            Just("\n".to_string()),
        ];
        leaf.prop_recursive(4, 48, 4, |inner| {
            (
                prop::sample::select(vec![
                    "p", "div", "span", "b", "em", "a", "ul", "li", "pre", "blockquote", "font",
                    "section", "code", "custom-x", "style", "h3", "table", "tr", "td",
                    "button",
                ]),
                prop::sample::select(vec![
                    "",
                    " class=\"c\"",
                    " onclick=\"x()\"",
                    " href=\"javascript:alert(1)\"",
                    " href=\"/ok\"",
                    " data-k=\"v\"",
                    " style=\"color:red\"",
                ]),
                prop::collection::vec(inner, 0..4),
            )
                .prop_map(|(tag, attr, children)| {
                    format!("<{tag}{attr}>{}</{tag}>", children.concat())
                })
        })
    }

    proptest! {
        #[test]
        fn prop_sanitize_is_idempotent(html in fragment_strategy()) {
            let sanitizer = Sanitizer::new();
            let once = sanitizer.sanitize(&html);
            let twice = sanitizer.sanitize(&once);
            prop_assert_eq!(&once, &twice, "input: {}", html);
        }

        #[test]
        fn prop_no_script_vectors_survive(html in fragment_strategy()) {
            let out = Sanitizer::new().sanitize(&html).to_ascii_lowercase();
            prop_assert!(!out.contains("<script"));
            prop_assert!(!out.contains("onerror"));
            prop_assert!(!out.contains("onclick"));
            prop_assert!(!out.contains("javascript:"));
            prop_assert!(!out.contains("style="));
        }

        #[test]
        fn prop_arbitrary_input_never_panics(input in "\\PC{0,300}") {
            let _ = Sanitizer::new().sanitize(&input);
        }
    }
}
