//! Sanitization policy: allow-lists, forbid-lists and the URI allow regex
//!
//! A [`SanitizationPolicy`] is immutable once built. Forbidden sets always
//! override allowed sets (deny wins), so adding a name to both lists removes
//! it. The standard dashboard policy is built once per process and shared via
//! [`SanitizationPolicy::standard`]; callers that need a variation start from
//! [`PolicyBuilder::standard`] and adjust it.
//!
//! # Examples
//!
//! ```rust
//! use zemon_content::policy::{PolicyBuilder, SanitizationPolicy};
//!
//! let standard = SanitizationPolicy::standard();
//! assert!(standard.allows_tag("table"));
//! assert!(!standard.allows_tag("script"));
//!
//! // Deny wins
//! let policy = PolicyBuilder::standard().forbid_tags(["table"]).build();
//! assert!(!policy.allows_tag("table"));
//! ```

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Default URI allow pattern, applied to attribute values after HTML
/// whitespace and control characters are stripped.
///
/// Accepts `http(s)`, `mailto`, `tel`, `callto`, `sms`, `cid` and `xmpp`,
/// plus relative and protocol-relative references (anything whose first
/// character is not a letter, or whose leading letters are not followed by
/// a colon).
pub const DEFAULT_URI_PATTERN: &str =
    r"(?i)^(?:(?:https?|mailto|tel|callto|sms|cid|xmpp):|[^a-z]|[a-z+.\-]+(?:[^a-z+.\-:]|$))";

const STRUCTURAL_TAGS: &[&str] = &["p", "br", "hr", "span", "div", "h1", "h2", "h3", "h4", "h5", "h6"];

const FORMATTING_TAGS: &[&str] = &[
    "b", "strong", "i", "em", "u", "s", "strike", "del", "ins", "mark", "small", "sub", "sup",
    "code", "pre", "kbd", "samp", "var", "abbr", "cite", "q", "blockquote", "time",
];

const LIST_TAGS: &[&str] = &["ul", "ol", "li", "dl", "dt", "dd"];

const SECTIONING_TAGS: &[&str] = &[
    "section", "article", "aside", "header", "footer", "nav", "main", "figure", "figcaption",
    "address",
];

const MEDIA_TAGS: &[&str] = &[
    "a", "img", "picture", "source", "iframe", "video", "audio", "track",
];

const TABLE_TAGS: &[&str] = &[
    "table", "caption", "thead", "tbody", "tfoot", "tr", "th", "td", "colgroup", "col",
];

const FORM_TAGS: &[&str] = &[
    "form", "input", "textarea", "select", "option", "optgroup", "button", "label", "fieldset",
    "legend", "datalist", "output", "progress", "meter",
];

const INTERACTIVE_TAGS: &[&str] = &["details", "summary", "dialog"];

const GLOBAL_ATTRIBUTES: &[&str] = &["id", "class", "title", "lang", "dir", "hidden", "role", "tabindex"];

const LINK_ATTRIBUTES: &[&str] = &["href", "target", "rel", "download", "hreflang"];

const MEDIA_ATTRIBUTES: &[&str] = &[
    "src", "srcset", "sizes", "alt", "width", "height", "loading", "poster", "controls",
    "autoplay", "loop", "muted", "playsinline", "preload", "allow", "allowfullscreen",
    "frameborder", "kind", "srclang", "label", "default", "type",
];

const TABLE_ATTRIBUTES: &[&str] = &["colspan", "rowspan", "scope", "headers", "span", "align", "valign"];

const FORM_ATTRIBUTES: &[&str] = &[
    "name", "value", "placeholder", "disabled", "readonly", "required", "checked", "selected",
    "multiple", "min", "max", "step", "pattern", "maxlength", "minlength", "size", "rows", "cols",
    "for", "form", "method", "action", "formaction", "enctype", "autocomplete", "novalidate",
];

const SEMANTIC_ATTRIBUTES: &[&str] = &["cite", "datetime", "open", "start", "reversed"];

/// Document-structural and script-bearing elements
const STANDARD_FORBIDDEN_TAGS: &[&str] = &[
    "script", "style", "object", "embed", "applet", "base", "meta", "link", "noscript", "frame",
    "frameset", "noframes", "template",
];

const STANDARD_FORBIDDEN_ATTRIBUTES: &[&str] = &["style", "srcdoc", "formtarget"];

/// Immutable sanitization policy
#[derive(Debug, Clone)]
pub struct SanitizationPolicy {
    allowed_tags: BTreeSet<String>,
    allowed_attributes: BTreeSet<String>,
    forbidden_tags: BTreeSet<String>,
    forbidden_attributes: BTreeSet<String>,
    allow_data_attributes: bool,
    allow_aria_attributes: bool,
    uri_pattern: Option<Regex>,
}

impl SanitizationPolicy {
    /// Shared standard dashboard policy
    pub fn standard() -> &'static SanitizationPolicy {
        static STANDARD: OnceLock<SanitizationPolicy> = OnceLock::new();
        STANDARD.get_or_init(|| PolicyBuilder::standard().build())
    }

    /// Whether an element with this (lowercase) name may be kept
    pub fn allows_tag(&self, tag_name: &str) -> bool {
        !self.forbids_tag(tag_name) && self.allowed_tags.contains(tag_name)
    }

    /// Whether the tag is explicitly forbidden
    pub fn forbids_tag(&self, tag_name: &str) -> bool {
        self.forbidden_tags.contains(tag_name)
    }

    /// Whether an attribute with this (lowercase) name may be kept
    ///
    /// Forbidden names are rejected first. `data-*` and `aria-*` names are
    /// accepted when the corresponding wildcard is enabled and the suffix is
    /// well-formed.
    pub fn allows_attribute(&self, attr_name: &str) -> bool {
        if self.forbidden_attributes.contains(attr_name) {
            return false;
        }
        if self.allowed_attributes.contains(attr_name) {
            return true;
        }
        if let Some(suffix) = attr_name.strip_prefix("data-") {
            return self.allow_data_attributes && is_wildcard_suffix(suffix, true);
        }
        if let Some(suffix) = attr_name.strip_prefix("aria-") {
            return self.allow_aria_attributes && is_wildcard_suffix(suffix, false);
        }
        false
    }

    /// Whether a (whitespace-stripped) URI value matches the allow regex
    ///
    /// A policy whose pattern failed to compile allows no URIs at all.
    pub fn allows_uri(&self, uri: &str) -> bool {
        self.uri_pattern.as_ref().is_some_and(|re| re.is_match(uri))
    }

    pub fn allowed_tags(&self) -> impl Iterator<Item = &str> {
        self.allowed_tags.iter().map(String::as_str)
    }

    pub fn forbidden_tags(&self) -> impl Iterator<Item = &str> {
        self.forbidden_tags.iter().map(String::as_str)
    }

    pub fn forbidden_attributes(&self) -> impl Iterator<Item = &str> {
        self.forbidden_attributes.iter().map(String::as_str)
    }
}

impl Default for SanitizationPolicy {
    fn default() -> Self {
        PolicyBuilder::standard().build()
    }
}

fn is_wildcard_suffix(suffix: &str, allow_dot: bool) -> bool {
    !suffix.is_empty()
        && suffix.chars().all(|c| {
            c.is_ascii_alphanumeric() || c == '-' || c == '_' || (allow_dot && c == '.')
        })
}

/// Builder for [`SanitizationPolicy`]
#[derive(Debug, Clone, Default)]
pub struct PolicyBuilder {
    allowed_tags: BTreeSet<String>,
    allowed_attributes: BTreeSet<String>,
    forbidden_tags: BTreeSet<String>,
    forbidden_attributes: BTreeSet<String>,
    allow_data_attributes: bool,
    allow_aria_attributes: bool,
    uri_pattern: Option<String>,
}

impl PolicyBuilder {
    /// Empty policy: nothing allowed, nothing forbidden, no URIs accepted
    pub fn empty() -> Self {
        Self::default()
    }

    /// The dashboard's standard policy
    pub fn standard() -> Self {
        let tag_groups = [
            STRUCTURAL_TAGS,
            FORMATTING_TAGS,
            LIST_TAGS,
            SECTIONING_TAGS,
            MEDIA_TAGS,
            TABLE_TAGS,
            FORM_TAGS,
            INTERACTIVE_TAGS,
        ];
        let attribute_groups = [
            GLOBAL_ATTRIBUTES,
            LINK_ATTRIBUTES,
            MEDIA_ATTRIBUTES,
            TABLE_ATTRIBUTES,
            FORM_ATTRIBUTES,
            SEMANTIC_ATTRIBUTES,
        ];

        let mut builder = Self::empty()
            .forbid_tags(STANDARD_FORBIDDEN_TAGS.iter().copied())
            .forbid_attributes(STANDARD_FORBIDDEN_ATTRIBUTES.iter().copied())
            .allow_data_attributes(true)
            .allow_aria_attributes(true)
            .uri_pattern(DEFAULT_URI_PATTERN);
        for group in tag_groups {
            builder = builder.allow_tags(group.iter().copied());
        }
        for group in attribute_groups {
            builder = builder.allow_attributes(group.iter().copied());
        }
        builder
    }

    pub fn allow_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_tags
            .extend(tags.into_iter().map(|t| t.as_ref().to_ascii_lowercase()));
        self
    }

    pub fn allow_attributes<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_attributes
            .extend(attrs.into_iter().map(|a| a.as_ref().to_ascii_lowercase()));
        self
    }

    pub fn forbid_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.forbidden_tags
            .extend(tags.into_iter().map(|t| t.as_ref().to_ascii_lowercase()));
        self
    }

    pub fn forbid_attributes<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.forbidden_attributes
            .extend(attrs.into_iter().map(|a| a.as_ref().to_ascii_lowercase()));
        self
    }

    pub fn allow_data_attributes(mut self, allow: bool) -> Self {
        self.allow_data_attributes = allow;
        self
    }

    pub fn allow_aria_attributes(mut self, allow: bool) -> Self {
        self.allow_aria_attributes = allow;
        self
    }

    pub fn uri_pattern(mut self, pattern: &str) -> Self {
        self.uri_pattern = Some(pattern.to_string());
        self
    }

    /// Build the policy
    ///
    /// An invalid URI pattern is logged and leaves the policy rejecting every
    /// URI, so a typo can only make the policy stricter.
    pub fn build(self) -> SanitizationPolicy {
        let uri_pattern = self.uri_pattern.and_then(|pattern| match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(error = %e, "Invalid URI allow pattern, rejecting all URIs");
                None
            }
        });

        SanitizationPolicy {
            allowed_tags: self.allowed_tags,
            allowed_attributes: self.allowed_attributes,
            forbidden_tags: self.forbidden_tags,
            forbidden_attributes: self.forbidden_attributes,
            allow_data_attributes: self.allow_data_attributes,
            allow_aria_attributes: self.allow_aria_attributes,
            uri_pattern,
        }
    }
}
