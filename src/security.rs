//! Unconditional security checks applied underneath every sanitization policy
//!
//! The [`SanitizationPolicy`](crate::policy::SanitizationPolicy) decides what
//! authors may use. This module decides what nobody may use, whatever the
//! policy says:
//!
//! - Script-bearing and raw-text elements (`<script>`, `<style>`,
//!   `<template>`, frames, plugins) are removed together with their content
//! - Inline event handlers (every `on*` attribute) and `srcdoc` are removed
//! - `javascript:`, `vbscript:`, `data:`, `file:` and `about:` URIs are
//!   removed, after stripping the whitespace and control characters browsers
//!   ignore inside URLs
//! - Nesting depth is bounded so the recursive serializer cannot overflow
//!   the stack
//!
//! # Threat Model
//!
//! Content comes from dashboard authors and is shown to other staff. A
//! compromised or careless author account must not be able to run script in
//! another user's session.

use crate::policy::SanitizationPolicy;

/// Maximum allowed nesting depth for HTML elements
/// Prevents stack overflow from deeply nested structures
pub const MAX_NESTING_DEPTH: usize = 512;

/// Elements removed together with their children, regardless of policy
const DANGEROUS_ELEMENTS: &[&str] = &[
    "script",    // JavaScript execution
    "style",     // CSS injection
    "template",  // Inert content that scripts can clone in
    "noscript",  // Parsed differently with scripting on
    "title",     // Raw text, no place in a fragment
    "xmp",       // Raw text
    "plaintext", // Swallows the rest of the document
    "noembed",   // Raw text
    "noframes",  // Raw text
    "frame",     // Loads external documents
    "frameset",  // Replaces the body
    "object",    // Can execute plugins
    "embed",     // Can execute plugins
    "applet",    // Legacy Java applets
];

/// Scope-boundary elements removed with their content unless allow-listed.
/// Unwrapping them would let nested formatting (`<a>` inside `<a>`) surface.
const SCOPE_BOUNDARY_ELEMENTS: &[&str] = &["marquee"];

/// Attributes removed regardless of policy
const DANGEROUS_ATTRIBUTES: &[&str] = &[
    "srcdoc", // Inline document for iframes
];

/// Dangerous URL schemes that should be blocked
const DANGEROUS_URL_SCHEMES: &[&str] = &[
    "javascript:", // JavaScript execution
    "data:",       // Can contain executable content
    "vbscript:",   // VBScript execution (legacy IE)
    "file:",       // Local file access
    "about:",      // Browser internal URLs
];

/// Attributes whose values are URLs
const URI_ATTRIBUTES: &[&str] = &[
    "href",
    "src",
    "action",
    "formaction",
    "poster",
    "cite",
    "background",
    "longdesc",
    "xlink:href",
];

/// Attributes whose values are comma-separated image candidate lists
const URI_LIST_ATTRIBUTES: &[&str] = &["srcset"];

/// Action to take when sanitizing an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeAction {
    /// Keep the element (attributes are filtered separately)
    Allow,
    /// Drop the element but keep its sanitized children
    Unwrap,
    /// Remove the element and all its children
    Remove,
}

/// Why an attribute was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// `on*` handler
    EventHandler,
    /// Dangerous regardless of policy
    Dangerous,
    /// Not in the allow-list, or forbidden by the policy
    NotAllowed,
    /// URI with a blocked or unknown scheme
    UnsafeUri,
}

/// Verdict for a single attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeVerdict {
    Keep,
    Drop(DropReason),
}

/// Security validator for HTML input
pub struct SecurityValidator {
    /// Maximum allowed nesting depth
    max_depth: usize,
}

impl SecurityValidator {
    /// Create a new security validator with default settings
    pub fn new() -> Self {
        Self {
            max_depth: MAX_NESTING_DEPTH,
        }
    }

    /// Create a security validator with custom maximum depth
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decide what to do with an element
    ///
    /// Dangerous elements are always removed. Policy-forbidden elements are
    /// removed with their content, allow-listed ones are kept, and anything
    /// else is unwrapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use zemon_content::policy::{PolicyBuilder, SanitizationPolicy};
    /// use zemon_content::security::{SanitizeAction, SecurityValidator};
    ///
    /// let validator = SecurityValidator::new();
    /// let policy = SanitizationPolicy::standard();
    /// assert_eq!(validator.check_element("script", policy), SanitizeAction::Remove);
    /// assert_eq!(validator.check_element("div", policy), SanitizeAction::Allow);
    /// assert_eq!(validator.check_element("font", policy), SanitizeAction::Unwrap);
    ///
    /// // Even a policy that allows <script> cannot keep it
    /// let reckless = PolicyBuilder::standard().allow_tags(["script"]).build();
    /// assert_eq!(validator.check_element("script", &reckless), SanitizeAction::Remove);
    /// ```
    pub fn check_element(&self, tag_name: &str, policy: &SanitizationPolicy) -> SanitizeAction {
        if self.is_dangerous_element(tag_name) || policy.forbids_tag(tag_name) {
            SanitizeAction::Remove
        } else if policy.allows_tag(tag_name) {
            SanitizeAction::Allow
        } else if SCOPE_BOUNDARY_ELEMENTS.contains(&tag_name) {
            SanitizeAction::Remove
        } else {
            SanitizeAction::Unwrap
        }
    }

    pub fn is_dangerous_element(&self, tag_name: &str) -> bool {
        DANGEROUS_ELEMENTS.contains(&tag_name)
    }

    /// Check if an attribute is an inline event handler
    ///
    /// # Examples
    ///
    /// ```
    /// use zemon_content::security::SecurityValidator;
    ///
    /// let validator = SecurityValidator::new();
    /// assert!(validator.is_event_handler("onclick"));
    /// assert!(validator.is_event_handler("ONLOAD"));
    /// assert!(!validator.is_event_handler("href"));
    /// ```
    pub fn is_event_handler(&self, attr_name: &str) -> bool {
        attr_name.len() > 2
            && attr_name
                .get(..2)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
    }

    pub fn is_uri_attribute(&self, attr_name: &str) -> bool {
        URI_ATTRIBUTES.contains(&attr_name)
    }

    /// Check if a URL uses a dangerous scheme
    ///
    /// Whitespace and control characters are stripped first, so
    /// `"jav\tascript:"` is caught the same way a browser would read it.
    ///
    /// # Examples
    ///
    /// ```
    /// use zemon_content::security::SecurityValidator;
    ///
    /// let validator = SecurityValidator::new();
    /// assert!(validator.is_dangerous_url("javascript:alert('xss')"));
    /// assert!(validator.is_dangerous_url(" java\nscript:alert(1)"));
    /// assert!(validator.is_dangerous_url("data:text/html,<script>alert('xss')</script>"));
    /// assert!(!validator.is_dangerous_url("https://example.com"));
    /// assert!(!validator.is_dangerous_url("/relative/path"));
    /// ```
    pub fn is_dangerous_url(&self, url: &str) -> bool {
        let url_lower = strip_uri_whitespace(url).to_ascii_lowercase();
        DANGEROUS_URL_SCHEMES
            .iter()
            .any(|scheme| url_lower.starts_with(scheme))
    }

    /// Decide whether an attribute survives
    ///
    /// Unconditional checks run first; the policy only ever narrows further.
    pub fn check_attribute(
        &self,
        attr_name: &str,
        value: &str,
        policy: &SanitizationPolicy,
    ) -> AttributeVerdict {
        if self.is_event_handler(attr_name) {
            return AttributeVerdict::Drop(DropReason::EventHandler);
        }
        if DANGEROUS_ATTRIBUTES.contains(&attr_name) {
            return AttributeVerdict::Drop(DropReason::Dangerous);
        }
        if !policy.allows_attribute(attr_name) {
            return AttributeVerdict::Drop(DropReason::NotAllowed);
        }
        if self.is_uri_attribute(attr_name) {
            if self.is_dangerous_url(value) {
                return AttributeVerdict::Drop(DropReason::UnsafeUri);
            }
            let stripped = strip_uri_whitespace(value);
            if !stripped.is_empty() && !policy.allows_uri(&stripped) {
                return AttributeVerdict::Drop(DropReason::UnsafeUri);
            }
        }
        if URI_LIST_ATTRIBUTES.contains(&attr_name) && !self.is_safe_srcset(value, policy) {
            return AttributeVerdict::Drop(DropReason::UnsafeUri);
        }
        AttributeVerdict::Keep
    }

    /// Check every candidate URL of a `srcset` value
    ///
    /// A candidate is a URL followed by optional width or density
    /// descriptors. One bad candidate rejects the whole list.
    ///
    /// # Examples
    ///
    /// ```
    /// use zemon_content::policy::SanitizationPolicy;
    /// use zemon_content::security::SecurityValidator;
    ///
    /// let validator = SecurityValidator::new();
    /// let policy = SanitizationPolicy::standard();
    /// assert!(validator.is_safe_srcset("a.png 1x, /img/b.png 2x", policy));
    /// assert!(!validator.is_safe_srcset("a.png 1x, javascript:alert(1) 2x", policy));
    /// ```
    pub fn is_safe_srcset(&self, value: &str, policy: &SanitizationPolicy) -> bool {
        value.split(',').all(|candidate| {
            if self.is_dangerous_url(candidate) {
                return false;
            }
            match candidate.split_ascii_whitespace().next() {
                Some(url) => policy.allows_uri(&strip_uri_whitespace(url)),
                None => true,
            }
        })
    }

    /// Validate nesting depth to prevent stack overflow
    ///
    /// # Examples
    ///
    /// ```
    /// use zemon_content::security::SecurityValidator;
    ///
    /// let validator = SecurityValidator::with_max_depth(100);
    /// assert!(validator.validate_depth(50).is_ok());
    /// assert!(validator.validate_depth(150).is_err());
    /// ```
    pub fn validate_depth(&self, depth: usize) -> Result<(), String> {
        if depth > self.max_depth {
            Err(format!(
                "HTML nesting depth {} exceeds maximum allowed depth {}",
                depth, self.max_depth
            ))
        } else {
            Ok(())
        }
    }
}

impl Default for SecurityValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove the characters browsers ignore when reading a URL attribute
///
/// Covers ASCII control characters and space, NBSP, and the Unicode space
/// separators (`U+1680`, `U+180E`, `U+2000`-`U+2029`, `U+205F`, `U+3000`).
pub fn strip_uri_whitespace(value: &str) -> String {
    value
        .chars()
        .filter(|&c| {
            !matches!(c,
                '\u{0000}'..='\u{0020}'
                | '\u{007F}'
                | '\u{00A0}'
                | '\u{1680}'
                | '\u{180E}'
                | '\u{2000}'..='\u{2029}'
                | '\u{205F}'
                | '\u{3000}')
        })
        .collect()
}
