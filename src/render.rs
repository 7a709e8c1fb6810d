//! HTML sanitizing renderer
//!
//! Mounts sanitized markup into a [`RenderTarget`] and keeps exactly one
//! scoped stylesheet next to it. Every call re-runs the whole pass: the
//! previous markup and stylesheet are removed, the content is sanitized
//! again and the result is mounted.
//!
//! # Examples
//!
//! ```rust
//! use zemon_content::render::{HtmlRenderer, RenderTarget};
//!
//! let renderer = HtmlRenderer::new();
//! let mut target = RenderTarget::default();
//!
//! let first = renderer.render(&mut target, "<p onclick=x()>Hello</p>");
//! assert!(first.changed);
//! assert_eq!(target.mounted_html(), "<p>Hello</p>");
//!
//! let second = renderer.render(&mut target, "<p onclick=x()>Hello</p>");
//! assert!(!second.changed);
//! assert_eq!(target.to_html().matches("<style").count(), 1);
//! ```

use crate::error::ContentError;
use crate::fingerprint::Fingerprint;
use crate::policy::SanitizationPolicy;
use crate::sanitizer::{SanitizeReport, Sanitizer};
use crate::security::MAX_NESTING_DEPTH;
use crate::stylesheet::{DEFAULT_SCOPE_CLASS, style_element};
use regex::Regex;
use std::sync::OnceLock;

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Maximum element nesting depth kept by the sanitizer
    pub max_depth: usize,
    /// Inject the scoped stylesheet next to the mounted markup
    pub inject_stylesheet: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_NESTING_DEPTH,
            inject_stylesheet: true,
        }
    }
}

/// Container that rendered content is mounted into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    scope_class: String,
    mounted: String,
    style: Option<String>,
    last_fingerprint: Option<Fingerprint>,
    render_count: u64,
}

impl RenderTarget {
    /// Create an empty target scoped to `scope_class`
    ///
    /// The class must be a plain CSS identifier (letters, digits, `-`, `_`,
    /// not starting with a digit) since it is written into a selector and an
    /// attribute.
    pub fn new(scope_class: impl Into<String>) -> Result<Self, ContentError> {
        let scope_class = scope_class.into();
        if !is_css_identifier(&scope_class) {
            return Err(ContentError::InvalidInput(format!(
                "Invalid scope class: {scope_class:?}"
            )));
        }
        Ok(Self {
            scope_class,
            mounted: String::new(),
            style: None,
            last_fingerprint: None,
            render_count: 0,
        })
    }

    pub fn scope_class(&self) -> &str {
        &self.scope_class
    }

    /// Sanitized markup currently mounted
    pub fn mounted_html(&self) -> &str {
        &self.mounted
    }

    /// Injected `<style>` element, if any
    pub fn style_block(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Fingerprint of the mounted markup after the last render
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.last_fingerprint
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Remove mounted markup and the stylesheet
    pub fn clear(&mut self) {
        self.mounted.clear();
        self.style = None;
        self.last_fingerprint = None;
    }

    /// Stylesheet followed by the scoped container holding the mounted markup
    pub fn to_html(&self) -> String {
        let style = self.style.as_deref().unwrap_or_default();
        format!(
            "{style}<div class=\"{}\">{}</div>",
            self.scope_class, self.mounted
        )
    }
}

impl Default for RenderTarget {
    fn default() -> Self {
        Self {
            scope_class: DEFAULT_SCOPE_CLASS.to_string(),
            mounted: String::new(),
            style: None,
            last_fingerprint: None,
            render_count: 0,
        }
    }
}

/// Result of one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Fingerprint of the mounted markup
    pub fingerprint: Fingerprint,
    /// Whether the mounted markup differs from the previous render
    pub changed: bool,
    /// What the sanitizer removed
    pub report: SanitizeReport,
}

/// Sanitizes content and mounts it into render targets
pub struct HtmlRenderer<'p> {
    sanitizer: Sanitizer<'p>,
    options: RenderOptions,
}

impl HtmlRenderer<'static> {
    /// Renderer with the standard policy and default options
    pub fn new() -> Self {
        Self::with_policy(SanitizationPolicy::standard())
    }
}

impl Default for HtmlRenderer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p> HtmlRenderer<'p> {
    pub fn with_policy(policy: &'p SanitizationPolicy) -> Self {
        Self::with_options(policy, RenderOptions::default())
    }

    pub fn with_options(policy: &'p SanitizationPolicy, options: RenderOptions) -> Self {
        Self {
            sanitizer: Sanitizer::with_policy(policy).with_max_depth(options.max_depth),
            options,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Replace the target's content with sanitized `content`
    pub fn render(&self, target: &mut RenderTarget, content: &str) -> RenderOutcome {
        target.mounted.clear();
        target.style = None;

        let sanitized = self.sanitizer.sanitize_with_report(content);
        target.mounted = sanitized.html;
        if self.options.inject_stylesheet {
            target.style = Some(style_element(&target.scope_class));
        }

        let fingerprint = Fingerprint::of(target.mounted.as_bytes());
        let changed = target.last_fingerprint != Some(fingerprint);
        target.last_fingerprint = Some(fingerprint);
        target.render_count += 1;

        tracing::debug!(
            scope = %target.scope_class,
            fingerprint = %fingerprint,
            changed,
            render_count = target.render_count,
            "Rendered HTML preview"
        );

        RenderOutcome {
            fingerprint,
            changed,
            report: sanitized.report,
        }
    }
}

fn is_css_identifier(value: &str) -> bool {
    static IDENT_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    IDENT_REGEX
        .get_or_init(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").ok())
        .as_ref()
        .is_some_and(|regex| regex.is_match(value))
}
