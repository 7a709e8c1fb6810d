//! Content-type classification for author-supplied text
//!
//! Authors paste or type rich content into knowledge-base and Forge forms
//! without always declaring what it is. The classifier looks at the raw text
//! and decides whether it should be treated as HTML (and therefore go
//! through the sanitizer) or as Markdown.
//!
//! # Algorithm
//!
//! Classification runs in three ordered phases, first match wins:
//!
//! 1. **HTML signals** on the trimmed input: any tag-like construct, any HTML
//!    entity, or an opening rich container tag (`script`, `iframe`, `svg`,
//!    `canvas`, `video`, `audio`, `form`, `table`).
//! 2. **Markdown signals** anchored at the start of the input: headers, list
//!    markers, blockquotes, pipe tables, code fences, inline code, emphasis,
//!    links and images.
//! 3. **Disambiguation**: tags anywhere, headers anywhere, lists anywhere.
//!    HTML wins when both kinds of signal are present.
//!
//! Empty or whitespace-only input is always Markdown.
//!
//! # Examples
//!
//! ```rust
//! use zemon_content::content_type::{classify, ContentType};
//!
//! assert_eq!(classify("<p>Hello</p>"), ContentType::Html);
//! assert_eq!(classify("# Heading"), ContentType::Markdown);
//! assert_eq!(classify("   "), ContentType::Markdown);
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Declared or detected type of a piece of author content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Shown verbatim as preformatted text
    #[default]
    Markdown,
    /// Sanitized and rendered
    Html,
}

impl ContentType {
    /// Wire name used by the REST API (`documentType` field)
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Markdown => "markdown",
            ContentType::Html => "html",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ContentType::Markdown),
            "html" | "htm" => Ok(ContentType::Html),
            other => Err(format!("unknown content type '{other}'")),
        }
    }
}

/// Which classification phase produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionPhase {
    /// Input was empty or whitespace-only
    Empty,
    /// Phase 1 matched an HTML signal
    HtmlSignal,
    /// Phase 2 matched a leading Markdown signal
    MarkdownSignal,
    /// Phase 3 resolved the type
    Disambiguation,
    /// Nothing matched
    Fallback,
}

/// Full classification result, including the signal that decided it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub content_type: ContentType,
    pub phase: DetectionPhase,
    /// Name of the matching signal, if any
    pub signal: Option<&'static str>,
}

/// Ordered HTML signals tested against the trimmed input
const HTML_SIGNALS: &[(&str, &str)] = &[
    ("tag", r"(?i)</?[a-z][a-z0-9:-]*(?:\s[^<>]*)?/?>"),
    ("comment-or-doctype", r"(?i)<!(?:--|doctype)"),
    (
        "entity",
        r"&(?:[a-zA-Z][a-zA-Z0-9]{1,31}|#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6});",
    ),
    (
        "rich-container",
        r"(?i)<(?:script|iframe|svg|canvas|video|audio|form|table)\b",
    ),
];

/// Ordered Markdown signals anchored at the start of the trimmed input
const MARKDOWN_SIGNALS: &[(&str, &str)] = &[
    ("header", r"^#{1,6}\s"),
    ("unordered-list", r"^[*-]\s"),
    ("ordered-list", r"^\d+\.\s"),
    ("blockquote", r"^>\s"),
    ("table-header", r"^\|[^\n]*\|"),
    ("code-fence", r"^```"),
    ("inline-code", r"^`[^`\n]+`"),
    ("bold", r"^\*\*[^*\n]+\*\*"),
    ("italic", r"^\*[^*\s][^*\n]*\*"),
    ("image", r"^!\[[^\]\n]*\]\([^)\s]*\)"),
    ("link", r"^\[[^\]\n]*\]\([^)\s]*\)"),
];

const ANY_TAG: &str = r"(?i)</?[a-z][^<>]*>";
const ANY_HEADER: &str = r"(?m)^#{1,6}\s";
const ANY_LIST: &str = r"(?m)^\s*(?:[*+-]|\d+\.)\s";

fn compile_signals(signals: &'static [(&'static str, &'static str)]) -> Vec<(&'static str, Regex)> {
    signals
        .iter()
        .filter_map(|(name, pattern)| Regex::new(pattern).ok().map(|re| (*name, re)))
        .collect()
}

fn html_signals() -> &'static [(&'static str, Regex)] {
    static CELL: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    CELL.get_or_init(|| compile_signals(HTML_SIGNALS))
}

fn markdown_signals() -> &'static [(&'static str, Regex)] {
    static CELL: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    CELL.get_or_init(|| compile_signals(MARKDOWN_SIGNALS))
}

fn disambiguation_patterns() -> &'static [Option<Regex>; 3] {
    static CELL: OnceLock<[Option<Regex>; 3]> = OnceLock::new();
    CELL.get_or_init(|| {
        [
            Regex::new(ANY_TAG).ok(),
            Regex::new(ANY_HEADER).ok(),
            Regex::new(ANY_LIST).ok(),
        ]
    })
}

fn first_match(signals: &[(&'static str, Regex)], text: &str) -> Option<&'static str> {
    signals
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(name, _)| *name)
}

/// Classify content and report the deciding phase and signal
///
/// # Examples
///
/// ```rust
/// use zemon_content::content_type::{detect, ContentType, DetectionPhase};
///
/// let detection = detect("&amp; friends");
/// assert_eq!(detection.content_type, ContentType::Html);
/// assert_eq!(detection.phase, DetectionPhase::HtmlSignal);
/// assert_eq!(detection.signal, Some("entity"));
/// ```
pub fn detect(content: &str) -> Detection {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Detection {
            content_type: ContentType::Markdown,
            phase: DetectionPhase::Empty,
            signal: None,
        };
    }

    if let Some(signal) = first_match(html_signals(), trimmed) {
        return Detection {
            content_type: ContentType::Html,
            phase: DetectionPhase::HtmlSignal,
            signal: Some(signal),
        };
    }

    if let Some(signal) = first_match(markdown_signals(), trimmed) {
        return Detection {
            content_type: ContentType::Markdown,
            phase: DetectionPhase::MarkdownSignal,
            signal: Some(signal),
        };
    }

    let [any_tag, any_header, any_list] = disambiguation_patterns();
    let matches = |re: &Option<Regex>| re.as_ref().is_some_and(|re| re.is_match(content));
    let has_html = matches(any_tag);
    let has_header = matches(any_header);
    let has_list = matches(any_list);

    let resolved = if has_html {
        Some((ContentType::Html, "tag-anywhere"))
    } else if has_header {
        Some((ContentType::Markdown, "header-anywhere"))
    } else if has_list {
        Some((ContentType::Markdown, "list-anywhere"))
    } else {
        None
    };

    match resolved {
        Some((content_type, signal)) => Detection {
            content_type,
            phase: DetectionPhase::Disambiguation,
            signal: Some(signal),
        },
        None => Detection {
            content_type: ContentType::Markdown,
            phase: DetectionPhase::Fallback,
            signal: None,
        },
    }
}

/// Classify content as Markdown or HTML
pub fn classify(content: &str) -> ContentType {
    detect(content).content_type
}
