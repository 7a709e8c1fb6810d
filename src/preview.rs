//! Content preview dispatch
//!
//! Picks how a [`ContentRecord`] is shown: an empty state, the literal text
//! in a preformatted block, or sanitized HTML through [`HtmlRenderer`].
//! Markdown is not transformed; the author sees exactly what they typed.

use crate::content_type::ContentType;
use crate::record::ContentRecord;
use crate::render::{HtmlRenderer, RenderOutcome, RenderTarget};

/// Class of the `<pre>` block used for Markdown previews
pub const RAW_PREVIEW_CLASS: &str = "zemon-preview-raw";

/// Class of the empty-state placeholder
pub const EMPTY_PREVIEW_CLASS: &str = "zemon-preview-empty";

/// What the preview pane shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView {
    /// Nothing to show; the renderer was not invoked
    Empty,
    /// Literal text, whitespace preserved
    Preformatted(String),
    /// Sanitized markup with its stylesheet
    Html {
        markup: String,
        outcome: RenderOutcome,
    },
}

impl PreviewView {
    /// Markup for the preview pane
    pub fn to_html(&self) -> String {
        match self {
            PreviewView::Empty => {
                format!("<p class=\"{EMPTY_PREVIEW_CLASS}\">Nothing to preview yet.</p>")
            }
            PreviewView::Preformatted(text) => {
                let mut html = format!("<pre class=\"{RAW_PREVIEW_CLASS}\">");
                // Keep a leading newline through the parser's first-newline rule
                if text.starts_with('\n') {
                    html.push('\n');
                }
                escape_html(text, &mut html);
                html.push_str("</pre>");
                html
            }
            PreviewView::Html { markup, .. } => markup.clone(),
        }
    }
}

/// Preview a record with the standard renderer and a fresh target
///
/// # Examples
///
/// ```rust
/// use zemon_content::preview::{preview, PreviewView};
/// use zemon_content::record::ContentRecord;
///
/// let view = preview(&ContentRecord::new("## Title\n\nSome body text"));
/// assert_eq!(view, PreviewView::Preformatted("## Title\n\nSome body text".to_string()));
/// assert!(view.to_html().contains("## Title"));
/// ```
pub fn preview(record: &ContentRecord) -> PreviewView {
    preview_into(record, &HtmlRenderer::new(), &mut RenderTarget::default())
}

/// Preview a record, rendering HTML into an existing target
pub fn preview_into(
    record: &ContentRecord,
    renderer: &HtmlRenderer<'_>,
    target: &mut RenderTarget,
) -> PreviewView {
    if record.is_blank() {
        target.clear();
        return PreviewView::Empty;
    }
    match record.content_type() {
        ContentType::Markdown => {
            target.clear();
            PreviewView::Preformatted(record.content().to_string())
        }
        ContentType::Html => {
            let outcome = renderer.render(target, record.content());
            PreviewView::Html {
                markup: target.to_html(),
                outcome,
            }
        }
    }
}

fn escape_html(text: &str, output: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
}
