//! Scoped presentational stylesheet for rendered previews
//!
//! Every rule is prefixed with the render target's scope class so the
//! stylesheet only reaches the mounted preview. The rules are cosmetic:
//! typography and spacing for headings, code blocks, tables, media and forms.

/// Attribute that marks the stylesheet injected by the renderer
pub const STYLE_MARKER_ATTRIBUTE: &str = "data-zemon-preview";

/// Default scope class of a render target
pub const DEFAULT_SCOPE_CLASS: &str = "zemon-html-content";

/// Rule bodies keyed by selector, relative to the scope class
const RULES: &[(&str, &str)] = &[
    ("", "line-height: 1.6; overflow-wrap: anywhere;"),
    (
        "h1, h2, h3, h4, h5, h6",
        "margin: 1.25em 0 0.5em; font-weight: 600; line-height: 1.25;",
    ),
    ("h1", "font-size: 2em;"),
    ("h2", "font-size: 1.5em;"),
    ("h3", "font-size: 1.25em;"),
    ("h4, h5, h6", "font-size: 1em;"),
    ("p, ul, ol, dl, blockquote, figure", "margin: 0 0 1em;"),
    ("ul, ol", "padding-left: 1.5em;"),
    (
        "blockquote",
        "padding: 0 1em; border-left: 0.25em solid #d0d7de; color: #57606a;",
    ),
    (
        "code, kbd, samp",
        "font-family: ui-monospace, SFMono-Regular, Menlo, monospace; font-size: 0.875em;",
    ),
    (
        ":not(pre) > code",
        "padding: 0.2em 0.4em; border-radius: 4px; background: rgba(175, 184, 193, 0.2);",
    ),
    (
        "pre",
        "padding: 1em; overflow: auto; border-radius: 6px; background: #f6f8fa; white-space: pre;",
    ),
    (
        "table",
        "display: block; width: max-content; max-width: 100%; overflow: auto; border-collapse: collapse; margin: 0 0 1em;",
    ),
    ("th, td", "padding: 0.4em 0.8em; border: 1px solid #d0d7de;"),
    ("th", "font-weight: 600; background: #f6f8fa;"),
    ("img, video, iframe", "max-width: 100%; height: auto;"),
    ("iframe", "aspect-ratio: 16 / 9; width: 100%; border: 0;"),
    ("figcaption", "font-size: 0.875em; color: #57606a;"),
    ("hr", "height: 1px; margin: 1.5em 0; border: 0; background: #d0d7de;"),
    (
        "input, select, textarea, button",
        "font: inherit; padding: 0.3em 0.5em; border: 1px solid #d0d7de; border-radius: 4px;",
    ),
    ("fieldset", "margin: 0 0 1em; padding: 0.5em 1em; border: 1px solid #d0d7de;"),
    ("label", "display: inline-block; margin-bottom: 0.25em;"),
];

/// Build the stylesheet text scoped to `scope_class`
///
/// Each selector in a comma-separated group is prefixed separately.
///
/// # Examples
///
/// ```rust
/// use zemon_content::stylesheet::scoped_css;
///
/// let css = scoped_css("preview");
/// assert!(css.contains(".preview h1, .preview h2"));
/// ```
pub fn scoped_css(scope_class: &str) -> String {
    let scope = format!(".{scope_class}");
    let mut css = String::with_capacity(2048);
    for (selector, body) in RULES {
        if selector.is_empty() {
            css.push_str(&scope);
        } else {
            let scoped: Vec<String> = selector
                .split(',')
                .map(|part| format!("{scope} {}", part.trim()))
                .collect();
            css.push_str(&scoped.join(", "));
        }
        css.push_str(" { ");
        css.push_str(body);
        css.push_str(" }\n");
    }
    css
}

/// Build the full `<style>` element injected next to the mounted content
pub fn style_element(scope_class: &str) -> String {
    format!(
        "<style {STYLE_MARKER_ATTRIBUTE}=\"{scope_class}\">\n{}</style>",
        scoped_css(scope_class)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_is_scoped() {
        let css = scoped_css("scope-x");
        for line in css.lines() {
            let selectors = line.split(" { ").next().unwrap_or_default();
            for selector in selectors.split(", ") {
                assert!(selector.starts_with(".scope-x"), "unscoped selector: {selector}");
            }
        }
    }

    #[test]
    fn test_covers_headings_code_tables_media_forms() {
        let css = scoped_css(DEFAULT_SCOPE_CLASS);
        for needle in [".zemon-html-content h1", ".zemon-html-content pre", ".zemon-html-content table", ".zemon-html-content img", ".zemon-html-content input"] {
            assert!(css.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn test_style_element_is_marked() {
        let element = style_element("abc");
        assert!(element.starts_with("<style data-zemon-preview=\"abc\">"));
        assert!(element.ends_with("</style>"));
        assert_eq!(element.matches("<style").count(), 1);
    }
}
