//! Content-type classification tests
//!
//! Covers the three detection phases with content shaped like what authors
//! actually paste into the knowledge-base editor.

use proptest::prelude::*;
use zemon_content::content_type::{ContentType, DetectionPhase, classify, detect};

#[test]
fn test_blank_is_markdown() {
    for input in ["", " ", "\n\n", "\t \r\n"] {
        assert_eq!(classify(input), ContentType::Markdown, "{input:?}");
        assert_eq!(detect(input).phase, DetectionPhase::Empty);
    }
}

#[test]
fn test_well_formed_tags_are_html() {
    for input in [
        "<p>x</p>",
        "<div class=\"card\">Hello</div>",
        "Intro text <br/> more",
        "</span>",
        "<custom-widget data-id=\"1\"></custom-widget>",
    ] {
        let detection = detect(input);
        assert_eq!(detection.content_type, ContentType::Html, "{input:?}");
        assert_eq!(detection.phase, DetectionPhase::HtmlSignal);
    }
}

#[test]
fn test_html_signals_win_over_markdown_prefix() {
    let detection = detect("# Title\n\n<table><tr><td>1</td></tr></table>");
    assert_eq!(detection.content_type, ContentType::Html);
    assert_eq!(detection.signal, Some("tag"));
}

#[test]
fn test_entities_and_comments() {
    assert_eq!(detect("Fish &amp; chips").signal, Some("entity"));
    assert_eq!(detect("snowman &#9731;").signal, Some("entity"));
    assert_eq!(detect("hex &#x2603;").signal, Some("entity"));
    assert_eq!(detect("<!-- draft -->").signal, Some("comment-or-doctype"));
    assert_eq!(classify("AT&T"), ContentType::Markdown);
}

#[test]
fn test_unclosed_rich_container_is_html() {
    let detection = detect("<video src=clip.mp4");
    assert_eq!(detection.content_type, ContentType::Html);
    assert_eq!(detection.signal, Some("rich-container"));
}

#[test]
fn test_markdown_prefixes() {
    let cases = [
        ("# Title", "header"),
        ("###### Deep", "header"),
        ("* item", "unordered-list"),
        ("- item", "unordered-list"),
        ("1. first", "ordered-list"),
        ("> quoted", "blockquote"),
        ("| a | b |\n|---|---|", "table-header"),
        ("```rust\nfn main() {}\n```", "code-fence"),
        ("`cargo build` runs the build", "inline-code"),
        ("**Important** note", "bold"),
        ("*emphasis* here", "italic"),
        ("![logo](logo.png)", "image"),
        ("[docs](https://zemon.dev)", "link"),
    ];
    for (input, signal) in cases {
        let detection = detect(input);
        assert_eq!(detection.content_type, ContentType::Markdown, "{input:?}");
        assert_eq!(detection.phase, DetectionPhase::MarkdownSignal, "{input:?}");
        assert_eq!(detection.signal, Some(signal), "{input:?}");
    }
}

#[test]
fn test_header_later_in_text_is_disambiguated() {
    let detection = detect("Release notes\n\n## Fixes\nSeveral.");
    assert_eq!(detection.content_type, ContentType::Markdown);
    assert_eq!(detection.phase, DetectionPhase::Disambiguation);
    assert_eq!(detection.signal, Some("header-anywhere"));
}

#[test]
fn test_list_later_in_text_is_disambiguated() {
    let detection = detect("Checklist:\n  - install\n  - configure");
    assert_eq!(detection.phase, DetectionPhase::Disambiguation);
    assert_eq!(detection.signal, Some("list-anywhere"));
}

#[test]
fn test_plain_prose_falls_back_to_markdown() {
    let detection = detect("Just a sentence with 3 < 4 and 5 > 2.");
    assert_eq!(detection.content_type, ContentType::Markdown);
    assert_eq!(detection.phase, DetectionPhase::Fallback);
}

proptest! {
    #[test]
    fn prop_whitespace_only_is_markdown(ws in "[ \t\r\n]{0,40}") {
        prop_assert_eq!(classify(&ws), ContentType::Markdown);
    }

    #[test]
    fn prop_wrapped_in_paragraph_is_html(text in "[a-zA-Z0-9 .,]{0,60}") {
        prop_assert_eq!(classify(&format!("<p>{text}</p>")), ContentType::Html);
    }

    #[test]
    fn prop_markdown_prefixes_without_tags(
        prefix in prop::sample::select(vec!["# ", "* ", "1. "]),
        rest in "[a-zA-Z0-9 .,]{0,60}",
    ) {
        prop_assert_eq!(classify(&format!("{prefix}{rest}")), ContentType::Markdown);
    }

    #[test]
    fn prop_classification_is_deterministic(input in "\\PC{0,200}") {
        prop_assert_eq!(detect(&input), detect(&input));
    }
}
