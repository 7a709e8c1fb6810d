//! Walks a few editor inputs through classification and preview.
//!
//! Run with `RUST_LOG=zemon_content=debug cargo run --example preview_demo`
//! to see the pipeline's events.

use tracing_subscriber::EnvFilter;
use zemon_content::content_type::detect;
use zemon_content::preview::{PreviewView, preview_into};
use zemon_content::record::ContentRecord;
use zemon_content::render::{HtmlRenderer, RenderTarget};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let inputs = [
        "",
        "## Release notes\n\n- faster search\n- dark theme",
        "Release notes\n\n## Fixes\nSeveral.",
        "<h2>Release notes</h2><p onclick=\"track()\">Faster <a href=\"javascript:x()\">search</a></p>",
        "<h2>Release notes</h2><p>Faster search</p>",
    ];

    let renderer = HtmlRenderer::new();
    let mut target = match RenderTarget::new("kb-preview") {
        Ok(target) => target,
        Err(e) => {
            eprintln!("Invalid scope class: {e}");
            return;
        }
    };
    let mut record = ContentRecord::default();

    for input in inputs {
        record.edit(input);
        let detection = detect(input);
        println!("=== input: {input:?}");
        println!(
            "type: {} (phase {:?}, signal {:?})",
            detection.content_type.as_str(),
            detection.phase,
            detection.signal
        );

        let view = preview_into(&record, &renderer, &mut target);
        if let PreviewView::Html { outcome, .. } = &view {
            println!(
                "fingerprint: {} changed: {} removed: {} dropped handlers: {} dropped uris: {}",
                outcome.fingerprint,
                outcome.changed,
                outcome.report.removed_elements,
                outcome.report.dropped_event_handlers,
                outcome.report.dropped_unsafe_uris
            );
        }
        println!("{}\n", view.to_html());
    }
}
