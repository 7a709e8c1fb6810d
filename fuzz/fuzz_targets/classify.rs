#![no_main]

use libfuzzer_sys::fuzz_target;
use zemon_content::content_type::{ContentType, classify};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let content_type = classify(text);
    if text.trim().is_empty() {
        assert_eq!(content_type, ContentType::Markdown);
    }
});
