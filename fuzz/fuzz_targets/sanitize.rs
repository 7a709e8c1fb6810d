#![no_main]

use libfuzzer_sys::fuzz_target;
use zemon_content::sanitizer::Sanitizer;

fuzz_target!(|data: &[u8]| {
    let Ok(html) = std::str::from_utf8(data) else {
        return;
    };

    let sanitizer = Sanitizer::new();
    let once = sanitizer.sanitize(html);
    let twice = sanitizer.sanitize(&once);
    assert_eq!(once, twice, "sanitize is not idempotent");
});
