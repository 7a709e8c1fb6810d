#![no_main]

use libfuzzer_sys::fuzz_target;
use zemon_content::upload::{UploadedFile, decode_upload};

fuzz_target!(|data: &[u8]| {
    for name in ["upload.txt", "upload.html", "upload.md", "upload.pdf"] {
        let file = UploadedFile::new(name, None, data.to_vec());
        let _ = decode_upload(&file);
    }
});
