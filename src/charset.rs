//! Character encoding detection and decoding for uploaded text files
//!
//! # Detection Cascade
//!
//! The charset of an uploaded file is chosen by the first level that gives
//! an answer:
//!
//! 1. **Byte Order Mark**: UTF-8, UTF-16LE or UTF-16BE BOM at the start
//! 2. **Content-Type**: `charset` parameter of the file's media type
//! 3. **HTML Meta Tags**: `<meta charset>` or `<meta http-equiv="Content-Type">`
//!    within the first 1024 bytes
//! 4. **Default to UTF-8**
//!
//! # Examples
//!
//! ```rust
//! use zemon_content::charset::detect_charset;
//!
//! // Detect from Content-Type
//! let charset = detect_charset(Some("text/html; charset=ISO-8859-1"), b"<p>...</p>");
//! assert_eq!(charset, "ISO-8859-1");
//!
//! // A BOM beats everything else
//! let charset = detect_charset(Some("text/plain; charset=ISO-8859-1"), b"\xEF\xBB\xBFhello");
//! assert_eq!(charset, "UTF-8");
//!
//! // Default to UTF-8
//! let charset = detect_charset(None, b"# Notes");
//! assert_eq!(charset, "UTF-8");
//! ```

use crate::error::ContentError;
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::OnceLock;

/// Default charset when detection fails
const DEFAULT_CHARSET: &str = "UTF-8";

/// Maximum bytes to scan for meta charset tags
const META_SCAN_LIMIT: usize = 1024;

/// Text decoded from an uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Decoded content, without any BOM
    pub text: String,
    /// Canonical name of the encoding that was used
    pub encoding: &'static str,
}

/// Detect character encoding using the four-level cascade
///
/// Returns the detected charset label in uppercase. Always returns a label,
/// defaulting to "UTF-8". The label is not checked against the set of known
/// encodings here; [`decode_text`] does that.
pub fn detect_charset(content_type: Option<&str>, bytes: &[u8]) -> String {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return normalize_charset(encoding.name());
    }

    if let Some(ct) = content_type
        && let Some(charset) = extract_charset_from_content_type(ct)
    {
        return normalize_charset(&charset);
    }

    if let Some(charset) = extract_charset_from_html(bytes) {
        return normalize_charset(&charset);
    }

    DEFAULT_CHARSET.to_string()
}

/// Decode file bytes to a string using the detection cascade
///
/// A BOM is stripped from the output. Malformed byte sequences are an error
/// rather than being replaced with U+FFFD, so a file saved in the wrong
/// encoding is reported instead of silently corrupted.
///
/// # Errors
///
/// Returns [`ContentError::EncodingError`] when the detected label names no
/// known encoding, or when the bytes are not valid in that encoding.
///
/// # Examples
///
/// ```rust
/// use zemon_content::charset::decode_text;
///
/// let decoded = decode_text(b"caf\xE9", Some("text/plain; charset=windows-1252")).unwrap();
/// assert_eq!(decoded.text, "café");
/// assert_eq!(decoded.encoding, "windows-1252");
///
/// assert!(decode_text(b"caf\xE9", None).is_err());
/// ```
pub fn decode_text(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedText, ContentError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => {
            let label = detect_charset(content_type, bytes);
            let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| {
                ContentError::EncodingError(format!("Unsupported charset: {label}"))
            })?;
            (encoding, bytes)
        }
    };

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| {
            ContentError::EncodingError(format!(
                "Invalid byte sequence for encoding {}",
                encoding.name()
            ))
        })?;

    tracing::debug!(
        encoding = encoding.name(),
        input_len = bytes.len(),
        "Decoded uploaded text"
    );

    Ok(DecodedText {
        text: text.into_owned(),
        encoding: encoding.name(),
    })
}

/// Extract charset from a Content-Type value
///
/// # Supported Formats
///
/// - `text/html; charset=UTF-8`
/// - `text/html; charset="UTF-8"`
/// - `text/html;charset=UTF-8` (no space)
/// - `text/html; charset=UTF-8; boundary=...` (multiple parameters)
///
/// # Examples
///
/// ```rust
/// use zemon_content::charset::extract_charset_from_content_type;
///
/// assert_eq!(
///     extract_charset_from_content_type("text/markdown; charset=\"ISO-8859-1\""),
///     Some("ISO-8859-1".to_string())
/// );
/// assert_eq!(extract_charset_from_content_type("text/markdown"), None);
/// ```
pub fn extract_charset_from_content_type(content_type: &str) -> Option<String> {
    static CHARSET_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex =
        CHARSET_REGEX.get_or_init(|| Regex::new(r#"(?i)charset\s*=\s*"?([^";,\s]+)"?"#).ok());
    let regex = regex.as_ref()?;

    regex
        .captures(content_type)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract charset from HTML meta tags
///
/// Only the first 1024 bytes are scanned. Supports the HTML5
/// `<meta charset="...">` form and the HTML4 `http-equiv` form.
pub fn extract_charset_from_html(html: &[u8]) -> Option<String> {
    let scan_limit = std::cmp::min(html.len(), META_SCAN_LIMIT);
    let html_str = String::from_utf8_lossy(&html[..scan_limit]);

    static HTML5_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let html5_regex =
        HTML5_REGEX.get_or_init(|| Regex::new(r#"(?i)<meta\s+charset\s*=\s*"?([^";>\s]+)"?"#).ok());
    let html5_regex = html5_regex.as_ref()?;

    if let Some(caps) = html5_regex.captures(&html_str)
        && let Some(m) = caps.get(1)
    {
        return Some(m.as_str().to_string());
    }

    static HTML4_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let html4_regex = HTML4_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?i)<meta\s+http-equiv\s*=\s*"?Content-Type"?\s+content\s*=\s*"?[^">]*charset\s*=\s*([^";>\s]+)"?"#,
        )
        .ok()
    });
    let html4_regex = html4_regex.as_ref()?;

    html4_regex
        .captures(&html_str)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Normalize charset name to uppercase
pub fn normalize_charset(charset: &str) -> String {
    charset.to_uppercase()
}
