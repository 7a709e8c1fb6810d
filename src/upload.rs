//! Upload decoding
//!
//! Authors can fill a document form from a local file. Text formats are
//! decoded into form content with the charset cascade from
//! [`crate::charset`]; PDFs are kept as opaque attachments.
//!
//! | Extension            | Result                         |
//! |----------------------|--------------------------------|
//! | `.md`, `.markdown`   | text, Markdown                 |
//! | `.html`, `.htm`      | text, HTML                     |
//! | `.txt`               | text, type from the classifier |
//! | `.pdf`               | binary attachment              |

use crate::charset::decode_text;
use crate::content_type::{ContentType, classify};
use crate::error::ContentError;

/// A file read from the author's machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    /// Browser-reported media type, possibly with a charset parameter
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, media_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.map(str::to_string),
            bytes,
        }
    }
}

/// Kind of file, from its extension or media type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Markdown,
    Html,
    PlainText,
    Pdf,
}

impl UploadKind {
    /// Classify by extension, falling back to the media type
    pub fn of(file: &UploadedFile) -> Option<Self> {
        let extension = file
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        let by_extension = match extension.as_deref() {
            Some("md" | "markdown") => Some(UploadKind::Markdown),
            Some("html" | "htm") => Some(UploadKind::Html),
            Some("txt") => Some(UploadKind::PlainText),
            Some("pdf") => Some(UploadKind::Pdf),
            _ => None,
        };
        by_extension.or_else(|| {
            let essence = file
                .media_type
                .as_deref()?
                .split(';')
                .next()?
                .trim()
                .to_ascii_lowercase();
            match essence.as_str() {
                "text/markdown" | "text/x-markdown" => Some(UploadKind::Markdown),
                "text/html" => Some(UploadKind::Html),
                "text/plain" => Some(UploadKind::PlainText),
                "application/pdf" => Some(UploadKind::Pdf),
                _ => None,
            }
        })
    }
}

/// Result of decoding an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedUpload {
    /// Text ready to become form content
    Text {
        content: String,
        content_type: ContentType,
        /// Whether the type came from the extension rather than the classifier
        declared: bool,
        encoding: &'static str,
    },
    /// File sent as-is with the form
    Attachment {
        file_name: String,
        media_type: String,
        bytes: Vec<u8>,
    },
}

/// Decode an uploaded file into content or an attachment
///
/// # Errors
///
/// - [`ContentError::InvalidInput`] for empty files and unsupported types
/// - [`ContentError::EncodingError`] when text bytes are not valid in the
///   detected charset
///
/// # Examples
///
/// ```rust
/// use zemon_content::upload::{decode_upload, DecodedUpload, UploadedFile};
/// use zemon_content::content_type::ContentType;
///
/// let file = UploadedFile::new("notes.txt", Some("text/plain"), b"<p>hi</p>".to_vec());
/// match decode_upload(&file).unwrap() {
///     DecodedUpload::Text { content_type, .. } => assert_eq!(content_type, ContentType::Html),
///     _ => unreachable!(),
/// }
/// ```
pub fn decode_upload(file: &UploadedFile) -> Result<DecodedUpload, ContentError> {
    if file.bytes.is_empty() {
        return Err(ContentError::InvalidInput(format!(
            "File is empty: {}",
            file.file_name
        )));
    }

    let kind = UploadKind::of(file).ok_or_else(|| {
        ContentError::InvalidInput(format!("Unsupported file type: {}", file.file_name))
    })?;

    if kind == UploadKind::Pdf {
        tracing::debug!(file = %file.file_name, size = file.bytes.len(), "Keeping PDF as attachment");
        return Ok(DecodedUpload::Attachment {
            file_name: file.file_name.clone(),
            media_type: "application/pdf".to_string(),
            bytes: file.bytes.clone(),
        });
    }

    let decoded = decode_text(&file.bytes, file.media_type.as_deref())?;
    let (content_type, declared) = match kind {
        UploadKind::Markdown => (ContentType::Markdown, true),
        UploadKind::Html => (ContentType::Html, true),
        _ => (classify(&decoded.text), false),
    };

    tracing::debug!(
        file = %file.file_name,
        content_type = %content_type,
        encoding = decoded.encoding,
        "Decoded upload"
    );

    Ok(DecodedUpload::Text {
        content: decoded.text,
        content_type,
        declared,
        encoding: decoded.encoding,
    })
}
