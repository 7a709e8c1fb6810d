//! Zemon Content - content pipeline for the Zemon admin dashboard
//!
//! Authors write rich content for knowledge-base documents and Forge
//! resources. This library decides whether that content is Markdown or HTML,
//! sanitizes HTML before it is shown to anyone, and renders previews.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `content_type`: Markdown/HTML classification of raw text
//! - `policy`: Allow/forbid sets and the URI allow pattern
//! - `security`: Checks no policy can relax
//! - `parser`: HTML5 parsing using html5ever
//! - `sanitizer`: DOM filtering and idempotent serialization
//! - `stylesheet`: Scoped preview stylesheet
//! - `render`: Mounts sanitized markup into render targets
//! - `preview`: Empty / preformatted / HTML preview dispatch
//! - `record`: Content records with editor auto-detect
//! - `form`: Document form validation, import and submission
//! - `api`: REST collaborator trait and error type
//! - `upload`, `charset`: Decoding of uploaded files
//! - `fingerprint`: BLAKE3 fingerprints of rendered output
//! - `preferences`: Persisted theme and sidebar state
//!
//! # Logging
//!
//! Events are emitted with `tracing`. The library never installs a
//! subscriber.
//!
//! # Example
//!
//! ```rust
//! use zemon_content::{ContentRecord, preview, PreviewView};
//!
//! let record = ContentRecord::new(r#"<p>Hi<img src=x onerror=alert(1)></p>"#);
//! match preview(&record) {
//!     PreviewView::Html { markup, .. } => assert!(markup.contains(r#"<p>Hi<img src="x"></p>"#)),
//!     other => panic!("unexpected preview {other:?}"),
//! }
//! ```

pub mod api;
pub mod charset;
pub mod content_type;
pub mod error;
pub mod fingerprint;
pub mod form;
pub mod parser;
pub mod policy;
pub mod preferences;
pub mod preview;
pub mod record;
pub mod render;
pub mod sanitizer;
pub mod security;
pub mod stylesheet;
pub mod upload;

// Re-export main types for convenience
pub use api::{ApiError, DocumentApi, DocumentId, DocumentPayload};
pub use content_type::{ContentType, classify, detect};
pub use error::ContentError;
pub use fingerprint::Fingerprint;
pub use form::{DocumentForm, FormError};
pub use policy::{PolicyBuilder, SanitizationPolicy};
pub use preferences::{FileStore, MemoryStore, PreferenceStore, Preferences, Theme};
pub use preview::{PreviewView, preview};
pub use record::ContentRecord;
pub use render::{HtmlRenderer, RenderOptions, RenderOutcome, RenderTarget};
pub use sanitizer::{Sanitized, Sanitizer};
pub use upload::{DecodedUpload, UploadedFile, decode_upload};
