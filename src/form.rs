//! Knowledge-base document form
//!
//! [`DocumentForm`] holds the editable [`DocumentDraft`], runs client-side
//! validation and guards against double submission. The network call itself
//! goes through a [`DocumentApi`] implementation supplied by the caller.
//!
//! # Submission
//!
//! A submission is either driven in one step with [`DocumentForm::submit`],
//! or split into [`DocumentForm::begin_submit`] and
//! [`DocumentForm::complete_submit`] when the request is sent elsewhere.
//! Between the two the form is in flight and further submissions are
//! rejected. There is no automatic retry: a failed submission leaves the
//! draft as it was.
//!
//! # Examples
//!
//! ```rust
//! use zemon_content::form::{DocumentForm, FormError};
//!
//! let mut form = DocumentForm::new();
//! form.content_changed("<p>Body</p>");
//! let err = form.begin_submit().unwrap_err();
//! assert!(matches!(err, FormError::Validation(_)));
//!
//! form.set_title("Onboarding");
//! let pending = form.begin_submit().unwrap();
//! assert_eq!(pending.payload.text_value("documentType"), Some("html"));
//! assert!(matches!(form.begin_submit(), Err(FormError::SubmissionInFlight)));
//! ```

use crate::api::{ApiError, DocumentApi, DocumentId, DocumentPayload, PayloadField};
use crate::content_type::ContentType;
use crate::policy::SanitizationPolicy;
use crate::record::ContentRecord;
use crate::security::strip_uri_whitespace;
use crate::upload::DecodedUpload;
use serde::Deserialize;
use thiserror::Error;

/// One failed field check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field check that failed, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", join_field_errors(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// First message for `field`, if it failed
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of a rejected form action
#[derive(Debug, Error)]
pub enum FormError {
    /// Client-side checks failed; no request was made
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    /// A previous submission has not completed
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    /// The backend rejected the request
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The JSON import could not be applied
    #[error("Import failed: {0}")]
    Import(String),
}

impl FormError {
    /// Message to show the author
    pub fn user_message(&self) -> String {
        match self {
            FormError::Api(err) => err.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

/// Attachment kept alongside the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Editable state of a knowledge-base document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentDraft {
    pub title: String,
    pub content: ContentRecord,
    pub source_url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub attachment: Option<Attachment>,
}

/// Partial document read from a JSON import
///
/// Every field is optional. Unknown keys are rejected so a typo never
/// silently drops data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ImportedDocument {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(alias = "contentType")]
    pub document_type: Option<ContentType>,
    pub source_url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Request prepared by [`DocumentForm::begin_submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    /// Document being updated, or `None` for a create
    pub document_id: Option<DocumentId>,
    pub payload: DocumentPayload,
}

/// Knowledge-base document form
#[derive(Debug, Clone, Default)]
pub struct DocumentForm {
    draft: DocumentDraft,
    document_id: Option<DocumentId>,
    in_flight: bool,
}

impl DocumentForm {
    /// Empty form for a new document
    pub fn new() -> Self {
        Self::default()
    }

    /// Form editing an existing document
    pub fn for_document(document_id: DocumentId, draft: DocumentDraft) -> Self {
        Self {
            draft,
            document_id: Some(document_id),
            in_flight: false,
        }
    }

    pub fn draft(&self) -> &DocumentDraft {
        &self.draft
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        self.document_id.as_ref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_source_url(&mut self, source_url: impl Into<String>) {
        self.draft.source_url = source_url.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.draft.category = category.into();
    }

    /// Replace tags; blanks and duplicates are dropped, order is kept
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if !tag.is_empty() && !normalized.iter().any(|existing| existing == tag) {
                normalized.push(tag.to_string());
            }
        }
        self.draft.tags = normalized;
    }

    /// Replace tags from comma-separated input
    pub fn set_tags_from_input(&mut self, input: &str) {
        self.set_tags(input.split(','));
    }

    /// Editor content changed; re-detects the type when auto-detect is on
    pub fn content_changed(&mut self, content: impl Into<String>) -> Option<ContentType> {
        self.draft.content.edit(content)
    }

    /// Author picked the type by hand
    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.draft.content.set_content_type(content_type);
    }

    /// Manual "detect" action
    pub fn detect_content_type(&mut self) -> ContentType {
        self.draft.content.detect_now()
    }

    /// Fill the draft from a JSON document
    ///
    /// Known keys overwrite the matching fields; absent keys leave them
    /// alone. On any error the draft is unchanged.
    pub fn import_json(&mut self, json: &str) -> Result<(), FormError> {
        let imported: ImportedDocument = serde_json::from_str(json).map_err(|e| {
            tracing::warn!(error = %e, "Rejected document import");
            FormError::Import(e.to_string())
        })?;

        if let Some(title) = imported.title {
            self.draft.title = title;
        }
        match (imported.content, imported.document_type) {
            (Some(content), Some(content_type)) => {
                self.draft.content = ContentRecord::with_type(content, content_type);
            }
            (Some(content), None) => {
                self.draft.content.edit(content);
            }
            (None, Some(content_type)) => {
                self.draft.content.set_content_type(content_type);
            }
            (None, None) => {}
        }
        if let Some(source_url) = imported.source_url {
            self.draft.source_url = source_url;
        }
        if let Some(category) = imported.category {
            self.draft.category = category;
        }
        if let Some(tags) = imported.tags {
            self.set_tags(tags);
        }

        tracing::debug!(
            content_type = %self.draft.content.content_type(),
            "Imported document into form"
        );
        Ok(())
    }

    /// Fill the draft from a decoded upload
    pub fn apply_upload(&mut self, upload: DecodedUpload) {
        match upload {
            DecodedUpload::Text {
                content,
                content_type,
                declared,
                ..
            } => {
                if declared {
                    self.draft.content = ContentRecord::with_type(content, content_type);
                } else {
                    self.draft.content = ContentRecord::new(content);
                }
            }
            DecodedUpload::Attachment {
                file_name,
                media_type,
                bytes,
            } => {
                if self.draft.title.trim().is_empty() {
                    let stem = file_name
                        .rsplit_once('.')
                        .map_or(file_name.as_str(), |(stem, _)| stem);
                    self.draft.title = stem.to_string();
                }
                self.draft.attachment = Some(Attachment {
                    file_name,
                    media_type,
                    bytes,
                });
            }
        }
    }

    /// Client-side checks
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.draft.title.trim().is_empty() {
            errors.push("title", "Title is required");
        }
        if self.draft.content.is_blank() && self.draft.attachment.is_none() {
            errors.push("content", "Content is required");
        }
        let source_url = self.draft.source_url.trim();
        if !source_url.is_empty()
            && !SanitizationPolicy::standard().allows_uri(&strip_uri_whitespace(source_url))
        {
            errors.push("sourceUrl", "Source URL must be a web or relative link");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Whether a submission may start now
    pub fn can_submit(&self) -> bool {
        !self.in_flight
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Multipart body for the current draft
    pub fn to_payload(&self) -> DocumentPayload {
        let draft = &self.draft;
        let mut payload = DocumentPayload::new();
        payload.push(PayloadField::text("title", draft.title.trim()));
        payload.push(PayloadField::text("content", draft.content.content()));
        payload.push(PayloadField::text(
            "documentType",
            draft.content.content_type().as_str(),
        ));
        if !draft.source_url.trim().is_empty() {
            payload.push(PayloadField::text("sourceUrl", draft.source_url.trim()));
        }
        if !draft.category.trim().is_empty() {
            payload.push(PayloadField::text("category", draft.category.trim()));
        }
        for tag in &draft.tags {
            payload.push(PayloadField::text("tags[]", tag.as_str()));
        }
        if let Some(attachment) = &draft.attachment {
            payload.push(PayloadField::File {
                name: "file".to_string(),
                file_name: attachment.file_name.clone(),
                media_type: attachment.media_type.clone(),
                bytes: attachment.bytes.clone(),
            });
        }
        payload
    }

    /// Validate and mark the form in flight
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, FormError> {
        self.validate().map_err(FormError::Validation)?;
        if self.in_flight {
            return Err(FormError::SubmissionInFlight);
        }
        self.in_flight = true;
        Ok(PendingSubmission {
            document_id: self.document_id.clone(),
            payload: self.to_payload(),
        })
    }

    /// Record the result of the request started by [`Self::begin_submit`]
    pub fn complete_submit(
        &mut self,
        result: Result<DocumentId, ApiError>,
    ) -> Result<DocumentId, FormError> {
        self.in_flight = false;
        match result {
            Ok(id) => {
                tracing::debug!(document = %id, "Document saved");
                self.document_id = Some(id.clone());
                Ok(id)
            }
            Err(err) => {
                tracing::warn!(status = ?err.status, error = %err, "Document submission failed");
                Err(FormError::Api(err))
            }
        }
    }

    /// Validate, send through `api` and record the result
    pub fn submit(&mut self, api: &mut impl DocumentApi) -> Result<DocumentId, FormError> {
        let pending = self.begin_submit()?;
        let result = match &pending.document_id {
            Some(id) => api
                .update_document(id, &pending.payload)
                .map(|()| id.clone()),
            None => api.create_document(&pending.payload),
        };
        self.complete_submit(result)
    }
}
