//! REST API collaborator
//!
//! The dashboard talks to the Zemon backend over REST. This crate does not
//! ship an HTTP client; callers implement [`DocumentApi`] over whatever
//! transport and credentials they have.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Communication channels
pub const CHANNELS_PATH: &str = "/channels";
/// User accounts
pub const USERS_PATH: &str = "/users";
/// Forge learning resources
pub const FORGE_PATH: &str = "/forge";
/// Crucible coding challenges
pub const CRUCIBLE_PATH: &str = "/crucible";
/// Knowledge-base documents
pub const KNOWLEDGE_BASE_DOCUMENTS_PATH: &str = "/admin/knowledge-base/documents";

/// Message shown when the server gives no usable error text
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Server-assigned document identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path of a single knowledge-base document
pub fn document_path(id: &DocumentId) -> String {
    format!("{KNOWLEDGE_BASE_DOCUMENTS_PATH}/{id}")
}

/// One field of a multipart form body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadField {
    Text { name: String, value: String },
    File {
        name: String,
        file_name: String,
        media_type: String,
        bytes: Vec<u8>,
    },
}

impl PayloadField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        PayloadField::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PayloadField::Text { name, .. } | PayloadField::File { name, .. } => name,
        }
    }
}

/// Multipart form body, fields in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPayload {
    fields: Vec<PayloadField>,
}

impl DocumentPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: PayloadField) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[PayloadField] {
        &self.fields
    }

    /// Text values of every field called `name`, in order
    pub fn text_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields.iter().filter_map(move |field| match field {
            PayloadField::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// First text value of the field called `name`
    pub fn text_value<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        self.text_values(name).next()
    }
}

/// Failure reported by the backend or the transport
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("API error (status {status:?}): {}", .message.as_deref().unwrap_or("no message"))]
pub struct ApiError {
    /// HTTP status, absent for transport failures
    pub status: Option<u16>,
    /// Server-provided message
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(status: Option<u16>, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Message to show the author
    pub fn user_message(&self) -> &str {
        match self.message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => message,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }
}

/// Knowledge-base document endpoints
pub trait DocumentApi {
    /// `POST /admin/knowledge-base/documents`
    fn create_document(&mut self, payload: &DocumentPayload) -> Result<DocumentId, ApiError>;

    /// `PUT /admin/knowledge-base/documents/{id}`
    fn update_document(&mut self, id: &DocumentId, payload: &DocumentPayload) -> Result<(), ApiError>;
}
