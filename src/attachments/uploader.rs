//! Upload boundary for entity documents
//!
//! The stager talks to a [`DocumentUploader`] trait object so forms can be
//! driven against the real REST endpoint or an in-memory double in tests.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::UploadError;
use crate::identity::IdentityKey;
use crate::models::Document;

use super::types::{DocType, EntityType, StagedAttachment};

/// One multipart upload: file plus the owning-entity coordinates.
#[derive(Clone)]
pub struct UploadRequest {
    pub entity_type: EntityType,
    pub entity_id: IdentityKey,
    pub doc_type: DocType,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub label: Option<String>,
}

impl UploadRequest {
    pub fn new(
        entity_type: EntityType,
        entity_id: IdentityKey,
        attachment: &StagedAttachment,
    ) -> Self {
        Self {
            entity_type,
            entity_id,
            doc_type: attachment.doc_type,
            file_name: attachment.file_name.clone(),
            bytes: attachment.bytes.clone(),
            label: attachment.label.clone(),
        }
    }
}

impl fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("entity_type", &self.entity_type)
            .field("entity_id", &self.entity_id)
            .field("doc_type", &self.doc_type)
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .field("label", &self.label)
            .finish()
    }
}

/// Pluggable upload transport.
#[async_trait]
pub trait DocumentUploader: Send + Sync {
    async fn upload(&self, request: &UploadRequest) -> Result<Document, UploadError>;
}

/// Uploads through the console REST API.
pub struct HttpDocumentUploader {
    api: Arc<ApiClient>,
}

impl HttpDocumentUploader {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DocumentUploader for HttpDocumentUploader {
    async fn upload(&self, request: &UploadRequest) -> Result<Document, UploadError> {
        Ok(self.api.upload_document(request).await?)
    }
}
