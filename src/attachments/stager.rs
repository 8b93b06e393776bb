//! Staged attachment lifecycle
//!
//! Forms collect files before the owning entity exists. Each slot moves
//! `Empty → Staged → Uploading → Committed`, or `Staged → Removed` when the
//! user discards it. Once the create call returns an identifier, `flush`
//! uploads everything staged, one file at a time.
//!
//! Create-then-flush is not atomic: if the form goes away between the two,
//! the entity persists without its staged documents. The stager keeps no
//! draft queue; re-adding a document later is always possible.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::identity::IdentityKey;
use crate::models::Document;

use super::types::{DocType, EntityType, SlotState, StagedAttachment};
use super::uploader::{DocumentUploader, UploadRequest};

enum Slot {
    Staged(StagedAttachment),
    Uploading(StagedAttachment),
    Committed(Document),
}

/// Per-form attachment staging area, scoped to the form's lifetime.
pub struct AttachmentStager {
    uploader: Arc<dyn DocumentUploader>,
    entity_type: EntityType,
    entity_id: Option<IdentityKey>,
    slots: HashMap<DocType, Slot>,
    additional: Vec<StagedAttachment>,
    documents: Vec<Document>,
}

impl AttachmentStager {
    /// Stager for a create form: no entity identifier yet, everything
    /// stages locally until [`AttachmentStager::flush`].
    pub fn new(uploader: Arc<dyn DocumentUploader>, entity_type: EntityType) -> Self {
        Self {
            uploader,
            entity_type,
            entity_id: None,
            slots: HashMap::new(),
            additional: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Stager for an edit form: the entity exists, so staged files upload
    /// immediately.
    pub fn for_entity(
        uploader: Arc<dyn DocumentUploader>,
        entity_type: EntityType,
        entity_id: IdentityKey,
    ) -> Self {
        let mut stager = Self::new(uploader, entity_type);
        stager.entity_id = Some(entity_id);
        stager
    }

    pub fn is_bound(&self) -> bool {
        self.entity_id.is_some()
    }

    pub fn slot_state(&self, doc_type: DocType) -> SlotState {
        match self.slots.get(&doc_type) {
            None => SlotState::Empty,
            Some(Slot::Staged(_)) => SlotState::Staged,
            Some(Slot::Uploading(_)) => SlotState::Uploading,
            Some(Slot::Committed(_)) => SlotState::Committed,
        }
    }

    /// Staged entries of the multi-valued `additional` type, insertion order.
    pub fn additional(&self) -> &[StagedAttachment] {
        &self.additional
    }

    /// Server-side documents committed through this stager.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn documents_of_type(&self, doc_type: DocType) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|document| document.document_type == doc_type.as_str())
            .collect()
    }

    /// Number of attachments currently staged and waiting for flush.
    pub fn staged_count(&self) -> usize {
        let single = self
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Staged(_)))
            .count();
        single + self.additional.len()
    }

    /// Take a file into the stager.
    ///
    /// Bound entity → upload right away; the slot lands `Committed`, or stays
    /// `Staged` if the upload fails (logged, not surfaced). Unbound → held
    /// locally: a single-valued slot silently replaces any prior staged file
    /// of the same type, `additional` appends.
    pub async fn stage(
        &mut self,
        doc_type: DocType,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        label: Option<String>,
    ) -> SlotState {
        let mut attachment = StagedAttachment::new(doc_type, file_name, bytes);
        attachment.label = label;

        match self.entity_id.clone() {
            Some(entity_id) => self.upload_now(entity_id, attachment).await,
            None => {
                if doc_type.is_multi() {
                    self.additional.push(attachment);
                } else {
                    self.slots.insert(doc_type, Slot::Staged(attachment));
                }
                SlotState::Staged
            }
        }
    }

    /// Upload everything staged against a newly known entity identifier,
    /// one file at a time.
    ///
    /// Called once, right after entity creation succeeds. A failed item is
    /// logged, reported, and dropped from the batch — the entity is already
    /// committed, so the rest of the uploads still go through.
    pub async fn flush(&mut self, entity_id: IdentityKey) -> FlushReport {
        self.entity_id = Some(entity_id.clone());
        let mut report = FlushReport::default();

        for doc_type in DocType::SINGLE_SLOTS {
            let staged = match self.slots.get(&doc_type) {
                Some(Slot::Staged(_)) => match self.slots.remove(&doc_type) {
                    Some(Slot::Staged(attachment)) => attachment,
                    _ => continue,
                },
                _ => continue,
            };
            self.flush_one(&entity_id, staged, &mut report).await;
        }

        for attachment in std::mem::take(&mut self.additional) {
            self.flush_one(&entity_id, attachment, &mut report).await;
        }

        debug!(
            committed = report.committed.len(),
            failed = report.failed.len(),
            "attachment flush finished"
        );
        report
    }

    /// Discard a staged single-slot file before flush. Committed documents
    /// are untouched.
    pub fn remove(&mut self, doc_type: DocType) -> bool {
        match self.slots.get(&doc_type) {
            Some(Slot::Staged(_)) => {
                self.slots.remove(&doc_type);
                true
            }
            _ => false,
        }
    }

    /// Discard one staged `additional` entry by position.
    pub fn remove_additional(&mut self, index: usize) -> bool {
        if index < self.additional.len() {
            self.additional.remove(index);
            true
        } else {
            false
        }
    }

    /// Preview a single-slot attachment: the server URL once committed, a
    /// scoped local temp file while staged.
    pub fn preview(&self, doc_type: DocType) -> Result<Option<Preview>> {
        match self.slots.get(&doc_type) {
            Some(Slot::Committed(document)) => {
                Ok(document.url.clone().map(|url| Preview::Remote { url }))
            }
            Some(Slot::Staged(attachment)) | Some(Slot::Uploading(attachment)) => {
                Ok(Some(Preview::Local(LocalPreview::write(attachment)?)))
            }
            None => Ok(None),
        }
    }

    /// Preview one staged `additional` entry by position.
    pub fn preview_additional(&self, index: usize) -> Result<Option<Preview>> {
        match self.additional.get(index) {
            Some(attachment) => Ok(Some(Preview::Local(LocalPreview::write(attachment)?))),
            None => Ok(None),
        }
    }

    async fn upload_now(
        &mut self,
        entity_id: IdentityKey,
        attachment: StagedAttachment,
    ) -> SlotState {
        let doc_type = attachment.doc_type;
        let request = UploadRequest::new(self.entity_type, entity_id, &attachment);

        if !doc_type.is_multi() {
            self.slots.insert(doc_type, Slot::Uploading(attachment));
        }

        let uploader = Arc::clone(&self.uploader);
        let outcome = uploader.upload(&request).await;

        match outcome {
            Ok(document) => {
                if !doc_type.is_multi() {
                    self.slots
                        .insert(doc_type, Slot::Committed(document.clone()));
                }
                self.documents.push(document);
                SlotState::Committed
            }
            Err(err) => {
                warn!(%doc_type, file = %request.file_name, error = %err,
                    "document upload failed; file stays staged");
                if doc_type.is_multi() {
                    self.additional
                        .push(attachment_from_request(&request));
                } else if let Some(Slot::Uploading(staged)) = self.slots.remove(&doc_type) {
                    self.slots.insert(doc_type, Slot::Staged(staged));
                }
                SlotState::Staged
            }
        }
    }

    async fn flush_one(
        &mut self,
        entity_id: &IdentityKey,
        attachment: StagedAttachment,
        report: &mut FlushReport,
    ) {
        let doc_type = attachment.doc_type;
        let request = UploadRequest::new(self.entity_type, entity_id.clone(), &attachment);

        if !doc_type.is_multi() {
            self.slots.insert(doc_type, Slot::Uploading(attachment));
        }

        let uploader = Arc::clone(&self.uploader);
        let outcome = uploader.upload(&request).await;

        match outcome {
            Ok(document) => {
                if !doc_type.is_multi() {
                    self.slots
                        .insert(doc_type, Slot::Committed(document.clone()));
                }
                self.documents.push(document.clone());
                report.committed.push(document);
            }
            Err(err) => {
                warn!(%doc_type, file = %request.file_name, error = %err,
                    "flush upload failed; skipping");
                // Dropped from the batch: the entity is already created and
                // must not appear to have failed over one attachment.
                if !doc_type.is_multi() {
                    self.slots.remove(&doc_type);
                }
                report.failed.push(FlushFailure {
                    doc_type,
                    file_name: request.file_name.clone(),
                    error: err.to_string(),
                });
            }
        }
    }
}

fn attachment_from_request(request: &UploadRequest) -> StagedAttachment {
    let mut attachment = StagedAttachment::new(
        request.doc_type,
        request.file_name.clone(),
        request.bytes.clone(),
    );
    attachment.label = request.label.clone();
    attachment
}

/// Outcome of a [`AttachmentStager::flush`] batch.
#[derive(Debug, Default)]
pub struct FlushReport {
    pub committed: Vec<Document>,
    pub failed: Vec<FlushFailure>,
}

impl FlushReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// One upload that failed during flush, for a non-blocking notice.
#[derive(Debug, Clone)]
pub struct FlushFailure {
    pub doc_type: DocType,
    pub file_name: String,
    pub error: String,
}

/// Where to show a document from.
pub enum Preview {
    /// Committed document: the server URL.
    Remote { url: String },
    /// Staged document: a scoped local file, released when dropped.
    Local(LocalPreview),
}

/// Temp-file-backed preview of a staged attachment. The backing file is
/// deleted when this handle drops (or sooner via [`LocalPreview::close`]).
pub struct LocalPreview {
    file: NamedTempFile,
    file_name: String,
}

impl LocalPreview {
    fn write(attachment: &StagedAttachment) -> Result<Self> {
        let mut file = NamedTempFile::new().context("failed to create preview file")?;
        file.write_all(&attachment.bytes)
            .context("failed to write preview file")?;
        file.flush().context("failed to flush preview file")?;
        Ok(Self {
            file,
            file_name: attachment.file_name.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Release the backing file eagerly instead of waiting for drop.
    pub fn close(self) -> Result<()> {
        self.file.close().context("failed to remove preview file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UploadError;
    use async_trait::async_trait;

    /// Fails every call; staging while unbound must never reach it.
    struct UnreachableUploader;

    #[async_trait]
    impl DocumentUploader for UnreachableUploader {
        async fn upload(&self, request: &UploadRequest) -> Result<Document, UploadError> {
            panic!("unexpected upload of {}", request.file_name);
        }
    }

    fn unbound_stager() -> AttachmentStager {
        AttachmentStager::new(Arc::new(UnreachableUploader), EntityType::User)
    }

    #[tokio::test]
    async fn unbound_staging_does_not_upload() {
        let mut stager = unbound_stager();
        let state = stager
            .stage(DocType::Pan, "pan.pdf", b"pan".to_vec(), None)
            .await;
        assert_eq!(state, SlotState::Staged);
        assert_eq!(stager.slot_state(DocType::Pan), SlotState::Staged);
        assert_eq!(stager.staged_count(), 1);
    }

    #[tokio::test]
    async fn restaging_a_single_slot_replaces_the_file() {
        let mut stager = unbound_stager();
        stager
            .stage(DocType::Pan, "first.pdf", b"one".to_vec(), None)
            .await;
        stager
            .stage(DocType::Pan, "second.pdf", b"two".to_vec(), None)
            .await;

        assert_eq!(stager.staged_count(), 1);
        let preview = stager.preview(DocType::Pan).unwrap().unwrap();
        match preview {
            Preview::Local(local) => assert_eq!(local.file_name(), "second.pdf"),
            Preview::Remote { .. } => panic!("staged file should preview locally"),
        }
    }

    #[tokio::test]
    async fn additional_accumulates_in_insertion_order() {
        let mut stager = unbound_stager();
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            stager
                .stage(DocType::Additional, name, name.as_bytes().to_vec(), None)
                .await;
        }

        let names: Vec<&str> = stager
            .additional()
            .iter()
            .map(|attachment| attachment.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
    }

    #[tokio::test]
    async fn remove_discards_only_staged_entries() {
        let mut stager = unbound_stager();
        stager
            .stage(DocType::Gst, "gst.pdf", b"gst".to_vec(), None)
            .await;

        assert!(stager.remove(DocType::Gst));
        assert_eq!(stager.slot_state(DocType::Gst), SlotState::Empty);
        assert!(!stager.remove(DocType::Gst));
    }

    #[tokio::test]
    async fn remove_additional_is_positional() {
        let mut stager = unbound_stager();
        for name in ["a.pdf", "b.pdf"] {
            stager
                .stage(DocType::Additional, name, vec![0u8], None)
                .await;
        }

        assert!(stager.remove_additional(0));
        assert_eq!(stager.additional()[0].file_name, "b.pdf");
        assert!(!stager.remove_additional(5));
    }

    #[tokio::test]
    async fn local_preview_is_released_on_close() {
        let mut stager = unbound_stager();
        stager
            .stage(DocType::Aadhaar, "aadhaar.jpg", b"image-bytes".to_vec(), None)
            .await;

        let preview = stager.preview(DocType::Aadhaar).unwrap().unwrap();
        let Preview::Local(local) = preview else {
            panic!("staged file should preview locally");
        };
        let path = local.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"image-bytes");

        local.close().unwrap();
        assert!(!path.exists());
    }
}
