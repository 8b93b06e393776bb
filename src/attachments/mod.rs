//! Document attachments across the create/update boundary
//!
//! KYC files can be picked before the owning entity exists. They stage
//! locally per document type, then flush as sequential uploads once the
//! create call hands back an identifier. Single-valued slots hold at most
//! one file each; `additional` is the only list-valued type.

pub mod stager;
pub mod types;
pub mod uploader;

pub use stager::{AttachmentStager, FlushFailure, FlushReport, LocalPreview, Preview};
pub use types::{DocType, EntityType, SlotState, StagedAttachment};
pub use uploader::{DocumentUploader, HttpDocumentUploader, UploadRequest};

pub use crate::error::UploadError;
