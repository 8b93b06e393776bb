//! Error handling for the console core
//!
//! Core computations (key normalization, owner defaulting, roll-ups) are
//! total and never surface errors; the fallible paths are submit-time
//! validation and the network boundary. This module provides idiomatic
//! Rust error types using thiserror so every failure stays a scoped, local
//! message rather than a page-level crash.

use thiserror::Error;

use crate::ownership::OwnerKind;

/// Top-level error type for the console core.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("ownership error: {0}")]
    Ownership(#[from] OwnershipError),

    #[error("upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Submit-time owner validation failures.
///
/// Surfaced as field-level form errors, never thrown mid-edit; the message
/// is distinct per owner kind so the form can label the right picker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnershipError {
    #[error("select a franchise for this agent")]
    MissingFranchise,

    #[error("select a relationship manager for this agent")]
    MissingRelationshipManager,
}

impl OwnershipError {
    pub fn missing(kind: OwnerKind) -> Self {
        match kind {
            OwnerKind::Franchise => OwnershipError::MissingFranchise,
            OwnerKind::RelationshipManager => OwnershipError::MissingRelationshipManager,
        }
    }

    /// The form field both variants attach to.
    pub fn field(&self) -> &'static str {
        "managedBy"
    }
}

/// Document upload failures.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("upload rejected: {message}")]
    Rejected { message: String },
}

/// Failures at the REST boundary.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The bearer credential is gone or expired; session teardown is the
    /// caller's job.
    #[error("session is no longer authorized")]
    Unauthorized,

    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("API base URL cannot carry path segments")]
    BadBaseUrl,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("malformed response payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
